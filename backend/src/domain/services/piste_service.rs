//! Piste service: slope inventory CRUD.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::piste::Piste;
use crate::domain::ports::PisteRepository;
use crate::domain::services::map_repository_error;

/// Driving port for piste use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PisteService: Send + Sync {
    async fn add_piste(&self, piste: Piste) -> Result<Piste, Error>;

    async fn retrieve_piste(&self, id: i64) -> Result<Option<Piste>, Error>;

    async fn retrieve_all_pistes(&self) -> Result<Vec<Piste>, Error>;

    async fn remove_piste(&self, id: i64) -> Result<(), Error>;
}

/// Default [`PisteService`] over the repository port.
pub struct PisteServiceImpl {
    pistes: Arc<dyn PisteRepository>,
}

impl PisteServiceImpl {
    #[must_use]
    pub fn new(pistes: Arc<dyn PisteRepository>) -> Self {
        Self { pistes }
    }
}

#[async_trait]
impl PisteService for PisteServiceImpl {
    async fn add_piste(&self, piste: Piste) -> Result<Piste, Error> {
        self.pistes.save(piste).await.map_err(map_repository_error)
    }

    async fn retrieve_piste(&self, id: i64) -> Result<Option<Piste>, Error> {
        self.pistes
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_all_pistes(&self) -> Result<Vec<Piste>, Error> {
        self.pistes.find_all().await.map_err(map_repository_error)
    }

    async fn remove_piste(&self, id: i64) -> Result<(), Error> {
        self.pistes
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::piste::Color;
    use crate::domain::ports::MockPisteRepository;

    #[tokio::test]
    async fn add_piste_persists_and_returns_saved_row() {
        let mut repo = MockPisteRepository::new();
        repo.expect_save().times(1).returning(|mut piste| {
            piste.id = Some(5);
            Ok(piste)
        });

        let saved = PisteServiceImpl::new(Arc::new(repo))
            .add_piste(Piste {
                id: None,
                name: "Cornice".to_owned(),
                color: Color::Black,
                length: 2400,
                slope: 40,
            })
            .await
            .expect("add succeeds");

        assert_eq!(saved.id, Some(5));
    }

    #[tokio::test]
    async fn remove_piste_delegates_to_delete() {
        let mut repo = MockPisteRepository::new();
        repo.expect_delete_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));

        PisteServiceImpl::new(Arc::new(repo))
            .remove_piste(5)
            .await
            .expect("remove succeeds");
    }
}
