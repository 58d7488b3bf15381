//! In-memory repository implementations backing integration tests.
//!
//! `InMemoryStation` stands in for PostgreSQL behind every repository port,
//! including the referential behaviour the schema enforces: deletes of
//! still-referenced subscriptions, courses, instructors and pistes are
//! rejected with a constraint error, while deleting a skier cascades to
//! their registrations and piste links.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, InstructorRepository, PisteRepository, RegistrationRepository,
    RepositoryError, SkierRepository, SubscriptionRepository,
};
use crate::domain::{
    Course, Instructor, Piste, Registration, Skier, Subscription, SubscriptionType,
};
use chrono::NaiveDate;

#[derive(Default)]
struct StationState {
    skiers: HashMap<i64, Skier>,
    subscriptions: HashMap<i64, Subscription>,
    courses: HashMap<i64, Course>,
    instructors: HashMap<i64, Instructor>,
    pistes: HashMap<i64, Piste>,
    registrations: HashMap<i64, Registration>,
    skier_pistes: BTreeSet<(i64, i64)>,
    next_id: i64,
}

impl StationState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory store implementing every repository port.
#[derive(Default)]
pub struct InMemoryStation {
    inner: Mutex<StationState>,
}

impl InMemoryStation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StationState>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::connection("store mutex poisoned"))
    }
}

fn sorted_by_id<T: Clone>(rows: &HashMap<i64, T>) -> Vec<T> {
    let mut ids: Vec<i64> = rows.keys().copied().collect();
    ids.sort_unstable();
    ids.into_iter().filter_map(|id| rows.get(&id).cloned()).collect()
}

#[async_trait]
impl SkierRepository for InMemoryStation {
    async fn find_by_id(&self, id: i64) -> Result<Option<Skier>, RepositoryError> {
        Ok(self.lock()?.skiers.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Skier>, RepositoryError> {
        Ok(sorted_by_id(&self.lock()?.skiers))
    }

    async fn save(&self, mut skier: Skier) -> Result<Skier, RepositoryError> {
        let mut state = self.lock()?;
        let id = match skier.id {
            Some(id) => id,
            None => state.allocate_id(),
        };
        skier.id = Some(id);
        state.skiers.insert(id, skier.clone());
        Ok(skier)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        state.skiers.remove(&id);
        state
            .registrations
            .retain(|_, registration| registration.skier_id != Some(id));
        state.skier_pistes.retain(|(skier_id, _)| *skier_id != id);
        Ok(())
    }

    async fn find_by_subscription_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Skier>, RepositoryError> {
        let state = self.lock()?;
        let mut skiers: Vec<Skier> = state
            .skiers
            .values()
            .filter(|skier| {
                skier
                    .subscription_id
                    .and_then(|id| state.subscriptions.get(&id))
                    .is_some_and(|subscription| {
                        subscription.subscription_type == subscription_type
                    })
            })
            .cloned()
            .collect();
        skiers.sort_by_key(|skier| skier.id);
        Ok(skiers)
    }

    async fn attach_piste(&self, skier_id: i64, piste_id: i64) -> Result<(), RepositoryError> {
        self.lock()?.skier_pistes.insert((skier_id, piste_id));
        Ok(())
    }

    async fn piste_ids_for(&self, skier_id: i64) -> Result<Vec<i64>, RepositoryError> {
        Ok(self
            .lock()?
            .skier_pistes
            .iter()
            .filter(|(owner, _)| *owner == skier_id)
            .map(|(_, piste_id)| *piste_id)
            .collect())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStation {
    async fn find_by_id(&self, id: i64) -> Result<Option<Subscription>, RepositoryError> {
        Ok(self.lock()?.subscriptions.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Subscription>, RepositoryError> {
        Ok(sorted_by_id(&self.lock()?.subscriptions))
    }

    async fn save(&self, mut subscription: Subscription) -> Result<Subscription, RepositoryError> {
        let mut state = self.lock()?;
        let id = match subscription.id {
            Some(id) => id,
            None => state.allocate_id(),
        };
        subscription.id = Some(id);
        state.subscriptions.insert(id, subscription.clone());
        Ok(subscription)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state
            .skiers
            .values()
            .any(|skier| skier.subscription_id == Some(id))
        {
            return Err(RepositoryError::constraint("skiers_subscription_id_fkey"));
        }
        state.subscriptions.remove(&id);
        Ok(())
    }

    async fn find_by_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let mut subscriptions: Vec<Subscription> = self
            .lock()?
            .subscriptions
            .values()
            .filter(|subscription| subscription.subscription_type == subscription_type)
            .cloned()
            .collect();
        subscriptions.sort_by_key(|subscription| subscription.start_date);
        Ok(subscriptions)
    }

    async fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let mut subscriptions: Vec<Subscription> = self
            .lock()?
            .subscriptions
            .values()
            .filter(|subscription| {
                subscription.start_date >= start && subscription.start_date <= end
            })
            .cloned()
            .collect();
        subscriptions.sort_by_key(|subscription| subscription.start_date);
        Ok(subscriptions)
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> Result<Vec<Subscription>, RepositoryError> {
        let state = self.lock()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.subscriptions.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl CourseRepository for InMemoryStation {
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, RepositoryError> {
        Ok(self.lock()?.courses.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Course>, RepositoryError> {
        Ok(sorted_by_id(&self.lock()?.courses))
    }

    async fn save(&self, mut course: Course) -> Result<Course, RepositoryError> {
        let mut state = self.lock()?;
        let id = match course.id {
            Some(id) => id,
            None => state.allocate_id(),
        };
        course.id = Some(id);
        state.courses.insert(id, course.clone());
        Ok(course)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state
            .registrations
            .values()
            .any(|registration| registration.course_id == Some(id))
        {
            return Err(RepositoryError::constraint("registrations_course_id_fkey"));
        }
        state.courses.remove(&id);
        Ok(())
    }

    async fn find_by_instructor(&self, instructor_id: i64) -> Result<Vec<Course>, RepositoryError> {
        let mut courses: Vec<Course> = self
            .lock()?
            .courses
            .values()
            .filter(|course| course.instructor_id == Some(instructor_id))
            .cloned()
            .collect();
        courses.sort_by_key(|course| course.id);
        Ok(courses)
    }
}

#[async_trait]
impl InstructorRepository for InMemoryStation {
    async fn find_by_id(&self, id: i64) -> Result<Option<Instructor>, RepositoryError> {
        Ok(self.lock()?.instructors.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Instructor>, RepositoryError> {
        Ok(sorted_by_id(&self.lock()?.instructors))
    }

    async fn save(&self, mut instructor: Instructor) -> Result<Instructor, RepositoryError> {
        let mut state = self.lock()?;
        let id = match instructor.id {
            Some(id) => id,
            None => state.allocate_id(),
        };
        instructor.id = Some(id);
        state.instructors.insert(id, instructor.clone());
        Ok(instructor)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state
            .courses
            .values()
            .any(|course| course.instructor_id == Some(id))
        {
            return Err(RepositoryError::constraint("courses_instructor_id_fkey"));
        }
        state.instructors.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PisteRepository for InMemoryStation {
    async fn find_by_id(&self, id: i64) -> Result<Option<Piste>, RepositoryError> {
        Ok(self.lock()?.pistes.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Piste>, RepositoryError> {
        Ok(sorted_by_id(&self.lock()?.pistes))
    }

    async fn save(&self, mut piste: Piste) -> Result<Piste, RepositoryError> {
        let mut state = self.lock()?;
        let id = match piste.id {
            Some(id) => id,
            None => state.allocate_id(),
        };
        piste.id = Some(id);
        state.pistes.insert(id, piste.clone());
        Ok(piste)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.skier_pistes.iter().any(|(_, piste_id)| *piste_id == id) {
            return Err(RepositoryError::constraint("skier_pistes_piste_id_fkey"));
        }
        state.pistes.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStation {
    async fn find_by_id(&self, id: i64) -> Result<Option<Registration>, RepositoryError> {
        Ok(self.lock()?.registrations.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Registration>, RepositoryError> {
        Ok(sorted_by_id(&self.lock()?.registrations))
    }

    async fn save(&self, mut registration: Registration) -> Result<Registration, RepositoryError> {
        let mut state = self.lock()?;
        let id = match registration.id {
            Some(id) => id,
            None => state.allocate_id(),
        };
        registration.id = Some(id);
        state.registrations.insert(id, registration.clone());
        Ok(registration)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        self.lock()?.registrations.remove(&id);
        Ok(())
    }

    async fn find_by_skier_ids(
        &self,
        ids: Vec<i64>,
    ) -> Result<Vec<Registration>, RepositoryError> {
        let mut registrations: Vec<Registration> = self
            .lock()?
            .registrations
            .values()
            .filter(|registration| {
                registration
                    .skier_id
                    .is_some_and(|skier_id| ids.contains(&skier_id))
            })
            .cloned()
            .collect();
        registrations.sort_by_key(|registration| registration.id);
        Ok(registrations)
    }
}
