//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use skistation::domain::services::{
    CourseServiceImpl, InstructorServiceImpl, PisteServiceImpl, RegistrationServiceImpl,
    SkierServiceImpl, SubscriptionServiceImpl,
};
#[cfg(debug_assertions)]
use skistation::doc::ApiDoc;
use skistation::inbound::http::health::{live, ready, HealthState};
use skistation::inbound::http::state::HttpState;
use skistation::inbound::http::{
    courses, instructors, pistes, registrations, skiers, subscriptions,
};
use skistation::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselInstructorRepository, DieselPisteRepository,
    DieselRegistrationRepository, DieselSkierRepository, DieselSubscriptionRepository, PoolConfig,
};
use skistation::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run pending migrations over a synchronous connection, before the async
/// pool exists.
///
/// # Errors
/// Surfaces connection and migration failures as [`std::io::Error`] so the
/// entry-point can abort startup.
pub fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection: {err}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migration: {err}")))?;
    Ok(())
}

/// Assemble the service layer over Diesel repositories sharing one pool.
fn build_http_state(pool: &DbPool) -> HttpState {
    let skiers = Arc::new(DieselSkierRepository::new(pool.clone()));
    let subscriptions = Arc::new(DieselSubscriptionRepository::new(pool.clone()));
    let courses = Arc::new(DieselCourseRepository::new(pool.clone()));
    let instructors = Arc::new(DieselInstructorRepository::new(pool.clone()));
    let pistes = Arc::new(DieselPisteRepository::new(pool.clone()));
    let registrations = Arc::new(DieselRegistrationRepository::new(pool.clone()));

    HttpState {
        skiers: Arc::new(SkierServiceImpl::new(
            skiers.clone(),
            subscriptions.clone(),
            pistes.clone(),
            courses.clone(),
            registrations.clone(),
        )),
        subscriptions: Arc::new(SubscriptionServiceImpl::new(subscriptions)),
        courses: Arc::new(CourseServiceImpl::new(courses.clone())),
        instructors: Arc::new(InstructorServiceImpl::new(instructors, courses.clone())),
        pistes: Arc::new(PisteServiceImpl::new(pistes)),
        registrations: Arc::new(RegistrationServiceImpl::new(registrations, skiers, courses)),
    }
}

pub(crate) fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .configure(skiers::configure)
        .configure(subscriptions::configure)
        .configure(courses::configure)
        .configure(instructors::configure)
        .configure(pistes::configure)
        .configure(registrations::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over a freshly built connection pool.
///
/// # Errors
/// Propagates [`std::io::Error`] when the pool cannot be built or the socket
/// cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(std::io::Error::other)?;
    let http_state = web::Data::new(build_http_state(&pool));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
