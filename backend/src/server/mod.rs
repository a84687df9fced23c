//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::future::Future;
use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_directory::Trace;
#[cfg(debug_assertions)]
use user_directory::doc::ApiDoc;
use user_directory::inbound::http::{self, health::HealthState, state::HttpState};
use user_directory::outbound::memory::InMemoryUserRepository;
use user_directory::outbound::persistence::DieselUserRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Pick the repository backing the users API.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving users from PostgreSQL");
            HttpState::from_repository(Arc::new(DieselUserRepository::new(pool.clone())))
        }
        None => {
            info!("no database configured; serving users from memory");
            HttpState::from_repository(Arc::new(InMemoryUserRepository::default()))
        }
    };
    web::Data::new(state)
}

fn build_app(
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
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

/// Once `shutdown` resolves, fail liveness and stop the server gracefully.
pub async fn drain_on<F>(shutdown: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
