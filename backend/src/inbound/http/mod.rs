//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the users API under `/api` and the health probes at the root.
///
/// Callers provide [`state::HttpState`] and [`health::HealthState`] as app
/// data.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use user_directory::inbound::http::{configure, health::HealthState, state::HttpState};
/// use user_directory::outbound::memory::InMemoryUserRepository;
///
/// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::default()));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(
            web::scope("/api")
                .service(users::list_users)
                .service(users::create_user)
                .service(users::update_user)
                .service(users::delete_user),
        )
        .service(health::ready)
        .service(health::live);
}
