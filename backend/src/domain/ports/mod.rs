//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
