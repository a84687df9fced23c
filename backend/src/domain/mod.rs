//! Domain primitives, ports, and services.
//!
//! Purpose: define the strongly typed user model, the transport-agnostic
//! error type, and the driving/driven ports that inbound and outbound
//! adapters plug into.
//!
//! Public surface:
//! - Error / ErrorCode: error payload and stable error identifier.
//! - User, UserDraft, UserId, UserName, EmailAddress: the directory record.
//! - TraceId: request-scoped correlation identifier.
//! - UsersService: implementation of the directory use-cases.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, InvalidUserId, User, UserDraft, UserId, UserName, UserValidationError,
};
pub use self::users_service::UsersService;
