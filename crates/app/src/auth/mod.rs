//! Authentication

mod errors;
pub mod records;
pub(crate) mod repository;
mod service;
pub mod token;

pub use errors::{AuthServiceError, RegistrationError};
pub use service::*;
