//! Carts

mod errors;
mod handlers;
pub(crate) mod items;
mod models;
pub(crate) mod uploads;

pub(crate) use handlers::*;
