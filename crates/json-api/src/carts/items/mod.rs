//! Cart Items

mod handlers;
mod requests;

pub(crate) use handlers::*;
