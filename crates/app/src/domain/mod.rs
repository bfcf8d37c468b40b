//! Frameshop Domain Concerns

pub mod carts;
pub(crate) mod catalog;
pub mod frames;
pub mod orders;
pub mod pricing;
pub mod principals;
pub mod variants;
