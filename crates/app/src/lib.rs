//! Frameshop domain, persistence and service modules.

pub mod auth;
pub mod blobs;
pub mod context;
pub mod database;
pub mod domain;
pub mod patch;

#[cfg(test)]
mod test;

pub mod uuids;
