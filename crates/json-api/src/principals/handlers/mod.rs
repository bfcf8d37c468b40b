//! Principal Handlers

pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod me;
pub(crate) mod register;
pub(crate) mod update;
