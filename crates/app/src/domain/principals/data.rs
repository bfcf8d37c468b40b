//! Principal Data

use crate::{
    domain::principals::records::{PrincipalUuid, Role},
    patch::Patch,
};

/// New Principal Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrincipal {
    pub uuid: PrincipalUuid,
    pub username: String,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
}

/// Principal Update Data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrincipalUpdate {
    pub name: Patch<String>,
    pub email: Option<String>,
    pub phone: Patch<String>,
    pub role: Option<Role>,
    pub blocked: Option<bool>,
}
