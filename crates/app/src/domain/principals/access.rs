//! Access checks applied by every service operation.

use thiserror::Error;

use crate::domain::principals::records::{Principal, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthorized,

    #[error("principal is blocked")]
    Blocked,

    #[error("insufficient privileges")]
    Forbidden,
}

/// Resolve the caller of an operation, rejecting anonymous and blocked callers.
///
/// # Errors
///
/// [`AccessError::Unauthorized`] when no principal is present,
/// [`AccessError::Blocked`] when the principal is blocked.
pub fn authorize(principal: Option<Principal>) -> Result<Principal, AccessError> {
    let principal = principal.ok_or(AccessError::Unauthorized)?;

    principal.ensure_active()?;

    Ok(principal)
}

impl Principal {
    /// # Errors
    ///
    /// [`AccessError::Blocked`] when the principal is blocked.
    pub fn ensure_active(&self) -> Result<(), AccessError> {
        if self.blocked {
            return Err(AccessError::Blocked);
        }

        Ok(())
    }

    /// # Errors
    ///
    /// [`AccessError::Blocked`] or [`AccessError::Forbidden`] for non-staff.
    pub fn ensure_staff(&self) -> Result<(), AccessError> {
        self.ensure_active()?;

        if !self.role.is_staff() {
            return Err(AccessError::Forbidden);
        }

        Ok(())
    }

    /// # Errors
    ///
    /// [`AccessError::Blocked`] or [`AccessError::Forbidden`] for non-admins.
    pub fn ensure_admin(&self) -> Result<(), AccessError> {
        self.ensure_active()?;

        if self.role != Role::Admin {
            return Err(AccessError::Forbidden);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::principals::records::PrincipalUuid;

    use super::*;

    fn principal(role: Role, blocked: bool) -> Principal {
        Principal {
            uuid: PrincipalUuid::new(),
            role,
            blocked,
        }
    }

    #[test]
    fn authorize_rejects_missing_principal() {
        assert_eq!(authorize(None), Err(AccessError::Unauthorized));
    }

    #[test]
    fn authorize_rejects_blocked_principal() {
        let blocked = principal(Role::Admin, true);

        assert_eq!(authorize(Some(blocked)), Err(AccessError::Blocked));
    }

    #[test]
    fn authorize_returns_active_principal() {
        let customer = principal(Role::Customer, false);

        assert_eq!(authorize(Some(customer)), Ok(customer));
    }

    #[test]
    fn staff_check_distinguishes_roles() {
        assert_eq!(
            principal(Role::Customer, false).ensure_staff(),
            Err(AccessError::Forbidden)
        );
        assert_eq!(principal(Role::Employee, false).ensure_staff(), Ok(()));
        assert_eq!(principal(Role::Admin, false).ensure_staff(), Ok(()));
    }

    #[test]
    fn admin_check_excludes_employees() {
        assert_eq!(
            principal(Role::Employee, false).ensure_admin(),
            Err(AccessError::Forbidden)
        );
        assert_eq!(principal(Role::Admin, false).ensure_admin(), Ok(()));
    }

    #[test]
    fn blocked_staff_is_blocked_not_forbidden() {
        assert_eq!(
            principal(Role::Admin, true).ensure_staff(),
            Err(AccessError::Blocked)
        );
    }
}
