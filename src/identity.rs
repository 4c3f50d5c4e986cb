//! Caller identity for ledger operations.
//!
//! Authentication itself is handled by an external identity provider; this
//! service only receives the authenticated subject id and threads it
//! explicitly into every ledger call. Requests carry it in the `x-user-id`
//! header.

use crate::error::AppError;
use uuid::Uuid;

/// Request header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user a ledger operation is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: Uuid,
}

impl UserContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Parse the identity provider's subject header value.
    pub fn from_header_value(value: Option<&str>) -> Result<Self, AppError> {
        let raw = value.ok_or(AppError::Unauthenticated)?;
        let user_id = Uuid::parse_str(raw.trim()).map_err(|_| AppError::Unauthenticated)?;
        Ok(Self { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let result = UserContext::from_header_value(None);
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_malformed_id_is_unauthenticated() {
        let result = UserContext::from_header_value(Some("not-a-uuid"));
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_valid_id_parses() {
        let id = Uuid::new_v4();
        let ctx = UserContext::from_header_value(Some(&id.to_string())).unwrap();
        assert_eq!(ctx.user_id, id);
    }
}
