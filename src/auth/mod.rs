//! Authentication module.
//!
//! The identity provider is external: it issues HS256 tokens carrying the
//! user id and role. This module validates them and exposes the caller as
//! [`CurrentUser`] to handlers.

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use uuid::Uuid;

use crate::utils::AppError;

/// Marketplace role carried in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buyer" => Some(Role::Buyer),
            "seller" => Some(Role::Seller),
            _ => None,
        }
    }
}

/// Authenticated caller, decoded from a validated token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
}

impl CurrentUser {
    /// Per-operation capability check: the authenticated role must match
    /// the one the endpoint serves.
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "this operation requires the {} role",
                role.as_str()
            )))
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| format!("subject is not a uuid: {}", claims.sub))?;
        let role =
            Role::parse(&claims.role).ok_or_else(|| format!("unknown role: {}", claims.role))?;
        Ok(Self { id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_convert_to_current_user() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            role: "seller".to_string(),
            exp: 0,
            iat: 0,
        };
        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::Seller);
    }

    #[test]
    fn malformed_claims_are_rejected() {
        let bad_sub = Claims {
            sub: "not-a-uuid".to_string(),
            role: "buyer".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(CurrentUser::try_from(bad_sub).is_err());

        let bad_role = Claims {
            sub: Uuid::new_v4().to_string(),
            role: "admin".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(CurrentUser::try_from(bad_role).is_err());
    }

    #[test]
    fn role_gate() {
        let user = CurrentUser {
            id: Uuid::new_v4(),
            role: Role::Buyer,
        };
        assert!(user.require_role(Role::Buyer).is_ok());
        assert!(user.require_role(Role::Seller).is_err());
    }
}
