use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// An authenticated identity allowed to author, publish and moderate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
}

/// Whoever issued the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated(Principal),
}

impl Caller {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated(_))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Caller::Authenticated(principal) => Some(principal),
            Caller::Anonymous => None,
        }
    }

    /// Gate for privileged operations.
    pub fn require_principal(&self) -> Result<&Principal, DomainError> {
        self.principal().ok_or(DomainError::Unauthorized)
    }
}

impl From<Option<Principal>> for Caller {
    fn from(principal: Option<Principal>) -> Self {
        principal.map_or(Caller::Anonymous, Caller::Authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_rejected() {
        let caller = Caller::Anonymous;
        assert!(!caller.is_authenticated());
        assert!(matches!(
            caller.require_principal(),
            Err(DomainError::Unauthorized)
        ));
    }

    #[test]
    fn test_authenticated_yields_principal() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            email: "author@example.com".into(),
        };
        let caller = Caller::from(Some(principal.clone()));
        assert_eq!(caller.require_principal().unwrap(), &principal);
    }
}
