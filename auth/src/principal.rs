use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Two-tier authorization role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription tier carried in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subscription {
    Starter,
    Professional,
    Enterprise,
}

impl Subscription {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subscription::Starter => "Starter",
            Subscription::Professional => "Professional",
            Subscription::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and authorization facts a token pair is issued for.
///
/// Services map their own user entity into this before calling the issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub subscription: Subscription,
}

impl Principal {
    pub fn new(
        user_id: impl ToString,
        email: impl ToString,
        role: Role,
        subscription: Subscription,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role,
            subscription,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_subscription_wire_names() {
        assert_eq!(
            serde_json::to_string(&Subscription::Professional).unwrap(),
            "\"Professional\""
        );
        assert_eq!(
            serde_json::from_str::<Subscription>("\"Enterprise\"").unwrap(),
            Subscription::Enterprise
        );
        assert!(serde_json::from_str::<Subscription>("\"gold\"").is_err());
    }
}
