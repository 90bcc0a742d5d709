use std::fmt;
use std::str::FromStr;

use auth::Principal;
use auth::Role;
use auth::Subscription;
use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// The password hash is not part of the entity; credentials live beside
/// it in the store and are only read at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: DisplayName,
    pub role: Role,
    pub subscription: Subscription,
    pub created_at: DateTime<Utc>,
    pub total_usage: u64,
}

impl User {
    /// Identity and authorization facts embedded in this user's tokens.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.email.as_str(), self.role, self.subscription)
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored exactly
/// as given; comparisons are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, non-empty, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(DisplayNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// User record handed to the store. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub name: DisplayName,
    pub role: Role,
    pub subscription: Subscription,
    pub password_hash: String,
}

/// Command to register a new account with validated fields.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(name: DisplayName, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to log in. Left unvalidated so a malformed email fails exactly
/// like an unknown one.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated user plus the token pair just issued for them.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

/// Admin listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUsersQuery {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
}

impl ListUsersQuery {
    pub const DEFAULT_LIMIT: usize = 10;
    pub const MAX_LIMIT: usize = 100;

    /// Normalise raw paging input: page starts at 1, limit is clamped to
    /// 1..=100, a blank search means no filter.
    pub fn new(page: Option<usize>, limit: Option<usize>, search: Option<String>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            limit: limit
                .filter(|l| *l > 0)
                .unwrap_or(Self::DEFAULT_LIMIT)
                .min(Self::MAX_LIMIT),
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// One page of users.
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

/// Aggregate account figures for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_usage: u64,
    pub by_subscription: SubscriptionCounts,
    pub by_role: RoleCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionCounts {
    pub starter: usize,
    pub professional: usize,
    pub enterprise: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub user: usize,
    pub admin: usize,
}

impl AdminStats {
    pub fn from_users<'a>(users: impl IntoIterator<Item = &'a User>) -> Self {
        users.into_iter().fold(Self::default(), |mut stats, user| {
            stats.total_users += 1;
            stats.total_usage = stats.total_usage.saturating_add(user.total_usage);
            match user.subscription {
                Subscription::Starter => stats.by_subscription.starter += 1,
                Subscription::Professional => stats.by_subscription.professional += 1,
                Subscription::Enterprise => stats.by_subscription.enterprise += 1,
            }
            match user.role {
                Role::User => stats.by_role.user += 1,
                Role::Admin => stats.by_role.admin += 1,
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("user@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_display_name_trims_and_bounds() {
        assert_eq!(
            DisplayName::new("  Ada Lovelace ".to_string()).unwrap().as_str(),
            "Ada Lovelace"
        );
        assert_eq!(
            DisplayName::new("   ".to_string()).unwrap_err(),
            DisplayNameError::Empty
        );
        assert!(matches!(
            DisplayName::new("x".repeat(101)),
            Err(DisplayNameError::TooLong { max: 100, actual: 101 })
        ));
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("123456".to_string()).is_ok());
        assert_eq!(
            Password::new("12345".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 6, actual: 5 }
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));

        let command = LoginCommand {
            email: "a@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(!format!("{:?}", command).contains("hunter22"));
    }

    #[test]
    fn test_list_users_query_normalisation() {
        let query = ListUsersQuery::new(Some(0), Some(1000), Some("  ".to_string()));
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 100);
        assert_eq!(query.search, None);

        let query = ListUsersQuery::default();
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_user_principal() {
        let user = User {
            id: UserId::new(),
            email: EmailAddress::new("admin@example.com".to_string()).unwrap(),
            name: DisplayName::new("Admin".to_string()).unwrap(),
            role: Role::Admin,
            subscription: Subscription::Enterprise,
            created_at: Utc::now(),
            total_usage: 42,
        };

        let principal = user.principal();
        assert_eq!(principal.user_id, user.id.to_string());
        assert_eq!(principal.email, "admin@example.com");
        assert_eq!(principal.role, Role::Admin);
        assert_eq!(principal.subscription, Subscription::Enterprise);
    }
}
