use async_trait::async_trait;

use crate::domain::user::models::AdminStats;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::ListUsersQuery;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPage;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token pair.
    ///
    /// New accounts get role `user` and the Starter subscription. The
    /// password is hashed before it reaches the store.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, missing hash or wrong password
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// The user is re-read from the store so role and subscription are
    /// current.
    ///
    /// # Errors
    /// * `InvalidToken` - Token rejected or its user no longer exists
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// List users with optional case-insensitive search on name or email.
    async fn list_users(&self, query: ListUsersQuery) -> Result<UserPage, UserError>;

    /// Account totals for the admin dashboard, derived from the store.
    async fn stats(&self) -> Result<AdminStats, UserError>;

    /// Make sure an admin account exists for the given email.
    ///
    /// Returns the existing user untouched if the email is already
    /// registered.
    async fn ensure_admin(&self, command: RegisterCommand) -> Result<User, UserError>;
}

/// User and credential store.
///
/// Implementations must make `create` atomic per email: two concurrent
/// registrations of one email can never both succeed.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by email address (exact, case-sensitive match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve the stored password hash for an email.
    async fn get_password_hash(&self, email: &str) -> Result<Option<String>, UserError>;

    /// Persist a new user and its credential.
    ///
    /// Assigns the id and creation time and starts the usage counter at 0.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve all users in registration order.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
