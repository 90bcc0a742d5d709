use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Role;
use auth::Subscription;

use crate::domain::user::models::AdminStats;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::ListUsersQuery;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPage;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User and credential store
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn create_account(
        &self,
        command: RegisterCommand,
        role: Role,
        subscription: Subscription,
    ) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        self.repository
            .create(NewUser {
                email: command.email,
                name: command.name,
                role,
                subscription,
                password_hash,
            })
            .await
    }

    fn session(&self, user: User) -> Result<AuthSession, UserError> {
        let tokens = self.authenticator.issue_tokens(&user.principal())?;
        Ok(AuthSession { user, tokens })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let user = self
            .create_account(command, Role::User, Subscription::Starter)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.session(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::debug!("Login for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let stored_hash = self.repository.get_password_hash(&command.email).await?;
        let authenticator = Arc::clone(&self.authenticator);
        let principal = user.principal();

        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&command.password, stored_hash.as_deref(), &principal)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::debug!(user_id = %user.id, "Login with wrong password");
                UserError::InvalidCredentials
            }
            AuthenticationError::JwtError(err) => UserError::from(err),
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession { user, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, UserError> {
        let claims = self
            .authenticator
            .verify_refresh(refresh_token)
            .map_err(|e| {
                tracing::debug!(reason = %e.cause(), "Refresh token rejected");
                UserError::InvalidToken
            })?;

        let user_id = UserId::from_string(&claims.user_id).map_err(|_| UserError::InvalidToken)?;

        let user = self.repository.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %user_id, "Refresh token for unknown user");
            UserError::InvalidToken
        })?;

        tracing::debug!(user_id = %user.id, "Token pair refreshed");

        self.session(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self, query: ListUsersQuery) -> Result<UserPage, UserError> {
        let needle = query.search.as_deref().map(str::to_lowercase);

        let matching: Vec<User> = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .filter(|user| match &needle {
                Some(needle) => {
                    user.name.as_str().to_lowercase().contains(needle)
                        || user.email.as_str().to_lowercase().contains(needle)
                }
                None => true,
            })
            .collect();

        let total = matching.len();
        let offset = (query.page - 1).saturating_mul(query.limit);
        let users = matching
            .into_iter()
            .skip(offset)
            .take(query.limit)
            .collect();

        Ok(UserPage {
            users,
            total,
            page: query.page,
            limit: query.limit,
            total_pages: total.div_ceil(query.limit),
        })
    }

    async fn stats(&self) -> Result<AdminStats, UserError> {
        let users = self.repository.list_all().await?;
        Ok(AdminStats::from_users(&users))
    }

    async fn ensure_admin(&self, command: RegisterCommand) -> Result<User, UserError> {
        if let Some(existing) = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
        {
            if !existing.role.is_admin() {
                tracing::warn!(
                    user_id = %existing.id,
                    "Bootstrap admin email belongs to a non-admin account"
                );
            }
            return Ok(existing);
        }

        let user = self
            .create_account(command, Role::Admin, Subscription::Enterprise)
            .await?;

        tracing::info!(user_id = %user.id, "Bootstrap admin created");

        Ok(user)
    }
}
