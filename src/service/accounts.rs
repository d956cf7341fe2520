use super::{
    PresenceService,
    validation::{check_name, check_password, normalize_email},
};
use crate::{
    auth::policy,
    error::AppError,
    model::{
        role::Role,
        user::{NewUser, User},
    },
    store::StoreError,
};
use tracing::{debug, info, instrument};

impl PresenceService {
    /// Creates an account with the requested role. Roles are self-declared.
    #[instrument(name = "register", skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let email = normalize_email(email)?;
        let name = check_name(name)?;
        check_password(password)?;

        if self.store.find_account_by_email(&email).await?.is_some() {
            info!("Registration rejected: email already registered");
            return Err(AppError::EmailTaken);
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

        // a concurrent registration can still win the unique key
        let user = self
            .store
            .insert_user(NewUser {
                email,
                name,
                role,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict => AppError::EmailTaken,
                other => other.into(),
            })?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Unknown email and wrong password fail identically.
    #[instrument(name = "login", skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::invalid("Email and password are required"));
        }

        let Some(account) = self.store.find_account_by_email(&email).await? else {
            // same hashing cost as a wrong password
            self.passwords.verify_absent(password);
            info!("Invalid credentials: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        debug!(user_id = account.user.id, "Verifying password");
        if !self.passwords.verify(password, &account.password_hash) {
            info!(user_id = account.user.id, "Invalid credentials: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(account.user)
    }

    pub async fn get_current_user(&self, actor_id: u64) -> Result<User, AppError> {
        self.actor(actor_id).await
    }

    #[instrument(name = "list_users", skip(self))]
    pub async fn list_users(&self, actor_id: u64) -> Result<Vec<User>, AppError> {
        let actor = self.actor(actor_id).await?;
        policy::authorize_list_users(&actor)?;

        Ok(self.store.list_users().await?)
    }
}
