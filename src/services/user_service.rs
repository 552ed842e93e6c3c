//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateUser, NewUser, Password, UpdateUser, User, UserChanges, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; the password is hashed before storage
    async fn register(&self, data: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Count all users
    async fn count_users(&self) -> AppResult<u64>;

    /// Update user details; a supplied password is re-hashed
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Point the user's device reference at a device, addressed by email
    async fn assign_device(&self, email: &str, device_id: Uuid) -> AppResult<User>;

    /// Replace the user's password, addressed by email
    async fn change_password(&self, email: &str, password: &str) -> AppResult<User>;

    /// Delete user by ID, returning the removed row
    async fn delete_user(&self, id: Uuid) -> AppResult<User>;

    /// Delete user by email, returning the removed row
    async fn delete_by_email(&self, email: &str) -> AppResult<User>;

    /// Verify credentials and return the matching user
    async fn login(&self, email: &str, password: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, data: CreateUser) -> AppResult<User> {
        // Check if email already exists
        if self.users.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password = Password::new(&data.password)?;

        self.users
            .create(NewUser {
                name: data.name,
                surname: data.surname,
                email: data.email,
                password_hash: password.into_string(),
                role: data.role.unwrap_or(UserRole::User),
            })
            .await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn count_users(&self) -> AppResult<u64> {
        self.users.count().await
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        // Moving to an email held by another user is a conflict
        if let Some(email) = &changes.email {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        let password_hash = match &changes.password {
            Some(password) => Some(Password::new(password)?.into_string()),
            None => None,
        };

        self.users
            .update(
                id,
                UserChanges {
                    name: changes.name,
                    surname: changes.surname,
                    email: changes.email,
                    password_hash,
                    role: changes.role,
                    device_id: changes.device_id,
                },
            )
            .await
    }

    async fn assign_device(&self, email: &str, device_id: Uuid) -> AppResult<User> {
        self.users.set_device(email, device_id).await
    }

    async fn change_password(&self, email: &str, password: &str) -> AppResult<User> {
        let password = Password::new(password)?;
        self.users.set_password(email, password.into_string()).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<User> {
        self.users.delete(id).await
    }

    async fn delete_by_email(&self, email: &str) -> AppResult<User> {
        self.users.delete_by_email(email).await
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        // Unknown email and wrong password are indistinguishable to callers
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Password::from_hash(user.password_hash.clone()).verify(password) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}
