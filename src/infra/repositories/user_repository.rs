//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address (case-sensitive, as stored)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Count all users
    async fn count(&self) -> AppResult<u64>;

    /// Create a new user
    async fn create(&self, data: NewUser) -> AppResult<User>;

    /// Apply a per-field optional edit
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Point the user's weak device reference at a device, addressed by email
    async fn set_device(&self, email: &str, device_id: Uuid) -> AppResult<User>;

    /// Replace the stored password hash, addressed by email
    async fn set_password(&self, email: &str, password_hash: String) -> AppResult<User>;

    /// Delete user by ID, returning the removed row
    async fn delete(&self, id: Uuid) -> AppResult<User>;

    /// Delete user by email, returning the removed row
    async fn delete_by_email(&self, email: &str) -> AppResult<User>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model_by_email(&self, email: &str) -> AppResult<user::Model> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or_not_found()
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            surname: Set(data.surname),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            role: Set(data.role.to_string()),
            registered_at: Set(chrono::Utc::now()),
            device_id: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = user.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(surname) = changes.surname {
            active.surname = Set(surname);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        if let Some(device_id) = changes.device_id {
            active.device_id = Set(Some(device_id));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_device(&self, email: &str, device_id: Uuid) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model_by_email(email).await?.into();
        active.device_id = Set(Some(device_id));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_password(&self, email: &str, password_hash: String) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model_by_email(email).await?.into();
        active.password_hash = Set(password_hash);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let user = User::from(model.clone());
        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(user)
    }

    async fn delete_by_email(&self, email: &str) -> AppResult<User> {
        let model = self.find_model_by_email(email).await?;

        let user = User::from(model.clone());
        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(user)
    }
}
