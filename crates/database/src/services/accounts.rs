use crate::{entities::users, error::ServiceError};
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use uuid::Uuid;

/// Fields a user may change on their own profile; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Trims every provided field and rejects blank values or a malformed email
    fn normalized(self) -> Result<Self, ServiceError> {
        fn required(field: &str, value: Option<String>) -> Result<Option<String>, ServiceError> {
            match value.map(|v| v.trim().to_string()) {
                Some(v) if v.is_empty() => {
                    Err(ServiceError::Validation(format!("{field} must not be empty")))
                }
                other => Ok(other),
            }
        }

        let email = required("Email", self.email)?;
        if email.as_deref().is_some_and(|email| !email.contains('@')) {
            return Err(ServiceError::Validation("Email must be a valid address".to_string()));
        }

        Ok(Self {
            first_name: required("First name", self.first_name)?,
            last_name: required("Last name", self.last_name)?,
            email,
        })
    }
}

pub struct AccountService;

impl AccountService {
    /// Resolves the identity provider's subject claim to an active user
    pub async fn find_by_subject(
        db: &DatabaseConnection,
        subject: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Subject.eq(subject))
            .filter(users::Column::IsActive.eq(true))
            .one(db)
            .await
    }

    pub async fn update_profile(
        db: &DatabaseConnection,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<users::Model, ServiceError> {
        let update = update.normalized()?;

        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("User"))?;

        if update.first_name.is_none() && update.last_name.is_none() && update.email.is_none() {
            return Ok(user);
        }

        let mut active = user.into_active_model();
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            active.email = Set(email);
        }

        let user = active.update(db).await?;
        info!("Profile updated for {}", user.username);

        Ok(user)
    }
}
