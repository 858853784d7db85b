use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub email: String,
    // Stored as received; never serialized back out
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().is_empty() {
        return Err(ModelError::Validation("username: must not be blank".into()));
    }
    if username.len() > 64 {
        return Err(ModelError::Validation("username: must be at most 64 characters".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ModelError::Validation("email: must be a well-formed email address".into()));
    }
    if email.len() > 255 {
        return Err(ModelError::Validation("email: must be at most 255 characters".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    if password.len() < 6 {
        return Err(ModelError::Validation("password: must be at least 6 characters".into()));
    }
    Ok(())
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn insert(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password: &str,
) -> Result<Model, ModelError> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;
    let am = ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password: Set(password.to_string()),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    debug!(user_id = created.id, "user row inserted");
    Ok(created)
}

pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    debug!(user_id = id, "user row deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("  ").is_err());
        assert!(validate_username(&"x".repeat(65)).is_err());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("s3cret!").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn password_never_serialized() {
        let m = Model {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter22".into(),
        };
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }
}
