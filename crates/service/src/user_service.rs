use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use serde::Deserialize;
use tracing::debug;

use crate::errors::ServiceError;
use crate::pagination::{PageInfo, Pagination};
use models::errors::ModelError;
use models::user;

/// Full user payload, used by create and by PUT-style replacement.
#[derive(Clone, Debug, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial update payload; only present fields are applied.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validate whichever fields are present, collecting every failure.
fn validate_fields(
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), ServiceError> {
    let mut details = Vec::new();
    let mut collect = |res: Result<(), ModelError>| {
        if let Err(ModelError::Validation(msg)) = res {
            details.push(msg);
        }
    };
    if let Some(u) = username {
        collect(user::validate_username(u));
    }
    if let Some(e) = email {
        collect(user::validate_email(e));
    }
    if let Some(p) = password {
        collect(user::validate_password(p));
    }
    if details.is_empty() { Ok(()) } else { Err(ServiceError::Validation(details)) }
}

/// Reject the write when another row already holds this email.
/// Check-then-write, not atomic: two identical concurrent registrations can race.
async fn ensure_email_free(db: &DatabaseConnection, email: &str) -> Result<(), ServiceError> {
    if user::find_by_email(db, email).await?.is_some() {
        return Err(ServiceError::EmailExists(email.to_string()));
    }
    Ok(())
}

/// Create a new user; fails with `EmailExists` when the email is taken.
pub async fn create_user(db: &DatabaseConnection, input: UserInput) -> Result<user::Model, ServiceError> {
    validate_fields(Some(&input.username), Some(&input.email), Some(&input.password))?;
    ensure_email_free(db, &input.email).await?;
    let created = user::insert(db, &input.username, &input.email, &input.password).await?;
    debug!(user_id = created.id, "user created");
    Ok(created)
}

/// List every user, ordered by id.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    let users = user::find_all(db).await?;
    Ok(users)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: i64) -> Result<Option<user::Model>, ServiceError> {
    let found = user::find_by_id(db, id).await?;
    Ok(found)
}

/// One page of users plus the metadata needed for pagination links.
pub async fn get_users_page(
    db: &DatabaseConnection,
    opts: Pagination,
) -> Result<(Vec<user::Model>, PageInfo), ServiceError> {
    let (page, size) = opts.normalize();
    let paginator = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .paginate(db, size);
    let counts = paginator
        .num_items_and_pages()
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let rows = paginator
        .fetch_page(page)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let info = PageInfo::new(page, size, counts.number_of_items, counts.number_of_pages);
    Ok((rows, info))
}

/// Replace every field of an existing user (PUT semantics).
/// The email uniqueness check re-runs only when the email actually changes.
pub async fn update_user(
    db: &DatabaseConnection,
    id: i64,
    input: UserInput,
) -> Result<user::Model, ServiceError> {
    let existing = user::find_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id))?;

    validate_fields(Some(&input.username), Some(&input.email), Some(&input.password))?;
    if existing.email != input.email {
        ensure_email_free(db, &input.email).await?;
    }

    let mut am: user::ActiveModel = existing.into();
    am.username = Set(input.username);
    am.email = Set(input.email);
    am.password = Set(input.password);
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Apply only the fields present in the patch; everything else is untouched.
pub async fn patch_user(
    db: &DatabaseConnection,
    id: i64,
    patch: UserPatch,
) -> Result<user::Model, ServiceError> {
    let existing = user::find_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id))?;

    validate_fields(
        patch.username.as_deref(),
        patch.email.as_deref(),
        patch.password.as_deref(),
    )?;
    if let Some(ref email) = patch.email {
        if existing.email != *email {
            ensure_email_free(db, email).await?;
        }
    }

    let mut am: user::ActiveModel = existing.into();
    if let Some(username) = patch.username {
        am.username = Set(username);
    }
    if let Some(email) = patch.email {
        am.email = Set(email);
    }
    if let Some(password) = patch.password {
        am.password = Set(password);
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a user; missing ids report `NotFound` rather than succeeding silently.
pub async fn delete_user(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let existing = user::find_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id))?;
    user::delete(db, existing.id).await?;
    debug!(user_id = id, "user deleted");
    Ok(())
}
