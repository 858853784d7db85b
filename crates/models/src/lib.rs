pub mod db;
pub mod errors;
pub mod user;

#[cfg(test)]
mod db_tests {
    use migration::MigratorTrait;
    use uuid::Uuid;

    use crate::{db, user};

    #[tokio::test]
    async fn user_crud_roundtrip() {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
            eprintln!("skip: DATABASE_URL not set");
            return;
        }
        let db = match db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return;
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return;
        }

        let email = format!("model_{}@example.com", Uuid::new_v4());
        let created = user::insert(&db, "bob", &email, "s3cret!").await.expect("insert user");
        assert!(created.id > 0);

        let by_id = user::find_by_id(&db, created.id).await.expect("find by id");
        assert_eq!(by_id.as_ref().map(|u| u.email.as_str()), Some(email.as_str()));

        let by_email = user::find_by_email(&db, &email).await.expect("find by email");
        assert_eq!(by_email.map(|u| u.id), Some(created.id));

        user::delete(&db, created.id).await.expect("delete user");
        let gone = user::find_by_id(&db, created.id).await.expect("find after delete");
        assert!(gone.is_none());
    }
}
