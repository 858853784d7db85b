use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UserInputDoc { pub username: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct UserPatchDoc {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(ToSchema)]
pub struct LinkDoc { pub rel: String, pub href: String }

#[derive(ToSchema)]
pub struct UserResourceDoc {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub links: Vec<LinkDoc>,
}

#[derive(ToSchema)]
pub struct ApiErrorResponseDoc {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub details: Vec<String>,
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::replace_user,
        crate::routes::users::patch_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            UserInputDoc,
            UserPatchDoc,
            LinkDoc,
            UserResourceDoc,
            ApiErrorResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
