use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use service::pagination::Pagination;
use service::user_service::{self, UserInput, UserPatch};

use crate::errors::ApiError;
use crate::http::csv::users_to_csv;
use crate::http::envelope::{
    ApiResponse, ApiResponseCollection, PagedApiResponseCollection, UserResource,
};
use crate::http::links;
use crate::routes::AppState;

/// Optional pagination query params; their presence selects the paged
/// response variant.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("User not found with id: {}", id))
}

#[utoipa::path(post, path = "/api/users", tag = "users", request_body = crate::openapi::UserInputDoc, responses((status = 201, description = "Created"), (status = 409, description = "Conflict"), (status = 422, description = "Unprocessable Entity")))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserResource>>), ApiError> {
    let Json(input) = payload?;
    let created = user_service::create_user(&state.db, input).await?;
    let resource = UserResource::from_model(&created);
    Ok((StatusCode::CREATED, Json(ApiResponse::created(resource))))
}

/// List users with content negotiation: `Accept: text/csv` downloads the
/// collection as CSV, otherwise JSON (paged when `page`/`size` are given).
#[utoipa::path(get, path = "/api/users", tag = "users", responses((status = 200, description = "OK")))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let accepts_csv = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/csv"))
        .unwrap_or(false);

    if accepts_csv {
        let users = user_service::get_all_users(&state.db).await?;
        let resources: Vec<UserResource> = users.iter().map(UserResource::from_model).collect();
        let body = users_to_csv(&resources).map_err(|e| ApiError::Internal(e.to_string()))?;
        let response = (
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=users.csv"),
            ],
            body,
        )
            .into_response();
        return Ok(response);
    }

    if params.page.is_some() || params.size.is_some() {
        let opts = Pagination {
            page: params.page.unwrap_or_default(),
            size: params.size.unwrap_or(Pagination::default().size),
        };
        let (users, info) = user_service::get_users_page(&state.db, opts).await?;
        let data: Vec<UserResource> = users.iter().map(UserResource::from_model).collect();
        let envelope = PagedApiResponseCollection::ok(data, links::for_paginated(&info), info);
        return Ok(Json(envelope).into_response());
    }

    let users = user_service::get_all_users(&state.db).await?;
    let data: Vec<UserResource> = users.iter().map(UserResource::from_model).collect();
    Ok(Json(ApiResponseCollection::ok(data, links::for_users())).into_response())
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "users", responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResource>>, ApiError> {
    let user = user_service::get_user(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(UserResource::from_model(&user))))
}

#[utoipa::path(put, path = "/api/users/{id}", tag = "users", request_body = crate::openapi::UserInputDoc, responses((status = 200, description = "OK"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict"), (status = 422, description = "Unprocessable Entity")))]
pub async fn replace_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<ApiResponse<UserResource>>, ApiError> {
    let Json(input) = payload?;
    let updated = user_service::update_user(&state.db, id, input).await?;
    Ok(Json(ApiResponse::ok(UserResource::from_model(&updated))))
}

#[utoipa::path(patch, path = "/api/users/{id}", tag = "users", request_body = crate::openapi::UserPatchDoc, responses((status = 200, description = "OK"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict"), (status = 422, description = "Unprocessable Entity")))]
pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<UserResource>>, ApiError> {
    let Json(patch) = payload?;
    let updated = user_service::patch_user(&state.db, id, patch).await?;
    Ok(Json(ApiResponse::ok(UserResource::from_model(&updated))))
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "users", responses((status = 204, description = "No Content"), (status = 404, description = "Not Found")))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    user_service::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
