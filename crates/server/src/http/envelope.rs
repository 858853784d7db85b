//! Response envelopes wrapping returned data with status, timestamp and
//! navigational links.

use chrono::{DateTime, Utc};
use serde::Serialize;
use service::pagination::PageInfo;

use crate::http::links;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: &str, href: impl Into<String>) -> Self {
        Self { rel: rel.to_string(), href: href.into() }
    }
}

/// Outward representation of a user. Carries its own links; the password
/// never appears here.
#[derive(Clone, Debug, Serialize)]
pub struct UserResource {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub links: Vec<Link>,
}

impl UserResource {
    pub fn from_model(user: &models::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            links: links::for_user(user.id),
        }
    }
}

/// Single-item envelope: `{data, status, timestamp}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { data, status: 200, timestamp: Utc::now() }
    }

    pub fn created(data: T) -> Self {
        Self { data, status: 201, timestamp: Utc::now() }
    }
}

/// Collection envelope: `{data, links, status, timestamp}`.
#[derive(Debug, Serialize)]
pub struct ApiResponseCollection<T> {
    pub data: Vec<T>,
    pub links: Vec<Link>,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponseCollection<T> {
    pub fn ok(data: Vec<T>, links: Vec<Link>) -> Self {
        Self { data, links, status: 200, timestamp: Utc::now() }
    }
}

/// Paginated collection envelope: `{data, links, status, metadata, timestamp}`.
#[derive(Debug, Serialize)]
pub struct PagedApiResponseCollection<T> {
    pub data: Vec<T>,
    pub links: Vec<Link>,
    pub status: u16,
    pub metadata: PageInfo,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> PagedApiResponseCollection<T> {
    pub fn ok(data: Vec<T>, links: Vec<Link>, metadata: PageInfo) -> Self {
        Self { data, links, status: 200, metadata, timestamp: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::user;

    fn sample() -> user::Model {
        user::Model {
            id: 7,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter22".into(),
        }
    }

    #[test]
    fn resource_hides_password_and_carries_links() {
        let resource = UserResource::from_model(&sample());
        let json = serde_json::to_value(&resource).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["id"], 7);
        let rels: Vec<&str> = json["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["rel"].as_str().unwrap())
            .collect();
        assert_eq!(rels, vec!["self", "users"]);
        assert_eq!(json["links"][0]["href"], "/api/users/7");
    }

    #[test]
    fn item_envelope_shape() {
        let env = ApiResponse::created(UserResource::from_model(&sample()));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], 201);
        assert!(json["timestamp"].is_string());
        assert_eq!(json["data"]["username"], "alice");
    }

    #[test]
    fn collection_envelope_shape() {
        let env = ApiResponseCollection::ok(
            vec![UserResource::from_model(&sample())],
            links::for_users(),
        );
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["links"][0]["rel"], "self");
        assert_eq!(json["links"][1]["rel"], "create");
    }

    #[test]
    fn paged_envelope_carries_metadata() {
        let info = PageInfo::new(1, 10, 25, 3);
        let env = PagedApiResponseCollection::ok(
            vec![UserResource::from_model(&sample())],
            links::for_paginated(&info),
            info,
        );
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["metadata"]["totalElements"], 25);
        assert_eq!(json["metadata"]["totalPages"], 3);
        assert_eq!(json["metadata"]["page"], 1);
    }
}
