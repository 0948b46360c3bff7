pub mod admin;
pub mod ingredients;
pub mod recipes;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{autocomplete::MIN_QUERY_LEN, manager::Manager, matcher::MAX_MATCHES};

/// Application context passed to all handlers.
pub struct Ctx {
    pub mgr: Arc<Manager>,
    pub consts: Consts,
}

/// Application constants.
#[derive(Clone, Debug)]
pub struct Consts {
    pub enable_reload: bool,

    // Autocomplete settings.
    pub max_suggestions: usize,
    pub min_query_len: usize,

    pub num_popular: usize,
    pub max_recipe_matches: usize,
}

impl Default for Consts {
    fn default() -> Self {
        Self {
            enable_reload: false,
            max_suggestions: 10,
            min_query_len: MIN_QUERY_LEN,
            num_popular: 50,
            max_recipe_matches: MAX_MATCHES,
        }
    }
}

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResp<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp {
        data: Some(data),
        message: None,
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl<E: std::fmt::Display> From<E> for ApiErr {
    fn from(err: E) -> Self {
        Self::new(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let json = Json(ApiResp::<()> {
            data: None,
            message: Some(self.message),
        });
        (self.status, json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

/// Clamp a requested result count to `max`. Missing means `max`.
pub fn limit(requested: Option<usize>, max: usize) -> usize {
    requested.map_or(max, |n| n.min(max))
}
