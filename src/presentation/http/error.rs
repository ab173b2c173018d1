use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::stars::fetch_stars::FetchStarsError;
use crate::application::use_cases::tags::TagError;
use crate::application::validation::ValidationErrors;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Error half of every JSON handler: a status plus an [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                errors: None,
            },
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server error.")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or("Error"))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errs: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorBody {
                message: "The given data was invalid.".into(),
                errors: Some(errs.errors().clone()),
            },
        }
    }
}

impl From<TagError> for ApiError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::Validation(errs) => errs.into(),
            TagError::NotFound => Self::new(StatusCode::NOT_FOUND, "Tag not found."),
            TagError::Repository(e) => {
                tracing::error!(error = ?e, "tag_repository_failed");
                Self::internal()
            }
        }
    }
}

impl From<FetchStarsError> for ApiError {
    fn from(err: FetchStarsError) -> Self {
        match err {
            FetchStarsError::Validation(errs) => errs.into(),
            FetchStarsError::MissingToken => Self::new(
                StatusCode::CONFLICT,
                "Connect a GitHub access token before fetching stars.",
            ),
            FetchStarsError::Remote(e) => Self::new(StatusCode::BAD_GATEWAY, e.to_string()),
            FetchStarsError::Repository(e) => {
                tracing::error!(error = ?e, "github_token_lookup_failed");
                Self::internal()
            }
        }
    }
}

const JSON_DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

// Well-formed JSON of the wrong shape is reported like any other field error,
// e.g. `tags[0].sort_order: invalid value ...` under `tags.0.sort_order`.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let (field, reason) = split_data_error(&err.body_text());
                ValidationErrors::single(field, reason).into()
            }
            other => Self::new(other.status(), other.body_text()),
        }
    }
}

fn split_data_error(text: &str) -> (String, String) {
    let detail = text.strip_prefix(JSON_DATA_ERROR_PREFIX).unwrap_or(text);
    match detail.split_once(": ") {
        Some((path, reason)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            (path.replace('[', ".").replace(']', ""), reason.to_string())
        }
        _ => ("body".to_string(), detail.to_string()),
    }
}

/// `axum::Json` whose rejections render as [`ErrorBody`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
