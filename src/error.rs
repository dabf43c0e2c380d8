//! Error handling

use axum::response::IntoResponse;
use tracing::info;

/// Errors raised while serving the vision front-end.
#[derive(Debug)]
pub enum VisionWebError {
    /// When you didn't do the right thing
    BadRequest(String),
    /// Missing or invalid session / CSRF token
    Unauthorized,
    /// When a requested resource is not found
    NotFound(String),
    /// When a call to OpenAI fails before a JSON body comes back
    Upstream(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl std::fmt::Display for VisionWebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(reason) => write!(f, "Bad request: {reason}"),
            Self::Unauthorized => write!(f, "Unauthorized: invalid or missing session"),
            Self::NotFound(what) => write!(f, "Not found: {what}"),
            Self::Upstream(message) => write!(f, "Upstream error: {message}"),
            Self::InternalServerError(message) => write!(f, "Internal server error: {message}"),
        }
    }
}

impl std::error::Error for VisionWebError {}

impl From<axum::http::Error> for VisionWebError {
    fn from(err: axum::http::Error) -> Self {
        VisionWebError::InternalServerError(err.to_string())
    }
}

impl From<url::ParseError> for VisionWebError {
    fn from(err: url::ParseError) -> Self {
        VisionWebError::InternalServerError(err.to_string())
    }
}

impl From<reqwest::Error> for VisionWebError {
    fn from(err: reqwest::Error) -> Self {
        VisionWebError::Upstream(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for VisionWebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        VisionWebError::InternalServerError(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for VisionWebError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        VisionWebError::BadRequest(err.body_text())
    }
}

impl IntoResponse for VisionWebError {
    fn into_response(self) -> axum::response::Response {
        match self {
            VisionWebError::BadRequest(reason) => {
                info!("Bad request received: {}", reason);
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    format!("Bad Request: {reason}"),
                ));
                *response.status_mut() = axum::http::StatusCode::BAD_REQUEST;
                response
            }
            VisionWebError::Unauthorized => {
                info!("Unauthorized request received");
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    "Unauthorized: invalid or missing session.",
                ));
                *response.status_mut() = axum::http::StatusCode::UNAUTHORIZED;
                response
            }
            VisionWebError::NotFound(what) => {
                tracing::error!("404 {what}");
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Not Found"));
                *response.status_mut() = axum::http::StatusCode::NOT_FOUND;
                response
            }
            VisionWebError::Upstream(message) => {
                tracing::error!("Upstream error: {}", message);
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    format!("Error talking to OpenAI: {message}"),
                ));
                *response.status_mut() = axum::http::StatusCode::BAD_GATEWAY;
                response
            }
            VisionWebError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Internal server error"));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}
