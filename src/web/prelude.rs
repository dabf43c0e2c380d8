pub(crate) use crate::error::VisionWebError;
pub(crate) use crate::session::SessionContext;
pub(crate) use crate::web::AppState;
pub(crate) use crate::web::csrf::validate_csrf;
pub(crate) use crate::web::flash;
pub(crate) use crate::web::views::{Outcome, render_page};
pub(crate) use axum::extract::{Form, State};
pub(crate) use axum::response::{IntoResponse, Redirect, Response};
pub(crate) use serde::Deserialize;
pub(crate) use tower_sessions::Session;
pub(crate) use tracing::{info, instrument, warn};
