use anyhow::Error as AnyhowError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error returned from axum handlers. The response carries a generic message.
/// The error chain is not logged here, the failing handler already logged it in its span.
pub struct AppError(pub AnyhowError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!("Request handling failed, responding with 500");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<AnyhowError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
