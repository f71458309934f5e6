use advisor_core::AdvisorError;
use axum::Json;
use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// An error ready to leave the service: a status plus a caller-safe message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Maps a domain error to a response, logging details that are not
    /// returned to the caller.
    pub fn from_domain(err: AdvisorError, fallback: &str) -> Self {
        match err {
            AdvisorError::Validation(message) => Self::bad_request(message),
            AdvisorError::Signature(message) => {
                tracing::warn!(error = %message, "Rejected webhook signature");
                Self::bad_request("Webhook signature verification failed")
            }
            AdvisorError::NotFound { entity_type, id } => {
                tracing::debug!(entity_type, id = %id, "Entity not found");
                Self::new(StatusCode::NOT_FOUND, format!("{entity_type} not found"))
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                Self::internal(fallback)
            }
        }
    }
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        Self::from_domain(err, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        let message = match &rejection {
            JsonRejection::JsonDataError(err) => match std::error::Error::source(err) {
                Some(source) => format!("Invalid request body: {source}"),
                None => rejection.body_text(),
            },
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
            JsonRejection::MissingJsonContentType(_) => {
                "Expected Content-Type: application/json".to_string()
            }
            _ => "Unreadable request body".to_string(),
        };
        Self::bad_request(message)
    }
}

/// `Json` body extractor whose rejections use the `{error}` response shape.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Rejects blank request fields with a 400 naming the field.
pub fn require(value: &str, field: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("Missing {field}")));
    }
    Ok(())
}
