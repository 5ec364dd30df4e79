//! Error taxonomy for a single submission.
//!
//! Every variant halts processing of the current submission and is turned
//! into a user-facing message at the HTTP boundary. Nothing here is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type PredictResult<T> = Result<T, PredictError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    /// Malformed input (period format, lease string, widget bounds).
    #[error("invalid value for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A categorical value outside its fixed enumeration.
    #[error("unknown value '{value}' for '{field}'")]
    UnknownCategory { field: String, value: String },

    /// An expected column is missing from the assembled row.
    #[error("expected column '{field}' is missing")]
    Schema { field: String },

    /// The scoring model failed on a completed row.
    #[error("prediction failed: {0}")]
    Scoring(String),
}

impl PredictError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable label used in JSON bodies and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::Schema { .. } => "schema",
            Self::Scoring(_) => "scoring",
        }
    }

    /// Field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. }
            | Self::UnknownCategory { field, .. }
            | Self::Schema { field } => Some(field.as_str()),
            Self::Scoring(_) => None,
        }
    }

    /// Message shown to the user. Scoring failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            Self::Scoring(_) => "The prediction could not be computed.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = match &self {
            PredictError::Scoring(reason) => {
                tracing::error!(target: "predict", %reason, "scoring failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };

        let body = Json(json!({
            "error": self.kind(),
            "field": self.field(),
            "message": self.user_message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let e = PredictError::validation("month", "expected YYYY-MM");
        assert_eq!(e.to_string(), "invalid value for 'month': expected YYYY-MM");
        assert_eq!(e.field(), Some("month"));

        let e = PredictError::UnknownCategory {
            field: "town".into(),
            value: "SENGKANG".into(),
        };
        assert_eq!(e.user_message(), "unknown value 'SENGKANG' for 'town'");
    }

    #[test]
    fn scoring_message_is_generic() {
        let e = PredictError::Scoring("row has 9 columns, model expects 10".into());
        assert_eq!(e.kind(), "scoring");
        assert!(e.field().is_none());
        assert!(!e.user_message().contains("columns"));
    }

    #[test]
    fn status_codes_by_kind() {
        let r = PredictError::Schema {
            field: "block".into(),
        }
        .into_response();
        assert_eq!(r.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let r = PredictError::Scoring("boom".into()).into_response();
        assert_eq!(r.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
