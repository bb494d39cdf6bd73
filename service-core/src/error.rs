use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    /// Required top-level request fields were absent; carries their names.
    #[error("{message}: {fields:?}")]
    MissingFields {
        message: String,
        fields: Vec<String>,
    },

    /// A nested request object was incomplete; carries what it must contain.
    #[error("{message}: requires {required:?}")]
    IncompleteField {
        message: String,
        required: Vec<String>,
    },

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Render error: {0}")]
    RenderError(anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::MissingFields { .. }
            | AppError::IncompleteField { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::RenderError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            missing_fields: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            required: Option<Vec<String>>,
        }

        let status = self.status_code();

        // 5xx detail stays in the logs; clients only see the generic message.
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = match self {
            AppError::BadRequest(err) | AppError::NotFound(err) => ErrorResponse {
                error: err.to_string(),
                missing_fields: None,
                required: None,
            },
            AppError::MissingFields { message, fields } => ErrorResponse {
                error: message,
                missing_fields: Some(fields),
                required: None,
            },
            AppError::IncompleteField { message, required } => ErrorResponse {
                error: message,
                missing_fields: None,
                required: Some(required),
            },
            AppError::InternalError(_) => ErrorResponse {
                error: "Internal server error".to_string(),
                missing_fields: None,
                required: None,
            },
            AppError::DatabaseError(_) => ErrorResponse {
                error: "Database error".to_string(),
                missing_fields: None,
                required: None,
            },
            AppError::RenderError(_) => ErrorResponse {
                error: "Failed to generate PDF".to_string(),
                missing_fields: None,
                required: None,
            },
            AppError::ServiceUnavailable => ErrorResponse {
                error: "Service unavailable".to_string(),
                missing_fields: None,
                required: None,
            },
            AppError::ConfigError(_) => ErrorResponse {
                error: "Configuration error".to_string(),
                missing_fields: None,
                required: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    }

    #[tokio::test]
    async fn missing_fields_lists_field_names() {
        let response = AppError::MissingFields {
            message: "Missing required data".to_string(),
            fields: vec!["customer".to_string()],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required data");
        assert_eq!(body["missingFields"][0], "customer");
        assert!(body.get("required").is_none());
    }

    #[tokio::test]
    async fn incomplete_field_uses_required_key() {
        let response = AppError::IncompleteField {
            message: "Missing customer data".to_string(),
            required: vec!["name".to_string(), "address".to_string()],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["required"][1], "address");
        assert!(body.get("missingFields").is_none());
    }

    #[tokio::test]
    async fn server_errors_hide_detail() {
        let response =
            AppError::DatabaseError(anyhow::anyhow!("connection refused on 10.0.0.4")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Database error");
        assert!(!body.to_string().contains("10.0.0.4"));
    }

    #[tokio::test]
    async fn not_found_keeps_message() {
        let response =
            AppError::NotFound(anyhow::anyhow!("Service document not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Service document not found");
    }
}
