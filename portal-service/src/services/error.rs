use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Service document not found")]
    DocumentNotFound,

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    StoreUnavailable(anyhow::Error),

    #[error("Missing required data: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("Missing customer data")]
    MissingCustomerData,

    #[error("Missing equipment data")]
    MissingEquipmentData,

    #[error("Render error: {0}")]
    Render(anyhow::Error),

    #[error("Renderer timed out after {0} seconds")]
    RenderTimeout(u64),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl PortalError {
    /// Label used for the errors counter.
    pub fn kind(&self) -> &'static str {
        match self {
            PortalError::InvalidToken => "invalid_token",
            PortalError::DocumentNotFound => "not_found",
            PortalError::Store(_) | PortalError::StoreUnavailable(_) => "store",
            PortalError::MissingFields(_)
            | PortalError::MissingCustomerData
            | PortalError::MissingEquipmentData => "validation",
            PortalError::Render(_) | PortalError::RenderTimeout(_) => "render",
            PortalError::Template(_) => "template",
        }
    }
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::InvalidToken => AppError::BadRequest(anyhow::anyhow!("Invalid token")),
            PortalError::DocumentNotFound => {
                AppError::NotFound(anyhow::anyhow!("Service document not found"))
            }
            PortalError::Store(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            PortalError::StoreUnavailable(e) => AppError::DatabaseError(e),
            PortalError::MissingFields(fields) => AppError::MissingFields {
                message: "Missing required data".to_string(),
                fields: owned(&fields),
            },
            PortalError::MissingCustomerData => AppError::IncompleteField {
                message: "Missing customer data".to_string(),
                required: owned(&["name", "address"]),
            },
            PortalError::MissingEquipmentData => AppError::IncompleteField {
                message: "Missing equipment data".to_string(),
                required: owned(&["equipment array with at least one item"]),
            },
            PortalError::Render(e) => AppError::RenderError(e),
            PortalError::RenderTimeout(secs) => {
                AppError::RenderError(anyhow::anyhow!("Renderer timed out after {} seconds", secs))
            }
            PortalError::Template(e) => AppError::InternalError(anyhow::Error::new(e)),
        }
    }
}
