use crate::models::RawRecord;
use crate::services::error::PortalError;
use async_trait::async_trait;

/// Read-only source of service records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The record whose sharing token equals `token`, if any.
    async fn find_by_sharing_token(&self, token: &str) -> Result<Option<RawRecord>, PortalError>;

    async fn health_check(&self) -> Result<(), PortalError>;
}
