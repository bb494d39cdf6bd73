//! Services module for portal-service.

pub mod assembler;
pub mod catalog;
pub mod database;
pub mod error;
pub mod invoice;
pub mod metrics;
pub mod renderer;
pub mod store;

pub use assembler::assemble;
pub use database::Database;
pub use error::PortalError;
pub use metrics::{get_metrics, init_metrics, record_document_served, record_error, record_pdf_rendered};
pub use renderer::{ChromeRenderer, PdfRenderer};
pub use store::RecordStore;
