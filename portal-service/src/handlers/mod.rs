pub mod documents;
pub mod health;
pub mod pages;
pub mod pdf;

pub use documents::{get_service_document, get_share_link};
pub use health::{health_check, metrics_handler, readiness_check};
pub use pages::{report_page, shared_page};
pub use pdf::generate_pdf;
