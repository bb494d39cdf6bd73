//! Domain models for portal-service.

mod document;
mod record;
mod service_type;

pub use document::{
    BillingLineItem, ChecklistItem, CustomerView, EquipmentView, InvoiceLine, InvoiceView,
    ServiceDocumentView, WarrantyView,
};
pub use record::{RawCustomer, RawEquipment, RawRecord, ServiceDocumentRow};
pub use service_type::{EquipmentKind, ServiceType};
