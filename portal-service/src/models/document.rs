//! Render-ready view of a service visit.
//!
//! `ServiceDocumentView` is the transfer object returned by the retrieval
//! endpoint and consumed by the report pages. Field names follow the JSON
//! contract the browser client already speaks (camelCase, with
//! `equipment_type` kept in snake case).

use crate::models::EquipmentKind;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// One maintenance task shown on the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub item: &'static str,
    pub status: &'static str,
    pub notes: &'static str,
}

/// One priced catalog entry. Prices are held in cents so the tables can be
/// `static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingLineItem {
    pub code: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub price_cents: i64,
}

impl BillingLineItem {
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDocumentView {
    pub document_number: String,
    pub service_date: String,
    pub next_service: String,
    pub customer: CustomerView,
    pub equipment: Vec<EquipmentView>,
    pub invoice: InvoiceView,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerView {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentView {
    pub id: Uuid,
    pub name: &'static str,
    pub model: String,
    pub serial_number: String,
    pub installation_date: String,
    pub warranty_expires: String,
    pub warranty: WarrantyView,
    #[serde(rename = "equipment_type")]
    pub equipment_type: EquipmentKind,
    pub services: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyView {
    #[serde(rename = "type")]
    pub program: &'static str,
    pub coverage_start: String,
    pub coverage_end: String,
    pub services_remaining: u32,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceView {
    pub items: Vec<InvoiceLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub hst: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub description: &'static str,
    pub code: &'static str,
    pub unit: &'static str,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl ServiceDocumentView {
    /// Description and code of the first invoice line, as printed on the
    /// certificate's "Service Performed" row.
    pub fn primary_service(&self) -> Option<(&'static str, &'static str)> {
        self.invoice
            .items
            .first()
            .map(|line| (line.description, line.code))
    }
}
