//! Stored service-visit records, as read from the record store.

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// Header row of a service visit.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceDocumentRow {
    pub id: Uuid,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub customer_id: Option<Uuid>,
}

/// Customer attached to a visit. Every field may be blank in the store.
#[derive(Debug, Clone, Default, FromRow)]
pub struct RawCustomer {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One installed unit attached to a visit.
#[derive(Debug, Clone, FromRow)]
pub struct RawEquipment {
    pub id: Uuid,
    pub equipment_type: String,
    pub model: String,
    pub serial_number: String,
    pub installation_date: Option<NaiveDate>,
    pub warranty_expires: Option<NaiveDate>,
}

/// A visit with its customer and equipment rows, ready for assembly.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub id: Uuid,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub customer: Option<RawCustomer>,
    pub equipment: Vec<RawEquipment>,
}

impl RawRecord {
    pub fn from_parts(
        row: ServiceDocumentRow,
        customer: Option<RawCustomer>,
        equipment: Vec<RawEquipment>,
    ) -> Self {
        Self {
            id: row.id,
            service_date: row.service_date,
            service_type: row.service_type,
            customer,
            equipment,
        }
    }
}
