//! Turns a stored record into the view shown to the customer.

use crate::models::{
    CustomerView, EquipmentKind, EquipmentView, RawCustomer, RawEquipment, RawRecord,
    ServiceDocumentView, ServiceType, WarrantyView,
};
use crate::services::catalog::{billing_line_items_for, checklist_for_equipment};
use crate::services::invoice::build_invoice;
use chrono::{Datelike, Months, NaiveDate};

const NEXT_SERVICE_INTERVAL: Months = Months::new(6);
const SERVICES_REMAINING: u32 = 8;
const WARRANTY_STATUS: &str = "Active & Current";
const UNKNOWN_DATE: &str = "Unknown";

/// US long form, e.g. `January 31, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn format_optional(date: Option<NaiveDate>) -> String {
    date.map(format_long_date)
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// `CH-{year}-{first six id characters}`.
pub fn document_number(record: &RawRecord) -> String {
    let id = record.id.simple().to_string();
    format!(
        "CH-{}-{}",
        record.service_date.year(),
        id[..6].to_uppercase()
    )
}

/// Six calendar months later. Chrono clamps to the end of a shorter month.
pub fn next_service_date(service_date: NaiveDate) -> Option<NaiveDate> {
    service_date.checked_add_months(NEXT_SERVICE_INTERVAL)
}

fn or_fallback(value: Option<&String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => fallback.to_string(),
    }
}

fn customer_view(customer: Option<&RawCustomer>) -> CustomerView {
    let empty = RawCustomer::default();
    let customer = customer.unwrap_or(&empty);

    CustomerView {
        name: or_fallback(customer.name.as_ref(), "Unknown Customer"),
        address: or_fallback(customer.address.as_ref(), "Address not provided"),
        phone: or_fallback(customer.phone.as_ref(), "Phone not provided"),
        email: or_fallback(customer.email.as_ref(), "Email not provided"),
    }
}

fn warranty_view(kind: EquipmentKind, row: &RawEquipment) -> WarrantyView {
    WarrantyView {
        program: kind.warranty_program(),
        coverage_start: format_optional(row.installation_date),
        coverage_end: format_optional(row.warranty_expires),
        services_remaining: SERVICES_REMAINING,
        status: WARRANTY_STATUS,
    }
}

fn equipment_view(kind: EquipmentKind, row: &RawEquipment, with_checklist: bool) -> EquipmentView {
    let services = if with_checklist {
        checklist_for_equipment(kind).to_vec()
    } else {
        Vec::new()
    };

    EquipmentView {
        id: row.id,
        name: kind.display_name(),
        model: row.model.clone(),
        serial_number: row.serial_number.clone(),
        installation_date: format_optional(row.installation_date),
        warranty_expires: format_optional(row.warranty_expires),
        warranty: warranty_view(kind, row),
        equipment_type: kind,
        services,
    }
}

/// Equipment rows the visit covered, each with its own kind's checklist.
///
/// Rows with an unknown tag, or of a kind the visit did not cover, are
/// dropped. An unrecognized service type keeps every known row but assigns
/// no checklist.
fn assign_equipment(service_type: ServiceType, rows: &[RawEquipment]) -> Vec<EquipmentView> {
    rows.iter()
        .filter_map(|row| {
            let Some(kind) = EquipmentKind::from_tag(&row.equipment_type) else {
                tracing::debug!(equipment_id = %row.id, "Skipping equipment with unknown type");
                return None;
            };
            match service_type {
                ServiceType::Unrecognized => Some(equipment_view(kind, row, false)),
                st if st.covers(kind) => Some(equipment_view(kind, row, true)),
                st => {
                    tracing::debug!(
                        equipment_id = %row.id,
                        kind = kind.as_str(),
                        service_type = st.as_str(),
                        "Equipment not covered by visit"
                    );
                    None
                }
            }
        })
        .collect()
}

pub fn assemble(record: &RawRecord) -> ServiceDocumentView {
    let service_type = ServiceType::from_string(&record.service_type);
    let line_items = billing_line_items_for(service_type);

    ServiceDocumentView {
        document_number: document_number(record),
        service_date: format_long_date(record.service_date),
        next_service: format_optional(next_service_date(record.service_date)),
        customer: customer_view(record.customer.as_ref()),
        equipment: assign_equipment(service_type, &record.equipment),
        invoice: build_invoice(&line_items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn unit(tag: &str) -> RawEquipment {
        RawEquipment {
            id: Uuid::new_v4(),
            equipment_type: tag.to_string(),
            model: format!("{tag}-model"),
            serial_number: "SN-1".to_string(),
            installation_date: Some(date(2020, 5, 1)),
            warranty_expires: None,
        }
    }

    fn record(service_type: &str, equipment: Vec<RawEquipment>) -> RawRecord {
        RawRecord {
            id: Uuid::parse_str("a1b2c3d4-0000-0000-0000-000000000000").unwrap(),
            service_date: date(2024, 1, 31),
            service_type: service_type.to_string(),
            customer: Some(RawCustomer {
                name: Some("Jane Doe".to_string()),
                address: Some("12 Elm St".to_string()),
                phone: None,
                email: Some(String::new()),
            }),
            equipment,
        }
    }

    #[test]
    fn document_number_uses_year_and_id_prefix() {
        let view = assemble(&record("condenser_only", vec![]));
        assert_eq!(view.document_number, "CH-2024-A1B2C3");
    }

    #[test]
    fn dates_use_long_form() {
        let view = assemble(&record("condenser_only", vec![]));
        assert_eq!(view.service_date, "January 31, 2024");
        assert_eq!(view.next_service, "July 31, 2024");
    }

    #[test]
    fn next_service_clamps_to_month_end() {
        assert_eq!(next_service_date(date(2024, 8, 31)), Some(date(2025, 2, 28)));
    }

    #[test]
    fn combined_visit_gives_each_unit_its_own_checklist() {
        let view = assemble(&record(
            "condenser+furnace",
            vec![unit("condenser"), unit("furnace")],
        ));

        assert_eq!(view.equipment.len(), 2);
        let condenser = &view.equipment[0];
        let furnace = &view.equipment[1];
        assert_eq!(condenser.name, "Condenser");
        assert_eq!(furnace.name, "Gas Furnace");
        assert_eq!(condenser.services, checklist_for_equipment(EquipmentKind::Condenser));
        assert_eq!(furnace.services, checklist_for_equipment(EquipmentKind::Furnace));
        assert!(!condenser
            .services
            .iter()
            .any(|s| s.item == "Gas Valve & Burner Inspection"));
        assert_eq!(view.invoice.items.len(), 1);
        assert_eq!(view.invoice.items[0].code, "SER-36573");
    }

    #[test]
    fn condenser_only_drops_furnace_rows() {
        let view = assemble(&record(
            "condenser_only",
            vec![unit("furnace"), unit("condenser"), unit("furnace")],
        ));
        assert_eq!(view.equipment.len(), 1);
        assert_eq!(view.equipment[0].equipment_type, EquipmentKind::Condenser);
        assert_eq!(view.equipment[0].services.len(), 7);
    }

    #[test]
    fn furnace_only_drops_condenser_rows() {
        let view = assemble(&record("furnace_only", vec![unit("condenser"), unit("furnace")]));
        assert_eq!(view.equipment.len(), 1);
        assert_eq!(view.equipment[0].warranty.program, "Daikin Furnace 10-Year Parts");
    }

    #[test]
    fn unknown_tags_are_dropped() {
        let view = assemble(&record("condenser+furnace", vec![unit("heat_pump"), unit("furnace")]));
        assert_eq!(view.equipment.len(), 1);
    }

    #[test]
    fn unrecognized_service_type_keeps_units_without_checklists() {
        let view = assemble(&record("duct_cleaning", vec![unit("condenser"), unit("furnace")]));
        assert_eq!(view.equipment.len(), 2);
        assert!(view.equipment.iter().all(|e| e.services.is_empty()));
        assert!(view.invoice.items.is_empty());
        assert!(view.invoice.total.is_zero());
    }

    #[test]
    fn coverage_end_matches_stored_expiry() {
        let view = assemble(&record("condenser_only", vec![unit("condenser")]));
        let warranty = &view.equipment[0].warranty;
        assert_eq!(warranty.coverage_start, "May 1, 2020");
        assert_eq!(warranty.coverage_end, "Unknown");
        assert_eq!(warranty.services_remaining, 8);
        assert_eq!(warranty.status, "Active & Current");
        assert_eq!(view.equipment[0].warranty_expires, "Unknown");
    }

    #[test]
    fn stored_expiry_is_used_and_missing_dates_are_unknown() {
        let mut with_expiry = unit("condenser");
        with_expiry.warranty_expires = Some(date(2028, 3, 15));
        let mut undated = unit("condenser");
        undated.installation_date = None;

        let view = assemble(&record("condenser_only", vec![with_expiry, undated]));
        assert_eq!(view.equipment[0].warranty.coverage_end, "March 15, 2028");
        assert_eq!(view.equipment[0].warranty_expires, "March 15, 2028");
        assert_eq!(view.equipment[1].installation_date, "Unknown");
        assert_eq!(view.equipment[1].warranty.coverage_end, "Unknown");
    }

    #[test]
    fn customer_fallbacks_fill_blank_fields() {
        let view = assemble(&record("condenser_only", vec![]));
        assert_eq!(view.customer.name, "Jane Doe");
        assert_eq!(view.customer.phone, "Phone not provided");
        assert_eq!(view.customer.email, "Email not provided");

        let mut orphan = record("condenser_only", vec![]);
        orphan.customer = None;
        let view = assemble(&orphan);
        assert_eq!(view.customer.name, "Unknown Customer");
        assert_eq!(view.customer.address, "Address not provided");
    }

    #[test]
    fn view_serializes_with_client_field_names() {
        let view = assemble(&record("condenser_only", vec![unit("condenser")]));
        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("documentNumber").is_some());
        assert!(json.get("nextService").is_some());
        assert_eq!(json["equipment"][0]["equipment_type"], "condenser");
        assert_eq!(json["equipment"][0]["serialNumber"], "SN-1");
        assert_eq!(
            json["equipment"][0]["warranty"]["type"],
            "Comfort Hub Premium 10-Year"
        );
        assert_eq!(json["equipment"][0]["warranty"]["servicesRemaining"], 8);
        assert_eq!(json["invoice"]["total"], serde_json::json!(112.99));
    }
}
