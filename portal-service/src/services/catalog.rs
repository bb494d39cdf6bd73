//! Fixed maintenance checklists and the billing price list.

use crate::models::{BillingLineItem, ChecklistItem, EquipmentKind, ServiceType};

const COMPLETED: &str = "Completed";

pub static CONDENSER_CHECKLIST: [ChecklistItem; 7] = [
    ChecklistItem {
        item: "Refrigerant System Inspection",
        status: COMPLETED,
        notes: "System pressures, superheat, and subcooling confirmed within optimal range. No signs of refrigerant loss. System operating at target capacity under current load conditions.",
    },
    ChecklistItem {
        item: "Electrical Connections Inspection",
        status: COMPLETED,
        notes: "All wire terminals inspected and secured. Connections are clean, tight, and free of oxidation or heat discoloration.",
    },
    ChecklistItem {
        item: "Coil Cleaning – Indoor & Outdoor",
        status: COMPLETED,
        notes: "Outdoor condenser coil power-washed using Nu-Brite™ non-acid, alkaline-based cleaner to restore heat transfer performance. Indoor coil inspected and cleared of dust and debris.",
    },
    ChecklistItem {
        item: "System Component Testing",
        status: COMPLETED,
        notes: "Measured component resistance values (compressor, fan motors, etc.) using multimeter. All readings fall within manufacturer specifications.",
    },
    ChecklistItem {
        item: "System Power & Controls Check",
        status: COMPLETED,
        notes: "System energized and tested through thermostat. Verified safe operation and cycling through heating/cooling modes.",
    },
    ChecklistItem {
        item: "Valve Stem Maintenance",
        status: COMPLETED,
        notes: "LeakLock® sealant reapplied to refrigerant service valve stems and caps to ensure secure sealing and prevent refrigerant leakage.",
    },
    ChecklistItem {
        item: "Refrigerant Line Weatherproofing",
        status: COMPLETED,
        notes: "Inspected exterior wall penetration where refrigerant lines enter the building. Caulking and sealant are intact, with no signs of air or moisture infiltration.",
    },
];

pub static FURNACE_CHECKLIST: [ChecklistItem; 7] = [
    ChecklistItem {
        item: "Gas Valve & Burner Inspection",
        status: COMPLETED,
        notes: "Burners cleaned and visually inspected for proper flame pattern. Gas valve operation tested and confirmed within manufacturer's pressure specifications.",
    },
    ChecklistItem {
        item: "Heat Exchanger Inspection",
        status: COMPLETED,
        notes: "Primary and secondary heat exchangers inspected for cracks, corrosion, and blockages. No visible damage found; heat exchanger airflow verified.",
    },
    ChecklistItem {
        item: "Ignition System Test",
        status: COMPLETED,
        notes: "Verified ignition sequence, flame sensor response time, and safe shutdown. Sensor performance confirmed.",
    },
    ChecklistItem {
        item: "Flame Sensor Cleaning",
        status: COMPLETED,
        notes: "Flame sensor removed, cleaned, and reinstalled. Ensures reliable flame detection and proper furnace ignition.",
    },
    ChecklistItem {
        item: "Vent System & Combustion Air Check",
        status: COMPLETED,
        notes: "Inspected exhaust vent for proper slope, clearances, and obstructions. Confirmed combustion air source is unobstructed and meets code.",
    },
    ChecklistItem {
        item: "Blower Assembly Inspection",
        status: COMPLETED,
        notes: "Inspected and cleaned blower wheel. Motor amperage draw tested and confirmed within rated range. No imbalance or noise present.",
    },
    ChecklistItem {
        item: "Electrical & Control Wiring Check",
        status: COMPLETED,
        notes: "All low- and high-voltage connections inspected, tightened, and verified clean. Control board and safety circuits tested for reliable operation.",
    },
];

pub static CONDENSER_MAINTENANCE: BillingLineItem = BillingLineItem {
    code: "SER-89532",
    description: "Routine Condenser Maintenance",
    unit: "Each",
    price_cents: 9999,
};

pub static FURNACE_MAINTENANCE: BillingLineItem = BillingLineItem {
    code: "SER-28739",
    description: "Routine Furnace Maintenance",
    unit: "Each",
    price_cents: 9999,
};

/// Bundled price for a visit that covers both units.
pub static SYSTEM_MAINTENANCE: BillingLineItem = BillingLineItem {
    code: "SER-36573",
    description: "Routine System Maintenance",
    unit: "Each",
    price_cents: 19999,
};

pub fn checklist_for_equipment(kind: EquipmentKind) -> &'static [ChecklistItem] {
    match kind {
        EquipmentKind::Condenser => &CONDENSER_CHECKLIST,
        EquipmentKind::Furnace => &FURNACE_CHECKLIST,
    }
}

/// Checklist describing the whole job.
pub fn checklist_for(service_type: ServiceType) -> Vec<ChecklistItem> {
    match service_type {
        ServiceType::CondenserOnly => CONDENSER_CHECKLIST.to_vec(),
        ServiceType::FurnaceOnly => FURNACE_CHECKLIST.to_vec(),
        ServiceType::CondenserAndFurnace => CONDENSER_CHECKLIST
            .iter()
            .chain(FURNACE_CHECKLIST.iter())
            .copied()
            .collect(),
        ServiceType::Unrecognized => Vec::new(),
    }
}

/// Billable lines for a visit. A combined visit bills one bundled line,
/// never the two single-unit lines.
pub fn billing_line_items_for(service_type: ServiceType) -> Vec<BillingLineItem> {
    match service_type {
        ServiceType::CondenserOnly => vec![CONDENSER_MAINTENANCE],
        ServiceType::FurnaceOnly => vec![FURNACE_MAINTENANCE],
        ServiceType::CondenserAndFurnace => vec![SYSTEM_MAINTENANCE],
        ServiceType::Unrecognized => Vec::new(),
    }
}
