//! Service type and equipment kind enumerations.

use serde::{Deserialize, Serialize};

/// Which equipment categories a visit covered.
///
/// Stored as free text; anything outside the three known values maps to
/// `Unrecognized` instead of failing, so catalog lookups stay total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    CondenserOnly,
    FurnaceOnly,
    CondenserAndFurnace,
    Unrecognized,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::CondenserOnly => "condenser_only",
            ServiceType::FurnaceOnly => "furnace_only",
            ServiceType::CondenserAndFurnace => "condenser+furnace",
            ServiceType::Unrecognized => "unrecognized",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "condenser_only" => ServiceType::CondenserOnly,
            "furnace_only" => ServiceType::FurnaceOnly,
            "condenser+furnace" => ServiceType::CondenserAndFurnace,
            _ => ServiceType::Unrecognized,
        }
    }

    /// Whether units of `kind` were part of this visit.
    pub fn covers(&self, kind: EquipmentKind) -> bool {
        matches!(
            (self, kind),
            (ServiceType::CondenserOnly, EquipmentKind::Condenser)
                | (ServiceType::FurnaceOnly, EquipmentKind::Furnace)
                | (ServiceType::CondenserAndFurnace, _)
        )
    }
}

/// Equipment discriminant stored on each equipment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    Condenser,
    Furnace,
}

impl EquipmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentKind::Condenser => "condenser",
            EquipmentKind::Furnace => "furnace",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "condenser" => Some(EquipmentKind::Condenser),
            "furnace" => Some(EquipmentKind::Furnace),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentKind::Condenser => "Condenser",
            EquipmentKind::Furnace => "Gas Furnace",
        }
    }

    pub fn warranty_program(&self) -> &'static str {
        match self {
            EquipmentKind::Condenser => "Comfort Hub Premium 10-Year",
            EquipmentKind::Furnace => "Daikin Furnace 10-Year Parts",
        }
    }
}
