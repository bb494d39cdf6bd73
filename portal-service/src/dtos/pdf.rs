use crate::models::ServiceDocumentView;
use crate::services::error::PortalError;
use crate::utils::sanitize_text;
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};

const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_DESCRIPTION: &str = "Routine Maintenance";
const DEFAULT_CODE: &str = "SER-00000";

/// Body of `POST /generate-pdf`. Everything is optional at the type level so
/// that validation can report exactly what is missing.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfRequest {
    pub document_number: Option<String>,
    pub service_date: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub customer: Option<CustomerInput>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub equipment: Option<Vec<EquipmentInput>>,
    pub service_description: Option<String>,
    pub service_code: Option<String>,
    #[serde(
        rename = "technician_name",
        alias = "technician",
        skip_serializing_if = "Option::is_none"
    )]
    pub technician_name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentInput {
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub installation_date: Option<String>,
    pub warranty_expires: Option<String>,
}

/// Sanitised certificate contents. Every string is already HTML-escaped.
#[derive(Debug, Clone)]
pub struct CertificateData {
    pub document_number: String,
    pub service_date: String,
    pub customer: CertificateCustomer,
    pub equipment: Vec<CertificateEquipment>,
    pub technician: String,
    pub service_description: String,
    pub service_code: String,
}

#[derive(Debug, Clone)]
pub struct CertificateCustomer {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct CertificateEquipment {
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub installation_date: String,
    pub warranty_expires: String,
}

#[derive(Debug, Serialize)]
pub struct ShareLinkResponse {
    pub url: String,
}

/// Reads `null`, `""` and `false` as an absent value so that validation can
/// name the field instead of failing the whole body.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn clean(value: Option<&str>) -> String {
    sanitize_text(value.unwrap_or_default())
}

fn clean_or(value: Option<&str>, fallback: &str) -> String {
    let value = value.filter(|v| !v.is_empty()).unwrap_or(fallback);
    sanitize_text(value)
}

impl CertificateEquipment {
    fn from_input(input: &EquipmentInput) -> Self {
        Self {
            name: clean(input.name.as_deref()),
            model: clean(input.model.as_deref()),
            serial_number: clean(input.serial_number.as_deref()),
            installation_date: clean_or(input.installation_date.as_deref(), NOT_AVAILABLE),
            warranty_expires: clean_or(input.warranty_expires.as_deref(), NOT_AVAILABLE),
        }
    }
}

impl GeneratePdfRequest {
    /// The export request the report page sends for `view`. The service
    /// line comes from the first invoice item; records carry no technician,
    /// so the caller supplies one.
    pub fn from_view(view: &ServiceDocumentView, technician: Option<&str>) -> Self {
        let (description, code) = view
            .primary_service()
            .map(|(d, c)| (Some(d.to_string()), Some(c.to_string())))
            .unwrap_or_default();

        Self {
            document_number: Some(view.document_number.clone()),
            service_date: Some(view.service_date.clone()),
            customer: Some(CustomerInput {
                name: Some(view.customer.name.clone()),
                address: Some(view.customer.address.clone()),
                phone: Some(view.customer.phone.clone()),
                email: Some(view.customer.email.clone()),
            }),
            equipment: Some(
                view.equipment
                    .iter()
                    .map(|unit| EquipmentInput {
                        name: Some(unit.name.to_string()),
                        model: Some(unit.model.clone()),
                        serial_number: Some(unit.serial_number.clone()),
                        installation_date: Some(unit.installation_date.clone()),
                        warranty_expires: Some(unit.warranty_expires.clone()),
                    })
                    .collect(),
            ),
            service_description: description,
            service_code: code,
            technician_name: technician.map(str::to_string),
        }
    }

    /// Validates in three steps and stops at the first failure: top-level
    /// fields, then customer name and address, then a non-empty equipment
    /// list.
    pub fn validate(&self) -> Result<CertificateData, PortalError> {
        let mut missing = Vec::new();
        if !present(&self.document_number) {
            missing.push("documentNumber");
        }
        if !present(&self.service_date) {
            missing.push("serviceDate");
        }
        if self.customer.is_none() {
            missing.push("customer");
        }
        if self.equipment.is_none() {
            missing.push("equipment");
        }
        if !missing.is_empty() {
            return Err(PortalError::MissingFields(missing));
        }

        let customer = match &self.customer {
            Some(c) if present(&c.name) && present(&c.address) => c,
            _ => return Err(PortalError::MissingCustomerData),
        };

        let equipment = match &self.equipment {
            Some(units) if !units.is_empty() => units,
            _ => return Err(PortalError::MissingEquipmentData),
        };

        Ok(CertificateData {
            document_number: clean(self.document_number.as_deref()),
            service_date: clean(self.service_date.as_deref()),
            customer: CertificateCustomer {
                name: clean(customer.name.as_deref()),
                address: clean(customer.address.as_deref()),
                phone: clean_or(customer.phone.as_deref(), NOT_AVAILABLE),
                email: clean_or(customer.email.as_deref(), NOT_AVAILABLE),
            },
            equipment: equipment.iter().map(CertificateEquipment::from_input).collect(),
            technician: clean_or(self.technician_name.as_deref(), NOT_AVAILABLE),
            service_description: clean_or(
                self.service_description.as_deref(),
                DEFAULT_DESCRIPTION,
            ),
            service_code: clean_or(self.service_code.as_deref(), DEFAULT_CODE),
        })
    }

    /// `service-document-{documentNumber}.pdf`, restricted to characters that
    /// are safe inside a quoted header parameter.
    pub fn download_filename(&self) -> String {
        let number: String = self
            .document_number
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            .collect();
        format!("service-document-{}.pdf", number)
    }
}
