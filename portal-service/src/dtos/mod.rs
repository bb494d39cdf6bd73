pub mod pdf;

pub use pdf::{
    CertificateCustomer, CertificateData, CertificateEquipment, CustomerInput, EquipmentInput,
    GeneratePdfRequest, ShareLinkResponse,
};
