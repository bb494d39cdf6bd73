use crate::config::CompanyConfig;
use crate::dtos::{CertificateData, GeneratePdfRequest};
use crate::services::{record_error, record_pdf_rendered, PortalError};
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use std::time::Instant;

#[derive(Template)]
#[template(path = "certificate.html")]
pub struct CertificateTemplate<'a> {
    pub data: &'a CertificateData,
    pub company: &'a CompanyConfig,
}

pub async fn generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePdfRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        record_error("validation");
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    })?;

    let data = request.validate().map_err(|e| {
        tracing::warn!(error = %e, "Rejected PDF export request");
        record_error(e.kind());
        e
    })?;

    let html = CertificateTemplate {
        data: &data,
        company: &state.config.company,
    }
    .render()
    .map_err(PortalError::from)?;

    let started = Instant::now();
    let rendered = state.renderer.render(&html).await;
    let elapsed = started.elapsed().as_secs_f64();

    let pdf = match rendered {
        Ok(pdf) => {
            record_pdf_rendered("success", elapsed);
            pdf
        }
        Err(e) => {
            tracing::error!(error = %e, elapsed_secs = elapsed, "Error generating PDF");
            record_pdf_rendered("failure", elapsed);
            record_error(e.kind());
            return Err(e.into());
        }
    };

    tracing::info!(
        size = pdf.len(),
        equipment = data.equipment.len(),
        elapsed_secs = elapsed,
        "Certificate rendered"
    );

    let disposition = format!("attachment; filename=\"{}\"", request.download_filename());
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Invalid filename header: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    ))
}
