//! Server-rendered report pages.

use crate::config::CompanyConfig;
use crate::dtos::GeneratePdfRequest;
use crate::handlers::documents::load_document;
use crate::models::ServiceDocumentView;
use crate::services::PortalError;
use crate::startup::AppState;
use crate::utils::share_url;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

pub struct ServiceTip {
    pub title: &'static str,
    pub content: &'static str,
}

pub static SERVICE_TIPS: [ServiceTip; 6] = [
    ServiceTip {
        title: "Filter Replacement",
        content: "A clean filter is your system's first line of defense. 5\" filters should be replaced every 8–12 months. 1\" filters should be replaced every 2–3 months. Regular replacement helps prevent airflow restriction, which can lead to blower motor failure.",
    },
    ServiceTip {
        title: "Outdoor Unit Maintenance",
        content: "During your annual service, we thoroughly clean the outdoor coil. Between visits, gently rinse the coil with a garden hose to remove debris. This helps maintain system efficiency.",
    },
    ServiceTip {
        title: "Check for Water Around the System",
        content: "When changing your filter, inspect for water or moisture around your furnace/air handler. Contact us immediately if noticed—this could indicate a drainage issue.",
    },
    ServiceTip {
        title: "Loss of Thermostat Power",
        content: "If your thermostat display is blank, check your breaker panel and ensure the furnace wall switch (often mistaken for a light switch) is on.",
    },
    ServiceTip {
        title: "Condensate Pump Care",
        content: "To prevent bacterial buildup, pour one capful of bleach into your condensate pump's reservoir once per year. This extends pump life and prevents blockages.",
    },
    ServiceTip {
        title: "Summer HRV Usage",
        content: "Running your HRV in the summer can bring in hot, humid air and reduce your system's efficiency. Unless required for specific ventilation needs, it's best to turn off or limit HRV use during warmer months.",
    },
];

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub doc: ServiceDocumentView,
    pub company: CompanyConfig,
    pub tips: &'static [ServiceTip],
    pub share_url: Option<String>,
    pub pdf_request_json: String,
    pub download_filename: String,
    pub year: i32,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: &'static str,
    pub message: &'static str,
    pub retry: bool,
    pub company: CompanyConfig,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub token: Option<String>,
}

/// JSON for an inline `<script>` block. `<` is escaped so no value can close
/// the element early.
fn script_json(request: &GeneratePdfRequest) -> String {
    serde_json::to_string(request)
        .map(|json| json.replace('<', "\\u003c"))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize export request");
            "{}".to_string()
        })
}

fn report(state: &AppState, doc: ServiceDocumentView, share_url: Option<String>) -> ReportTemplate {
    let request = GeneratePdfRequest::from_view(
        &doc,
        state.config.company.default_technician.as_deref(),
    );

    ReportTemplate {
        pdf_request_json: script_json(&request),
        download_filename: request.download_filename(),
        doc,
        company: state.config.company.clone(),
        tips: &SERVICE_TIPS,
        share_url,
        year: Utc::now().year(),
    }
}

fn error_page(state: &AppState, err: &PortalError) -> Response {
    let (status, message) = match err {
        PortalError::InvalidToken => (
            StatusCode::BAD_REQUEST,
            "No service document token provided. Please access this page with a valid token parameter.",
        ),
        PortalError::DocumentNotFound => (
            StatusCode::NOT_FOUND,
            "Failed to load service document. Please check the token and try again.",
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load service document. Please check the token and try again.",
        ),
    };

    let page = ErrorTemplate {
        title: "Error Loading Document",
        message,
        retry: true,
        company: state.config.company.clone(),
    };
    (status, page).into_response()
}

/// A record with no displayable equipment has nothing to report or export.
fn empty_page(state: &AppState) -> Response {
    let page = ErrorTemplate {
        title: "No Service Document Found",
        message: "The requested service document could not be found.",
        retry: false,
        company: state.config.company.clone(),
    };
    (StatusCode::NOT_FOUND, page).into_response()
}

/// `GET /service-document?token=...`, the report with download and share
/// actions.
pub async fn report_page(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let token = query.token.unwrap_or_default();

    match load_document(&state, &token, "report").await {
        Ok(doc) if doc.equipment.is_empty() => empty_page(&state),
        Ok(doc) => {
            let link = share_url(&state.config.sharing.public_base_url, token.trim());
            report(&state, doc, Some(link)).into_response()
        }
        Err(e) => error_page(&state, &e),
    }
}

/// `GET /shared/{token}`, the public copy of the report.
pub async fn shared_page(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    match load_document(&state, &token, "shared").await {
        Ok(doc) if doc.equipment.is_empty() => empty_page(&state),
        Ok(doc) => report(&state, doc, None).into_response(),
        Err(e) => error_page(&state, &e),
    }
}
