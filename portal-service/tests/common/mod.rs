//! Common test utilities for portal-service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use portal_service::config::{
    CompanyConfig, DatabaseConfig, PortalConfig, RendererConfig, SharingConfig,
};
use portal_service::models::{RawCustomer, RawEquipment, RawRecord};
use portal_service::services::{init_metrics, PdfRenderer, PortalError, RecordStore};
use portal_service::startup::{build_router, AppState};
use service_core::config::Config as CommonConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tower::util::ServiceExt;
use uuid::Uuid;

static INIT: Once = Once::new();

pub const TOKEN: &str = "share-abc123";
pub const PUBLIC_BASE_URL: &str = "https://portal.example.test";

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,portal_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn test_config(database_url: String) -> PortalConfig {
    PortalConfig {
        common: CommonConfig {
            port: 0,
            ..CommonConfig::default()
        },
        service_name: "portal-service-test".to_string(),
        service_version: "test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        run_migrations: false,
        database: DatabaseConfig {
            url: database_url,
            max_connections: 2,
            min_connections: 1,
        },
        renderer: RendererConfig::default(),
        sharing: SharingConfig {
            public_base_url: PUBLIC_BASE_URL.to_string(),
        },
        company: CompanyConfig::default(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Combined visit for Jane Doe with a condenser and a furnace.
pub fn sample_record() -> RawRecord {
    RawRecord {
        id: Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000001").expect("valid uuid"),
        service_date: date(2024, 1, 31),
        service_type: "condenser+furnace".to_string(),
        customer: Some(RawCustomer {
            name: Some("Jane Doe".to_string()),
            address: Some("12 Elm St, Ottawa".to_string()),
            phone: Some("613-555-0100".to_string()),
            email: None,
        }),
        equipment: vec![
            RawEquipment {
                id: Uuid::new_v4(),
                equipment_type: "condenser".to_string(),
                model: "DX16TC".to_string(),
                serial_number: "C-1001".to_string(),
                installation_date: Some(date(2020, 5, 1)),
                warranty_expires: None,
            },
            RawEquipment {
                id: Uuid::new_v4(),
                equipment_type: "furnace".to_string(),
                model: "DM96VC".to_string(),
                serial_number: "F-2002".to_string(),
                installation_date: Some(date(2020, 5, 1)),
                warranty_expires: Some(date(2030, 5, 1)),
            },
        ],
    }
}

/// The sample record with every equipment row removed.
pub fn record_without_equipment() -> RawRecord {
    RawRecord {
        equipment: Vec::new(),
        ..sample_record()
    }
}

/// Record store backed by a map, counting lookups.
#[derive(Default)]
pub struct InMemoryStore {
    records: HashMap<String, RawRecord>,
    failing: bool,
    lookups: AtomicUsize,
}

impl InMemoryStore {
    pub fn with_record(token: &str, record: RawRecord) -> Self {
        let mut records = HashMap::new();
        records.insert(token.to_string(), record);
        Self {
            records,
            ..Self::default()
        }
    }

    /// A store whose every call fails like an unreachable database.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_by_sharing_token(&self, token: &str) -> Result<Option<RawRecord>, PortalError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(PortalError::StoreUnavailable(anyhow::anyhow!(
                "connection refused"
            )));
        }
        Ok(self.records.get(token).cloned())
    }

    async fn health_check(&self) -> Result<(), PortalError> {
        if self.failing {
            return Err(PortalError::StoreUnavailable(anyhow::anyhow!(
                "connection refused"
            )));
        }
        Ok(())
    }
}

/// Renderer that returns a fixed document and keeps the last HTML it saw.
#[derive(Default)]
pub struct CountingRenderer {
    failing: bool,
    calls: AtomicUsize,
    last_html: std::sync::Mutex<Option<String>>,
}

impl CountingRenderer {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_html(&self) -> Option<String> {
        self.last_html.lock().expect("lock poisoned").clone()
    }
}

pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n%fake\n";

#[async_trait]
impl PdfRenderer for CountingRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PortalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_html.lock().expect("lock poisoned") = Some(html.to_string());
        if self.failing {
            return Err(PortalError::Render(anyhow::anyhow!("chromium exited with 1")));
        }
        Ok(FAKE_PDF.to_vec())
    }
}

/// Router wired to in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub renderer: Arc<CountingRenderer>,
}

impl TestApp {
    pub fn new(store: InMemoryStore, renderer: CountingRenderer) -> Self {
        Self::with_config(store, renderer, test_config("postgres://unused".to_string()))
    }

    pub fn with_config(
        store: InMemoryStore,
        renderer: CountingRenderer,
        config: PortalConfig,
    ) -> Self {
        init_tracing();
        init_metrics();

        let store = Arc::new(store);
        let renderer = Arc::new(renderer);
        let state = AppState {
            config,
            store: store.clone(),
            renderer: renderer.clone(),
        };

        Self {
            router: build_router(state),
            store,
            renderer,
        }
    }

    /// App holding `sample_record()` under `TOKEN`.
    pub fn with_sample() -> Self {
        Self::new(
            InMemoryStore::with_record(TOKEN, sample_record()),
            CountingRenderer::default(),
        )
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("Body is not UTF-8")
}
