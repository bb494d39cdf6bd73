//! Configuration module for portal-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub run_migrations: bool,
    pub database: DatabaseConfig,
    pub renderer: RendererConfig,
    pub sharing: SharingConfig,
    pub company: CompanyConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Chromium or Chrome executable, resolved through `PATH` when bare.
    pub chrome_path: String,
    pub timeout_secs: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            chrome_path: "chromium".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SharingConfig {
    pub public_base_url: String,
}

/// Branding printed on pages and certificates.
#[derive(Debug, Clone)]
pub struct CompanyConfig {
    pub name: String,
    pub short_name: String,
    pub tagline: String,
    pub support_phone: String,
    pub support_email: String,
    /// Printed on certificates exported from the report page.
    pub default_technician: Option<String>,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Comfort Hub Inc".to_string(),
            short_name: "Comfort Hub".to_string(),
            tagline: "Daikin Comfort Pro".to_string(),
            support_phone: "613-581-1770".to_string(),
            support_email: "support@comforthub.ca".to_string(),
            default_technician: None,
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let company = CompanyConfig::default();
        let renderer = RendererConfig::default();

        Ok(Self {
            service_name: var_or("SERVICE_NAME", "portal-service"),
            service_version: var_or("SERVICE_VERSION", env!("CARGO_PKG_VERSION")),
            log_level: var_or("LOG_LEVEL", "info"),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            run_migrations: parsed_or("RUN_MIGRATIONS", true),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required"))
                })?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 10),
                min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", 2),
            },
            renderer: RendererConfig {
                chrome_path: var_or("CHROME_PATH", &renderer.chrome_path),
                timeout_secs: parsed_or("PDF_RENDER_TIMEOUT_SECS", renderer.timeout_secs),
            },
            sharing: SharingConfig {
                public_base_url: var_or(
                    "PUBLIC_BASE_URL",
                    &format!("http://localhost:{}", common.port),
                ),
            },
            company: CompanyConfig {
                name: var_or("COMPANY_NAME", &company.name),
                short_name: var_or("COMPANY_SHORT_NAME", &company.short_name),
                tagline: var_or("COMPANY_TAGLINE", &company.tagline),
                support_phone: var_or("SUPPORT_PHONE", &company.support_phone),
                support_email: var_or("SUPPORT_EMAIL", &company.support_email),
                default_technician: env::var("DEFAULT_TECHNICIAN")
                    .ok()
                    .filter(|s| !s.is_empty()),
            },
            common,
        })
    }
}
