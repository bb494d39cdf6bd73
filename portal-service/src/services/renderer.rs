//! HTML to PDF rendering through a headless Chromium process.

use crate::config::RendererConfig;
use crate::services::error::PortalError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Renders a standalone HTML document to A4 PDF bytes.
    async fn render(&self, html: &str) -> Result<Vec<u8>, PortalError>;
}

#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    chrome_path: String,
    timeout: Duration,
}

impl ChromeRenderer {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            chrome_path: config.chrome_path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn args(scratch: &Path, html_path: &Path, pdf_path: &Path) -> Vec<String> {
        vec![
            "--headless=new".to_string(),
            "--no-sandbox".to_string(),
            "--disable-gpu".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--no-first-run".to_string(),
            "--no-pdf-header-footer".to_string(),
            format!("--user-data-dir={}", scratch.join("profile").display()),
            format!("--print-to-pdf={}", pdf_path.display()),
            format!("file://{}", html_path.display()),
        ]
    }
}

fn render_error(context: &str, err: impl std::fmt::Display) -> PortalError {
    PortalError::Render(anyhow::anyhow!("{}: {}", context, err))
}

#[async_trait]
impl PdfRenderer for ChromeRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PortalError> {
        // Removed on drop, whichever way this function returns.
        let scratch = tempfile::Builder::new()
            .prefix("portal-pdf-")
            .tempdir()
            .map_err(|e| render_error("Failed to create scratch directory", e))?;

        let html_path = scratch.path().join("certificate.html");
        let pdf_path = scratch.path().join("certificate.pdf");

        tokio::fs::write(&html_path, html)
            .await
            .map_err(|e| render_error("Failed to write certificate HTML", e))?;

        let args = Self::args(scratch.path(), &html_path, &pdf_path);

        let mut cmd = Command::new(&self.chrome_path);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            program = %self.chrome_path,
            timeout_secs = %self.timeout.as_secs(),
            "Launching headless renderer"
        );

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| PortalError::RenderTimeout(self.timeout.as_secs()))?
            .map_err(|e| render_error("Failed to launch renderer", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                program = %self.chrome_path,
                status = %output.status,
                stderr = %stderr,
                "Renderer exited with failure"
            );
            return Err(render_error("Renderer failed", output.status));
        }

        let pdf = tokio::fs::read(&pdf_path)
            .await
            .map_err(|e| render_error("Renderer produced no output", e))?;

        if !pdf.starts_with(b"%PDF") {
            return Err(PortalError::Render(anyhow::anyhow!(
                "Renderer output is not a PDF ({} bytes)",
                pdf.len()
            )));
        }

        tracing::debug!(size = pdf.len(), "Renderer succeeded");
        Ok(pdf)
    }
}
