//! Shared test helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use portfolio::config::{AppConfig, ResumeFile};
use portfolio::contact::{MailTransport, OutgoingMail};
use portfolio::web::{build_router, AppState};
use serde_json::json;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const RECIPIENT: &str = "owner@example.com";
pub const SECRET: &str = "integration-test-secret";

/// Mail transport that records instead of sending.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("smtp.example.com:587 connection refused");
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

fn write_json(dir: &Path, file: &str, value: serde_json::Value) {
    std::fs::write(dir.join(file), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// Temporary data directory with projects, details, site data, and a resume.
pub fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        dir.path(),
        "projects.json",
        json!([
            {"id": "atlas", "title": "Atlas", "description": "Map tiles", "featured": true},
            {"id": "beacon", "title": "Beacon", "description": "Status page"},
            {"id": "cipher", "title": "Cipher", "description": "Encryption toy", "featured": true},
            {"id": "delta", "title": "Delta", "description": "Diff viewer"}
        ]),
    );
    write_json(
        dir.path(),
        "project_details.json",
        json!([
            {"id": "atlas", "description": "Vector map tile server", "body": "First paragraph.\n\nSecond paragraph.",
             "github": "https://github.com/example/atlas"},
            {"id": "ghost", "title": "Ghost", "body": "Detail with no base record"}
        ]),
    );
    write_json(
        dir.path(),
        "site_data.json",
        json!({"name": "Jane Doe", "headline": "Backend engineer", "skills": ["Rust", "SQL"]}),
    );
    std::fs::create_dir_all(dir.path().join("files")).unwrap();
    std::fs::write(dir.path().join("files/resume.pdf"), b"%PDF-1.4 test resume").unwrap();
    dir
}

pub fn config_for(dir: &Path, secret: Option<&str>) -> AppConfig {
    let mut config = AppConfig::new(dir);
    config.resume = ResumeFile::new(
        dir.join("files/resume.pdf"),
        Some("jane-doe-resume.pdf".to_string()),
    );
    config.mail.recipient = Some(RECIPIENT.to_string());
    config.secret_key = secret.map(str::to_string);
    config
}

/// Router over `dir` with the given transport and optional CSRF secret.
pub fn build_test_app(
    dir: &Path,
    transport: Option<Arc<RecordingTransport>>,
    secret: Option<&str>,
) -> axum::Router {
    let config = config_for(dir, secret);
    let transport = transport.map(|t| t as Arc<dyn MailTransport>);
    let state = AppState::new(&config, transport);
    build_router(state, Some(&dir.join("files")))
}
