//! Runtime configuration, built once at startup from CLI flags and the
//! environment (`.env` is loaded first by `main`) and then shared read-only.

use std::path::{Path, PathBuf};

/// SMTP and contact-recipient settings (`MAIL_*` variables).
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub server: Option<String>,
    pub port: u16,
    pub use_tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub default_sender: Option<String>,
    pub recipient: Option<String>,
    pub timeout_secs: u64,
}

impl MailSettings {
    /// Address mail is sent from: the default sender, else the SMTP login.
    pub fn sender(&self) -> Option<&str> {
        self.default_sender
            .as_deref()
            .or(self.username.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            server: None,
            port: 587,
            use_tls: true,
            username: None,
            password: None,
            default_sender: None,
            recipient: None,
            timeout_secs: 10,
        }
    }
}

/// The resume PDF served by `GET /download-resume`.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub path: PathBuf,
    pub download_name: String,
}

impl ResumeFile {
    /// Use `download_name` if given, else the file name of `path`.
    pub fn new(path: PathBuf, download_name: Option<String>) -> Self {
        let download_name = download_name.unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "resume.pdf".to_string())
        });
        Self {
            path,
            download_name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub resume: ResumeFile,
    pub mail: MailSettings,
    /// Signing key for CSRF tokens; CSRF checks are off without one.
    pub secret_key: Option<String>,
}

impl AppConfig {
    /// Defaults rooted at `data_dir`, with no mail and no CSRF secret.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            static_dir: None,
            resume: ResumeFile::new(PathBuf::from("static/files/resume.pdf"), None),
            mail: MailSettings::default(),
            secret_key: None,
        }
    }
}

/// Parse a boolean environment flag the way `MAIL_USE_TLS=True` is written.
pub fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    ))
}

/// Treat empty strings from the environment as unset.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
