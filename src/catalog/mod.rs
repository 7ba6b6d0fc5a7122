//! # Catalog — Portfolio Content from JSON Documents
//!
//! All site content lives in three JSON files under the data directory:
//!
//! | File | Type | Default |
//! |------|------|---------|
//! | `projects.json` | `[Project]` | `[]` |
//! | `project_details.json` | `[ProjectDetail]` | `[]` |
//! | `site_data.json` | `SiteData` | `{}` |
//!
//! Files are re-read on every request; there is no writer, so concurrent
//! readers need no coordination. A missing or corrupt file degrades to its
//! default rather than failing the request.
//!
//! ## Module Structure
//!
//! - [`loader`] — `try_load` / `load_or`
//! - [`types`] — typed records and the merged detail view
//! - [`merge`] — base + detail lookup and overlay
//! - [`featured`] — homepage featured selection

mod featured;
mod loader;
mod merge;
mod types;

pub use featured::*;
pub use loader::*;
pub use merge::*;
pub use types::*;

use std::path::{Path, PathBuf};

pub const PROJECTS_FILE: &str = "projects.json";
pub const PROJECT_DETAILS_FILE: &str = "project_details.json";
pub const SITE_DATA_FILE: &str = "site_data.json";

/// Read-only view over the data directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects_path: PathBuf,
    details_path: PathBuf,
    site_data_path: PathBuf,
}

/// Result of strictly loading one document, for `portfolio check`.
#[derive(Debug)]
pub struct DocumentReport {
    pub file: &'static str,
    pub outcome: Result<usize, LoadError>,
}

impl Catalog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            projects_path: data_dir.join(PROJECTS_FILE),
            details_path: data_dir.join(PROJECT_DETAILS_FILE),
            site_data_path: data_dir.join(SITE_DATA_FILE),
        }
    }

    pub fn projects(&self) -> Vec<Project> {
        load_or(&self.projects_path, Vec::new())
    }

    pub fn project_details(&self) -> Vec<ProjectDetail> {
        load_or(&self.details_path, Vec::new())
    }

    pub fn site_data(&self) -> SiteData {
        load_or(&self.site_data_path, SiteData::default())
    }

    /// Merged detail view for `id`, or `None` if no base record has that id.
    pub fn get_project(&self, id: &str) -> Option<MergedProject> {
        let projects = self.projects();
        let details = self.project_details();
        lookup_merged(&projects, &details, id)
    }

    /// Strict-load every document and report entry counts or the failure.
    ///
    /// For `site_data.json` the count is the number of top-level keys.
    pub fn check(&self) -> Vec<DocumentReport> {
        vec![
            DocumentReport {
                file: PROJECTS_FILE,
                outcome: try_load::<Vec<Project>>(&self.projects_path).map(|v| v.len()),
            },
            DocumentReport {
                file: PROJECT_DETAILS_FILE,
                outcome: try_load::<Vec<ProjectDetail>>(&self.details_path).map(|v| v.len()),
            },
            DocumentReport {
                file: SITE_DATA_FILE,
                outcome: try_load::<serde_json::Map<String, serde_json::Value>>(
                    &self.site_data_path,
                )
                .and_then(|map| {
                    serde_json::from_value::<SiteData>(serde_json::Value::Object(map.clone()))
                        .map(|_| map.len())
                        .map_err(|source| LoadError::Parse {
                            path: self.site_data_path.clone(),
                            source,
                        })
                }),
            },
        ]
    }
}
