//! Base + detail record merging for the project detail page.

use super::types::{MergedProject, Project, ProjectDetail};
use serde_json::{Map, Value};

/// First project whose id equals `id`. Duplicate ids are a data error; the
/// earliest entry wins.
pub fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == *id)
}

/// Base record as a JSON object holding only the keys that carry a value.
///
/// Typed fields that are empty (or `false` for `featured`) read the same as a
/// missing key, so they are left out rather than invented.
fn base_fields(base: &Project) -> Map<String, Value> {
    let mut fields = base.extra.clone();
    fields.insert("id".to_string(), Value::String(base.id.to_string()));
    if !base.title.is_empty() {
        fields.insert("title".to_string(), Value::String(base.title.clone()));
    }
    if !base.description.is_empty() {
        fields.insert(
            "description".to_string(),
            Value::String(base.description.clone()),
        );
    }
    if base.featured {
        fields.insert("featured".to_string(), Value::Bool(true));
    }
    if !base.tags.is_empty() {
        fields.insert(
            "tags".to_string(),
            Value::Array(base.tags.iter().cloned().map(Value::String).collect()),
        );
    }
    fields
}

/// Overlay `detail` onto `base`. Detail fields win on key collisions.
pub fn merge_project(base: &Project, detail: Option<&ProjectDetail>) -> MergedProject {
    let mut fields = base_fields(base);
    if let Some(detail) = detail {
        fields.insert("id".to_string(), Value::String(detail.id.to_string()));
        for (key, value) in &detail.fields {
            fields.insert(key.clone(), value.clone());
        }
    }
    MergedProject::from_fields(fields)
}

/// Look up `id` in both collections and merge.
///
/// Returns `None` when no base record matches, whether or not a detail record
/// exists for it.
pub fn lookup_merged(
    projects: &[Project],
    details: &[ProjectDetail],
    id: &str,
) -> Option<MergedProject> {
    let base = find_project(projects, id)?;
    let detail = details.iter().find(|d| d.id == *id);
    Some(merge_project(base, detail))
}
