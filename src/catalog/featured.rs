//! Homepage "featured" selection.
//!
//! Flagged projects come first in file order. When fewer than
//! [`FEATURED_LIMIT`] are flagged, the remaining slots are filled from the
//! full collection in file order, skipping anything already selected.

use super::types::Project;
use std::collections::HashSet;

/// Number of projects shown in the homepage hero section.
pub const FEATURED_LIMIT: usize = 3;

/// Pick up to [`FEATURED_LIMIT`] projects to highlight.
///
/// Pure function of input order and flags. Ids never repeat in the output and
/// entries with an empty id are never selected.
pub fn select_featured(projects: &[Project]) -> Vec<&Project> {
    // With three or more flagged projects the scan never reaches the
    // backfill half of the chain.
    let flagged = projects.iter().filter(|p| p.featured);
    let candidates = flagged.chain(projects.iter());

    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(FEATURED_LIMIT);
    for project in candidates {
        if project.id.is_empty() || !seen.insert(project.id.as_str()) {
            continue;
        }
        selected.push(project);
        if selected.len() == FEATURED_LIMIT {
            break;
        }
    }
    selected
}
