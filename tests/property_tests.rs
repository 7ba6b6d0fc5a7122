//! Property-based tests for the catalog and contact validation.
//!
//! ```bash
//! cargo test --test property_tests
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! Properties are named `prop_<function>_<invariant>`.

use portfolio::catalog::{
    lookup_merged, merge_project, select_featured, Project, ProjectDetail, ProjectId,
    FEATURED_LIMIT,
};
use portfolio::contact::{validate, ContactForm, ValidationError};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Small id alphabet so duplicates and collisions actually occur.
fn arb_projects() -> impl Strategy<Value = Vec<Project>> {
    prop::collection::vec(("[a-f]{0,2}", any::<bool>()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, featured)| Project::new(id.clone(), id.to_uppercase()).with_featured(featured))
            .collect()
    })
}

fn detail(id: &str, fields: &[(&str, Value)]) -> ProjectDetail {
    let mut map = Map::new();
    for (k, v) in fields {
        map.insert(k.to_string(), v.clone());
    }
    ProjectDetail {
        id: ProjectId::new(id),
        fields: map,
    }
}

// == Featured selector =========================================================

proptest! {
    #[test]
    fn prop_select_featured_is_bounded(projects in arb_projects()) {
        let selected = select_featured(&projects);
        let distinct: HashSet<&str> = projects
            .iter()
            .map(|p| p.id.as_str())
            .filter(|id| !id.is_empty())
            .collect();
        prop_assert_eq!(selected.len(), FEATURED_LIMIT.min(distinct.len()));
    }

    #[test]
    fn prop_select_featured_has_no_repeats(projects in arb_projects()) {
        let selected = select_featured(&projects);
        let ids: HashSet<&str> = selected.iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(ids.len(), selected.len());
        prop_assert!(!ids.contains(""));
    }

    #[test]
    fn prop_select_featured_prefers_flagged(projects in arb_projects()) {
        let selected = select_featured(&projects);
        // Once an unflagged project appears, no flagged one with a fresh id follows.
        if let Some(first_plain) = selected.iter().position(|p| !p.featured) {
            let seen: HashSet<&str> = selected[..first_plain].iter().map(|p| p.id.as_str()).collect();
            let remaining_flagged = projects
                .iter()
                .filter(|p| p.featured && !p.id.is_empty())
                .any(|p| !seen.contains(p.id.as_str()));
            prop_assert!(!remaining_flagged);
        }
    }

    #[test]
    fn prop_select_featured_is_deterministic(projects in arb_projects()) {
        let a: Vec<&str> = select_featured(&projects).iter().map(|p| p.id.as_str()).collect();
        let b: Vec<&str> = select_featured(&projects).iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(a, b);
    }
}

// == Project merger ============================================================

proptest! {
    #[test]
    fn prop_merge_project_is_right_biased(
        base_desc in "[a-z ]{0,20}",
        detail_desc in "[a-z ]{0,20}",
        extra in "[a-z]{1,10}",
    ) {
        let mut base = Project::new("p", "Title");
        base.description = base_desc;
        let d = detail("p", &[("description", json!(detail_desc.clone())), ("extra", json!(extra.clone()))]);

        let merged = merge_project(&base, Some(&d));
        prop_assert_eq!(merged.get("description"), Some(&json!(detail_desc)));
        prop_assert_eq!(merged.get("extra"), Some(&json!(extra)));
        prop_assert_eq!(merged.title(), "Title");
        prop_assert_eq!(merged.id(), "p");
    }

    #[test]
    fn prop_lookup_merged_requires_base(projects in arb_projects(), id in "[a-f]{1,2}") {
        let details = vec![detail(&id, &[("body", json!("text"))])];
        let found = lookup_merged(&projects, &details, &id);
        let has_base = projects.iter().any(|p| p.id.as_str() == id);
        prop_assert_eq!(found.is_some(), has_base);
    }
}

// == Contact validation ========================================================

proptest! {
    #[test]
    fn prop_validate_rejects_short_messages(message in "\\PC{0,9}") {
        let form = ContactForm::new("Jane", "jane@example.com", &message);
        prop_assert!(matches!(
            validate(&form),
            Err(ValidationError::EmptyField(_)) | Err(ValidationError::TooShort(_))
        ));
    }

    #[test]
    fn prop_validate_trims_accepted_fields(
        pad in "[ \t]{0,3}",
        message in "[a-z]{10,40}",
    ) {
        let form = ContactForm::new(
            &format!("{pad}Jane{pad}"),
            &format!("{pad}jane@example.com{pad}"),
            &format!("{pad}{message}{pad}"),
        );
        let ok = validate(&form).unwrap();
        prop_assert_eq!(ok.name, "Jane");
        prop_assert_eq!(ok.email, "jane@example.com");
        prop_assert_eq!(ok.message, message);
    }
}
