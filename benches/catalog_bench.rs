use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portfolio::catalog::{lookup_merged, select_featured, Project, ProjectDetail};

fn sample_projects(n: usize) -> Vec<Project> {
    (0..n)
        .map(|i| Project::new(format!("project-{i}"), format!("Project {i}")).with_featured(i % 7 == 0))
        .collect()
}

fn sample_details(n: usize) -> Vec<ProjectDetail> {
    let raw: Vec<serde_json::Value> = (0..n)
        .map(|i| serde_json::json!({"id": format!("project-{i}"), "body": "Long form text.", "gallery": ["a.png", "b.png"]}))
        .collect();
    serde_json::from_value(serde_json::Value::Array(raw)).unwrap()
}

fn bench_select_featured(c: &mut Criterion) {
    let projects = sample_projects(200);
    c.bench_function("select_featured(200)", |b| {
        b.iter(|| select_featured(black_box(&projects)));
    });
}

fn bench_lookup_merged(c: &mut Criterion) {
    let projects = sample_projects(200);
    let details = sample_details(200);
    c.bench_function("lookup_merged(last of 200)", |b| {
        b.iter(|| lookup_merged(black_box(&projects), black_box(&details), "project-199"));
    });
}

fn bench_parse_projects(c: &mut Criterion) {
    let raw = serde_json::to_string(&sample_projects(200)).unwrap();
    c.bench_function("parse projects.json (200)", |b| {
        b.iter(|| serde_json::from_str::<Vec<Project>>(black_box(&raw)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_select_featured,
    bench_lookup_merged,
    bench_parse_projects
);
criterion_main!(benches);
