//! HTML pages, rendered with maud. All interpolation is escaped.

use crate::catalog::{MergedProject, Project, SiteData};
use maud::{html, Markup, DOCTYPE};

/// "Back" link on the project detail page, chosen by `?from=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackLink {
    pub href: &'static str,
    pub label: &'static str,
}

impl BackLink {
    pub fn from_referrer(from: Option<&str>) -> Self {
        match from {
            Some("home") => BackLink {
                href: "/#projects",
                label: "Back to Home",
            },
            Some("archive") => BackLink {
                href: "/projects",
                label: "Back to All Projects",
            },
            _ => BackLink {
                href: "/projects",
                label: "Back to Projects",
            },
        }
    }
}

fn project_href(id: &str, from: &str) -> String {
    format!("/project/{}?from={}", urlencoding::encode(id), from)
}

fn layout(title: &str, csrf_token: Option<&str>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(token) = csrf_token {
                    meta name="csrf-token" content=(token);
                }
                title { (title) }
                link rel="stylesheet" href="/static/css/style.css";
            }
            body {
                header.site-header {
                    nav {
                        a href="/" { "Home" }
                        a href="/projects" { "Projects" }
                        a href="/download-resume" { "Resume" }
                        a href="/#contact" { "Contact" }
                    }
                }
                main { (body) }
                script src="/static/js/main.js" defer {}
            }
        }
    }
}

fn project_card(project: &Project, from: &str) -> Markup {
    html! {
        article.project-card {
            @if let Some(image) = project.text("image") {
                img src=(image) alt=(project.title) loading="lazy";
            }
            h3 { a href=(project_href(project.id.as_str(), from)) { (project.title) } }
            @if !project.description.is_empty() {
                p { (project.description) }
            }
            @if !project.tags.is_empty() {
                ul.tags { @for tag in &project.tags { li { (tag) } } }
            }
        }
    }
}

fn paragraphs(text: &str) -> Markup {
    html! {
        @for para in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            p { (para) }
        }
    }
}

fn contact_form(csrf_token: Option<&str>) -> Markup {
    html! {
        section #contact {
            h2 { "Get in touch" }
            form.contact-form method="post" action="/contact" {
                @if let Some(token) = csrf_token {
                    input type="hidden" name="csrf_token" value=(token);
                }
                label { "Name" input type="text" name="name" required; }
                label { "Email" input type="email" name="email" required; }
                label { "Message" textarea name="message" rows="6" required {} }
                button type="submit" { "Send" }
                p.form-status role="status" {}
            }
        }
    }
}

pub fn home(
    site: &SiteData,
    projects: &[Project],
    featured: &[&Project],
    csrf_token: Option<&str>,
) -> Markup {
    let name = site.name.as_deref().unwrap_or("Portfolio");
    let body = html! {
        section.hero {
            h1 { (name) }
            @if let Some(headline) = &site.headline { p.headline { (headline) } }
            @if let Some(location) = &site.location { p.location { (location) } }
            a.button href="/download-resume" { "Download resume" }
        }
        @if !featured.is_empty() {
            section.featured {
                h2 { "Featured work" }
                @for project in featured { (project_card(project, "home")) }
            }
        }
        @if site.about.is_some() || !site.skills.is_empty() {
            section #about {
                h2 { "About" }
                @if let Some(about) = &site.about { (paragraphs(about)) }
                @if !site.skills.is_empty() {
                    ul.skills { @for skill in &site.skills { li { (skill) } } }
                }
            }
        }
        section #projects {
            h2 { "Projects" }
            @if projects.is_empty() {
                p.empty { "Projects coming soon." }
            } @else {
                @for project in projects { (project_card(project, "home")) }
            }
            a href="/projects" { "View all projects" }
        }
        (contact_form(csrf_token))
        @if !site.links.is_empty() || site.email.is_some() {
            footer.links {
                @if let Some(email) = &site.email {
                    a href=(format!("mailto:{email}")) { (email) }
                }
                @for link in &site.links {
                    a href=(link.url) rel="noopener" { (link.label) }
                }
            }
        }
    };
    layout(name, csrf_token, body)
}

pub fn projects_page(projects: &[Project]) -> Markup {
    let body = html! {
        h1 { "All Projects" }
        @if projects.is_empty() {
            p.empty { "No projects yet." }
        } @else {
            div.project-grid {
                @for project in projects { (project_card(project, "archive")) }
            }
        }
    };
    layout("Projects", None, body)
}

pub fn project_detail(project: &MergedProject, back: BackLink) -> Markup {
    let body = html! {
        a.back href=(back.href) { "← " (back.label) }
        article.project-detail {
            h1 { (project.title()) }
            @if let Some(description) = project.text("description") {
                p.lead { (description) }
            }
            @if let Some(image) = project.text("image") {
                img.cover src=(image) alt=(project.title());
            }
            @if let Some(body) = project.text("body").or(project.text("content")) {
                (paragraphs(body))
            }
            @let features = project.list("features");
            @if !features.is_empty() {
                h2 { "Highlights" }
                ul { @for item in &features { li { (item) } } }
            }
            @let tech = [project.list("tech"), project.list("tags")].concat();
            @if !tech.is_empty() {
                ul.tags { @for item in &tech { li { (item) } } }
            }
            @let gallery = project.list("gallery");
            @if !gallery.is_empty() {
                div.gallery {
                    @for src in &gallery { img src=(src) alt=(project.title()) loading="lazy"; }
                }
            }
            div.project-links {
                @if let Some(url) = project.text("github") {
                    a href=(url) rel="noopener" { "Source" }
                }
                @if let Some(url) = project.text("demo") {
                    a href=(url) rel="noopener" { "Live demo" }
                }
            }
        }
    };
    layout(project.title(), None, body)
}

pub fn not_found() -> Markup {
    layout(
        "Not found",
        None,
        html! {
            h1 { "Page not found" }
            p { "The page you are looking for does not exist." }
            a href="/" { "Go home" }
        },
    )
}
