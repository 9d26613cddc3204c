//! Project card markup.

use std::fmt::Write;

use crate::project::Project;

const EXTERNAL_ICON: &str = r#"<path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6"></path><polyline points="15 3 21 3 21 9"></polyline><line x1="10" y1="14" x2="21" y2="3"></line>"#;

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// One `<article class="project">` for `project` at grid position `index`.
pub fn render_card(project: &Project, index: usize) -> String {
    let e = escape_html;
    let mut tags = String::new();
    for tag in &project.tags {
        let _ = write!(tags, r#"<span class="project-tag">{}</span>"#, e(tag));
    }

    format!(
        r#"<article class="project" data-index="{index}" data-category="{category}">
  <div class="project-image-wrap">
    <div class="project-image"><img src="{image}" alt="{title}" loading="lazy"></div>
    <div class="project-overlay"></div>
    <div class="project-icon"><svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">{icon}</svg></div>
  </div>
  <div class="project-content">
    <div>
      <div class="project-year">{year}</div>
      <h3 class="project-title">{title}</h3>
      <div class="project-subtitle">{subtitle}</div>
    </div>
    <div class="project-tech">{tech}</div>
    <p class="project-desc">{description}</p>
    <div class="project-tags">{tags}</div>
    <a href="{link}" target="_blank" rel="noopener noreferrer" class="project-link">VIEW FULL CASE STUDY <svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">{icon}</svg></a>
  </div>
</article>"#,
        category = e(&project.category),
        image = e(&project.image),
        title = e(&project.title),
        year = e(&project.year),
        subtitle = e(&project.subtitle),
        tech = e(&project.tech),
        description = e(&project.description),
        link = e(&project.link),
        icon = EXTERNAL_ICON,
    )
}

/// Markup for the whole grid. Replaces, never appends to, earlier output.
pub fn render_cards(projects: &[&Project]) -> String {
    projects
        .iter()
        .enumerate()
        .map(|(i, p)| render_card(p, i))
        .collect::<Vec<_>>()
        .join("\n")
}
