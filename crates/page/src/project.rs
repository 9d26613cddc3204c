use serde::{Deserialize, Serialize};

/// One portfolio entry. Static configuration, read-only at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub category: String,
    pub title: String,
    pub subtitle: String,
    pub year: String,
    /// One-line technical summary.
    pub tech: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `"all"` (any case, surrounding whitespace ignored) or empty input
    /// selects everything; anything else names a category.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(c) => c,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => project.category == *c,
        }
    }

    /// Class placed on the project container, e.g. `filter-design`.
    pub fn container_class(&self) -> String {
        format!("{FILTER_CLASS_PREFIX}{}", self.as_str())
    }

    /// Filter classes in `classes` that do not belong to this filter.
    pub fn stale_classes<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let keep = self.container_class();
        classes
            .into_iter()
            .filter(|c| c.starts_with(FILTER_CLASS_PREFIX) && *c != keep)
            .collect()
    }
}

pub const FILTER_CLASS_PREFIX: &str = "filter-";

/// Matching projects in their original order.
pub fn filter_projects<'a>(projects: &'a [Project], filter: &CategoryFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
pub(crate) fn sample(id: u32, category: &str, title: &str) -> Project {
    Project {
        id,
        category: category.to_string(),
        title: title.to_string(),
        subtitle: format!("{title} subtitle"),
        year: "2024".to_string(),
        tech: "Cycles, 512 samples".to_string(),
        description: format!("About {title}."),
        tags: vec!["Lighting".to_string(), "Materials".to_string()],
        image: format!("assets/{id}.jpg"),
        link: format!("https://example.com/{id}"),
    }
}
