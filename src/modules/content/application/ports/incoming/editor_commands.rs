use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::content::domain::defaults::FALLBACK_IMAGE_URL;
use crate::modules::content::domain::entities::{
    Achievement, AchievementCategory, Category, Project, Skill,
};

//
// ──────────────────────────────────────────────────────────
// Raw editor forms
// ──────────────────────────────────────────────────────────
//

/// Project form as typed into the editor. Technologies are comma separated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectForm {
    #[schema(example = "Portfolio Sync")]
    pub title: String,
    pub description: String,
    #[schema(example = "Rust, Actix, Postgres")]
    pub technologies: String,
    pub github_url: String,
    pub live_url: String,
    pub context: String,
    /// Blank falls back to a stock image
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AchievementForm {
    pub title: String,
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    pub category: AchievementCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SkillForm {
    #[schema(example = "Rust")]
    pub name: String,
    #[schema(example = "programming")]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryForm {
    #[schema(example = "Systems Programming")]
    pub key: String,
    #[schema(example = "Systems")]
    pub label: String,
}

//
// ──────────────────────────────────────────────────────────
// Normalized commands
// ──────────────────────────────────────────────────────────
//

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn image_or_fallback(value: &str) -> String {
    optional(value).unwrap_or_else(|| FALLBACK_IMAGE_URL.to_string())
}

/// Splits a comma separated tag list into trimmed, non-empty tags.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercases a category key and collapses whitespace runs into `-`.
pub fn slugify_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A project without an id, normalized from an editor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    title: String,
    description: String,
    technologies: Vec<String>,
    github_url: Option<String>,
    live_url: Option<String>,
    context: Option<String>,
    image: String,
}

impl ProjectDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    pub fn into_project(self, id: String) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            technologies: self.technologies,
            github_url: self.github_url,
            live_url: self.live_url,
            context: self.context,
            image: self.image,
        }
    }
}

impl From<ProjectForm> for ProjectDraft {
    fn from(form: ProjectForm) -> Self {
        Self {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            technologies: split_technologies(&form.technologies),
            github_url: optional(&form.github_url),
            live_url: optional(&form.live_url),
            context: optional(&form.context),
            image: image_or_fallback(&form.image),
        }
    }
}

/// An achievement without an id, normalized from an editor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementDraft {
    title: String,
    issuer: String,
    date: String,
    description: Option<String>,
    image: String,
    link: Option<String>,
    category: AchievementCategory,
}

impl AchievementDraft {
    pub fn into_achievement(self, id: String) -> Achievement {
        Achievement {
            id,
            title: self.title,
            issuer: self.issuer,
            date: self.date,
            description: self.description,
            image: self.image,
            link: self.link,
            category: self.category,
        }
    }
}

impl From<AchievementForm> for AchievementDraft {
    fn from(form: AchievementForm) -> Self {
        Self {
            title: form.title.trim().to_string(),
            issuer: form.issuer.trim().to_string(),
            date: form.date.trim().to_string(),
            description: optional(&form.description),
            image: image_or_fallback(&form.image),
            link: optional(&form.link),
            category: form.category,
        }
    }
}

impl From<SkillForm> for Skill {
    fn from(form: SkillForm) -> Self {
        Skill {
            name: form.name.trim().to_string(),
            category: form.category.trim().to_string(),
        }
    }
}

impl From<CategoryForm> for Category {
    fn from(form: CategoryForm) -> Self {
        Category {
            key: slugify_key(&form.key),
            label: form.label.trim().to_string(),
        }
    }
}
