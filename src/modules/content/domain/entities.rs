use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//
// ──────────────────────────────────────────────────────────
// Collections
// ──────────────────────────────────────────────────────────
//

/// Durable collections of portfolio content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Projects,
    Skills,
    Achievements,
    Categories,
    Settings,
}

/// How records of a list collection are ordered when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOrder {
    /// New records are prepended (most recent first).
    NewestFirst,
    /// New records are appended (insertion order).
    InsertionOrder,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Projects,
        Collection::Skills,
        Collection::Achievements,
        Collection::Categories,
        Collection::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Skills => "skills",
            Collection::Achievements => "achievements",
            Collection::Categories => "categories",
            Collection::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    pub fn read_order(&self) -> ReadOrder {
        match self {
            Collection::Projects | Collection::Achievements => ReadOrder::NewestFirst,
            _ => ReadOrder::InsertionOrder,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ──────────────────────────────────────────────────────────
// Entities
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[schema(example = "1760860800000")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered technology tags
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Optional context label, e.g. the hackathon a project was built for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub image: String,
}

/// A skill keyed by its name. `category` is an open key: a value that matches
/// no known [`Category`] is legal and simply renders ungrouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Skill {
    #[schema(example = "Rust")]
    pub name: String,
    #[schema(example = "programming")]
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Hackathon,
    Certification,
    Award,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub issuer: String,
    /// Free text, e.g. "Jan 2025"
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub image: String,
    /// Verification link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub category: AchievementCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[schema(example = "ai-ml")]
    pub key: String,
    #[schema(example = "AI / ML")]
    pub label: String,
}

/// Site-wide settings singleton. Never created or destroyed, only patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub video_url: String,
    pub resume_url: String,
    pub resume_download_url: String,
    #[schema(example = "17 100% 55%")]
    pub accent_color: String,
    pub show_video: bool,
}

/// Merge patch for [`Settings`]; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_video: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self == &SettingsPatch::default()
    }

    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(v) = &self.video_url {
            settings.video_url = v.clone();
        }
        if let Some(v) = &self.resume_url {
            settings.resume_url = v.clone();
        }
        if let Some(v) = &self.resume_download_url {
            settings.resume_download_url = v.clone();
        }
        if let Some(v) = &self.accent_color {
            settings.accent_color = v.clone();
        }
        if let Some(v) = self.show_video {
            settings.show_video = v;
        }
    }
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        Self {
            video_url: Some(settings.video_url),
            resume_url: Some(settings.resume_url),
            resume_download_url: Some(settings.resume_download_url),
            accent_color: Some(settings.accent_color),
            show_video: Some(settings.show_video),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Keyed records
// ──────────────────────────────────────────────────────────
//

/// Identity of a record inside its collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Project {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Skill {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for Achievement {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> &str {
        &self.key
    }
}

/// One independently keyed record of a list collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRecord {
    Project(Project),
    Skill(Skill),
    Achievement(Achievement),
    Category(Category),
}

impl EntityRecord {
    pub fn collection(&self) -> Collection {
        match self {
            EntityRecord::Project(_) => Collection::Projects,
            EntityRecord::Skill(_) => Collection::Skills,
            EntityRecord::Achievement(_) => Collection::Achievements,
            EntityRecord::Category(_) => Collection::Categories,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            EntityRecord::Project(p) => p.key(),
            EntityRecord::Skill(s) => s.key(),
            EntityRecord::Achievement(a) => a.key(),
            EntityRecord::Category(c) => c.key(),
        }
    }

    /// The record payload without the collection tag.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            EntityRecord::Project(p) => serde_json::to_value(p),
            EntityRecord::Skill(s) => serde_json::to_value(s),
            EntityRecord::Achievement(a) => serde_json::to_value(a),
            EntityRecord::Category(c) => serde_json::to_value(c),
        }
    }

    /// Rebuilds a record from a stored payload. `Settings` is not a keyed collection.
    pub fn from_value(
        collection: Collection,
        value: serde_json::Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        let record = match collection {
            Collection::Projects => Some(EntityRecord::Project(serde_json::from_value(value)?)),
            Collection::Skills => Some(EntityRecord::Skill(serde_json::from_value(value)?)),
            Collection::Achievements => {
                Some(EntityRecord::Achievement(serde_json::from_value(value)?))
            }
            Collection::Categories => Some(EntityRecord::Category(serde_json::from_value(value)?)),
            Collection::Settings => None,
        };
        Ok(record)
    }
}

//
// ──────────────────────────────────────────────────────────
// Aggregates
// ──────────────────────────────────────────────────────────
//

/// Durable snapshot returned by a persistence adapter.
///
/// `settings` is `None` when the singleton was never stored; `seeded` lists the
/// collections whose one-time default seeding has already happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSnapshot {
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub achievements: Vec<Achievement>,
    pub categories: Vec<Category>,
    pub settings: Option<Settings>,
    pub seeded: BTreeSet<Collection>,
}

impl ContentSnapshot {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.skills.is_empty()
            && self.achievements.is_empty()
            && self.categories.is_empty()
            && self.settings.is_none()
    }

    pub fn is_collection_empty(&self, collection: Collection) -> bool {
        match collection {
            Collection::Projects => self.projects.is_empty(),
            Collection::Skills => self.skills.is_empty(),
            Collection::Achievements => self.achievements.is_empty(),
            Collection::Categories => self.categories.is_empty(),
            Collection::Settings => self.settings.is_none(),
        }
    }

    /// Groups keyed records into a snapshot, keeping the given order.
    pub fn push_record(&mut self, record: EntityRecord) {
        match record {
            EntityRecord::Project(p) => self.projects.push(p),
            EntityRecord::Skill(s) => self.skills.push(s),
            EntityRecord::Achievement(a) => self.achievements.push(a),
            EntityRecord::Category(c) => self.categories.push(c),
        }
    }

    /// Inserts or replaces a record by key. A replaced record keeps its place;
    /// a new one goes where its collection's read order puts new records.
    pub fn upsert(&mut self, record: EntityRecord) {
        let order = record.collection().read_order();
        match record {
            EntityRecord::Project(p) => upsert_keyed(&mut self.projects, p, order),
            EntityRecord::Skill(s) => upsert_keyed(&mut self.skills, s, order),
            EntityRecord::Achievement(a) => upsert_keyed(&mut self.achievements, a, order),
            EntityRecord::Category(c) => upsert_keyed(&mut self.categories, c, order),
        }
    }

    /// Removes the record with `key`. Returns whether one was present.
    pub fn remove(&mut self, collection: Collection, key: &str) -> bool {
        match collection {
            Collection::Projects => remove_keyed(&mut self.projects, key),
            Collection::Skills => remove_keyed(&mut self.skills, key),
            Collection::Achievements => remove_keyed(&mut self.achievements, key),
            Collection::Categories => remove_keyed(&mut self.categories, key),
            Collection::Settings => false,
        }
    }
}

fn upsert_keyed<T: Keyed>(items: &mut Vec<T>, item: T, order: ReadOrder) {
    match items.iter().position(|existing| existing.key() == item.key()) {
        Some(index) => items[index] = item,
        None if order == ReadOrder::NewestFirst => items.insert(0, item),
        None => items.push(item),
    }
}

fn remove_keyed<T: Keyed>(items: &mut Vec<T>, key: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.key() != key);
    items.len() != before
}

/// The readable content served to consumer views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PortfolioContent {
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub achievements: Vec<Achievement>,
    pub categories: Vec<Category>,
    pub settings: Settings,
}

impl PortfolioContent {
    pub fn has_project(&self, id: &str) -> bool {
        self.projects.iter().any(|p| p.id == id)
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s.name == name)
    }

    pub fn has_category(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c.key == key)
    }
}
