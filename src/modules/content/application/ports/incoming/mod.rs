mod editor_commands;

pub use editor_commands::{
    slugify_key, split_technologies, AchievementDraft, AchievementForm, CategoryForm,
    ProjectDraft, ProjectForm, SkillForm,
};
