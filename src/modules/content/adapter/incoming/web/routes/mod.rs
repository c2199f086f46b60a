mod add_category;
mod add_skill;
mod content_events;
mod create_achievement;
mod create_project;
mod delete_achievement;
mod delete_project;
mod delete_skill;
mod get_content;
mod update_achievement;
mod update_project;
mod update_settings;

// Glob re-exports keep the generated `__path_*` OpenAPI items reachable.
pub use add_category::*;
pub use add_skill::*;
pub use content_events::*;
pub use create_achievement::*;
pub use create_project::*;
pub use delete_achievement::*;
pub use delete_project::*;
pub use delete_skill::*;
pub use get_content::*;
pub use update_achievement::*;
pub use update_project::*;
pub use update_settings::*;
