pub mod content_records;
pub mod content_seed_markers;
pub mod site_settings;
