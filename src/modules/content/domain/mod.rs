pub mod defaults;
pub mod entities;
pub mod ids;
pub mod policies;
