pub mod avatar;
pub mod collaborators;
pub mod config;
pub mod errors;
pub mod icons;
pub mod models;
pub mod skills;
pub mod sources;
pub mod statuses;
pub mod svg;
