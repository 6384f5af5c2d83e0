pub mod backups;
pub mod console;
pub mod context;
pub mod model;
pub mod navigator;
pub mod reset_mode;
pub mod store;
pub mod vcs;
