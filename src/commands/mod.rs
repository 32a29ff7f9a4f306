//! Command implementations for the Bart CLI

pub mod allocate;
pub mod completions;
pub mod config;
pub mod deallocate;
pub mod helpers;
pub mod import;
pub mod list;
pub mod package;
pub mod update_asset;
pub mod validate;
pub mod version;
