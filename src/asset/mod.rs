//! Asset packaging and validation
//!
//! An asset is a deployable zip bundle described by an `asset.properties`
//! manifest. This module validates the on-disk structure of a candidate
//! asset directory and assembles the distributable zip archive.

pub mod manifest;
pub mod package;
pub mod validate;
