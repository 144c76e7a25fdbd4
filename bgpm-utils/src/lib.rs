//! Utility library for the bgpm project

pub mod files;
pub mod fixtures;
pub mod other;
