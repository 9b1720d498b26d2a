//! CLI Commands

pub mod info;
pub mod local;
pub mod settings;
pub mod updates;
