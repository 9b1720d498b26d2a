// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! MRepo Core Library
//!
//! State and update resolution for a module manager: modules installed on
//! the device, modules offered by online repositories, and the update
//! entries those repositories publish for each module.

pub mod detail;
pub mod module;
pub mod repository;
pub mod settings;
pub mod update;

pub use detail::{download_file_name, DetailState, DetailStatus, DownloadRequest, ModuleDetail};
pub use module::{parse_module_prop, LocalModule, ModuleState, OnlineModule, PropError};
pub use repository::{LocalRepository, MemoryRepository, Repo, RepoIndex};
pub use settings::{about_label, SettingsError, SettingsStore, UserData, WorkingMode};
pub use update::{
    merge_updates, FetchConfig, FetchError, HttpUpdateFetcher, MockUpdateFetcher, ModuleUpdate,
    ModuleUpdateItem, UpdateFetcher, UpdateReport, UpdateResolver,
};
