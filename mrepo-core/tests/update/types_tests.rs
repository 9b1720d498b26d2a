// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for update manifest types

use mrepo_core::ModuleUpdate;

#[test]
fn test_module_update_deserialize() {
    let json = r#"{
        "timestamp": 1676467862.244,
        "versions": [
            {
                "timestamp": 1676467862.0,
                "version": "v26.1",
                "versionCode": 26100,
                "zipUrl": "https://dl.example.org/magisk-v26.1.zip",
                "changelog": "https://dl.example.org/changelog.md"
            }
        ]
    }"#;

    let update: ModuleUpdate = serde_json::from_str(json).unwrap();
    assert_eq!(update.timestamp, 1676467862.244);
    assert_eq!(update.versions.len(), 1);
    assert!(update.repo_url.is_empty());

    let item = &update.versions[0];
    assert_eq!(item.version, "v26.1");
    assert_eq!(item.version_code, 26100);
    assert_eq!(item.zip_url, "https://dl.example.org/magisk-v26.1.zip");
}

#[test]
fn test_module_update_optional_fields_default() {
    let json = r#"{
        "timestamp": 1.0,
        "versions": [
            { "version": "v1", "versionCode": 1, "zipUrl": "https://x/1.zip" }
        ]
    }"#;

    let update: ModuleUpdate = serde_json::from_str(json).unwrap();
    let item = &update.versions[0];
    assert!(item.changelog.is_empty());
    assert!(item.repo_url.is_empty());
    assert_eq!(item.timestamp, 0.0);
}

#[test]
fn test_module_update_missing_versions_is_empty() {
    let update: ModuleUpdate = serde_json::from_str(r#"{"timestamp": 5.0}"#).unwrap();
    assert!(update.versions.is_empty());
}

#[test]
fn test_module_update_serializes_camel_case() {
    let update = ModuleUpdate {
        timestamp: 2.0,
        versions: vec![super::common::item(3, "v3")],
        repo_url: "https://repo.example.org".to_string(),
    };

    let json = serde_json::to_string(&update).unwrap();
    assert!(json.contains("\"versionCode\":3"));
    assert!(json.contains("\"zipUrl\""));
    assert!(json.contains("\"repoUrl\":\"https://repo.example.org\""));
}

#[test]
fn test_with_repo_url_overrides_document_value() {
    let json = r#"{"timestamp": 1.0, "repoUrl": "https://spoofed.example.org"}"#;
    let update: ModuleUpdate = serde_json::from_str(json).unwrap();

    let tagged = update.with_repo_url("https://real.example.org");
    assert_eq!(tagged.repo_url, "https://real.example.org");
}
