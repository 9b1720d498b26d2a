// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Property-Based Tests
//!
//! Properties of the manifest merge that should hold for all inputs.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use mrepo_core::{merge_updates, ModuleUpdate};

use super::common::{codes, item, manifest};

/// Strategy for a list of manifests: (timestamp, version codes) per repository
fn manifests_strategy() -> impl Strategy<Value = Vec<(u8, Vec<i32>)>> {
    prop::collection::vec(
        (0u8..8, prop::collection::vec(0i32..20, 0..6)),
        0..5,
    )
}

/// Build tagged manifests; entry versions encode "<repo>-<position>"
fn build(layout: &[(u8, Vec<i32>)]) -> Vec<ModuleUpdate> {
    layout.iter()
        .enumerate()
        .map(|(repo, (timestamp, version_codes))| {
            let versions = version_codes
                .iter()
                .enumerate()
                .map(|(pos, code)| item(*code, &format!("{}-{}", repo, pos)))
                .collect();
            let mut update = manifest(f64::from(*timestamp), versions);
            update.repo_url = format!("repo{}", repo);
            update
        })
        .collect()
}

proptest! {
    /// Property: version codes in the merged list are unique and descending
    #[test]
    fn prop_merge_unique_and_descending(layout in manifests_strategy()) {
        let merged = merge_updates(build(&layout));
        let merged_codes = codes(&merged);

        let unique: HashSet<i32> = merged_codes.iter().copied().collect();
        prop_assert_eq!(unique.len(), merged_codes.len());
        prop_assert!(merged_codes.windows(2).all(|w| w[0] > w[1]));
    }

    /// Property: the merged list covers every version code offered
    #[test]
    fn prop_merge_is_union_of_codes(layout in manifests_strategy()) {
        let expected: BTreeSet<i32> = layout.iter().flat_map(|(_, c)| c.iter().copied()).collect();
        let merged = merge_updates(build(&layout));
        let actual: BTreeSet<i32> = codes(&merged).into_iter().collect();

        prop_assert_eq!(actual, expected);
    }

    /// Property: a shared version code comes from the newest manifest,
    /// the earliest listed one on a timestamp tie, first entry within it
    #[test]
    fn prop_merge_newest_manifest_wins(layout in manifests_strategy()) {
        let merged = merge_updates(build(&layout));

        for entry in &merged {
            let (repo, pos) = layout
                .iter()
                .enumerate()
                .filter_map(|(repo, (ts, c))| {
                    c.iter().position(|code| *code == entry.version_code).map(|pos| (repo, *ts, pos))
                })
                .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
                .map(|(repo, _, pos)| (repo, pos))
                .unwrap();

            prop_assert_eq!(&entry.repo_url, &format!("repo{}", repo));
            prop_assert_eq!(&entry.version, &format!("{}-{}", repo, pos));
        }
    }

    /// Property: merging is deterministic
    #[test]
    fn prop_merge_deterministic(layout in manifests_strategy()) {
        prop_assert_eq!(merge_updates(build(&layout)), merge_updates(build(&layout)));
    }
}
