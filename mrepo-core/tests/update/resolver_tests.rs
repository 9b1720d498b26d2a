// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for UpdateResolver
//!
//! Scenarios:
//! - Merge across repositories, newest manifest wins a shared version code
//! - One repository failing does not affect the others
//! - Every repository failing yields an empty list
//! - No repositories configured issues no fetch
//! - A stalled repository does not hold back fetches to the others

use std::sync::Arc;
use std::time::Duration;

use mrepo_core::{merge_updates, FetchError, MockUpdateFetcher, UpdateResolver};

use super::common::{codes, item, manifest};

const REPO_A: &str = "https://a.example.org";
const REPO_B: &str = "https://b.example.org";
const REPO_C: &str = "https://c.example.org";

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

#[tokio::test]
async fn test_two_repos_newest_manifest_wins() {
    let fetcher = MockUpdateFetcher::new()
        .with_update(REPO_A, manifest(100.0, vec![item(5, "a5"), item(7, "a7")]))
        .with_update(REPO_B, manifest(200.0, vec![item(7, "b7"), item(8, "b8")]));
    let resolver = UpdateResolver::new(Arc::new(fetcher));

    let items = resolver.resolve("m1", &urls(&[REPO_A, REPO_B])).await;

    assert_eq!(codes(&items), vec![8, 7, 5]);
    assert_eq!(items[0].repo_url, REPO_B);
    assert_eq!(items[1].repo_url, REPO_B);
    assert_eq!(items[1].version, "b7");
    assert_eq!(items[2].repo_url, REPO_A);
}

#[tokio::test]
async fn test_url_order_does_not_change_winner() {
    let fetcher = MockUpdateFetcher::new()
        .with_update(REPO_A, manifest(100.0, vec![item(7, "a7")]))
        .with_update(REPO_B, manifest(200.0, vec![item(7, "b7")]));
    let resolver = UpdateResolver::new(Arc::new(fetcher));

    let forward = resolver.resolve("m1", &urls(&[REPO_A, REPO_B])).await;
    let reverse = resolver.resolve("m1", &urls(&[REPO_B, REPO_A])).await;

    assert_eq!(forward, reverse);
    assert_eq!(forward[0].version, "b7");
}

#[tokio::test]
async fn test_failed_repo_is_skipped() {
    let fetcher = MockUpdateFetcher::new()
        .with_status(REPO_A, 500)
        .with_update(REPO_B, manifest(10.0, vec![item(1, "b1")]));
    let resolver = UpdateResolver::new(Arc::new(fetcher));

    let report = resolver
        .resolve_report("m1", &urls(&[REPO_A, REPO_B]))
        .await;

    assert_eq!(codes(&report.items), vec![1]);
    assert_eq!(report.items[0].repo_url, REPO_B);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, REPO_A);
    assert!(matches!(report.failures[0].1, FetchError::HttpError(500)));
    assert!(!report.all_failed());
}

#[tokio::test]
async fn test_all_repos_fail_yields_empty() {
    let fetcher = MockUpdateFetcher::new().with_status(REPO_A, 503);
    let resolver = UpdateResolver::new(Arc::new(fetcher));

    let report = resolver
        .resolve_report("m1", &urls(&[REPO_A, REPO_B]))
        .await;

    assert!(report.items.is_empty());
    assert_eq!(report.attempted, 2);
    assert!(report.all_failed());
    assert!(matches!(report.failures[1].1, FetchError::NotFound));
}

#[tokio::test]
async fn test_no_repos_issues_no_fetch() {
    let fetcher = Arc::new(MockUpdateFetcher::new());
    let resolver = UpdateResolver::new(Arc::clone(&fetcher));

    let report = resolver.resolve_report("m1", &[]).await;

    assert!(report.items.is_empty());
    assert!(!report.all_failed());
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_one_fetch_per_repo() {
    let fetcher = Arc::new(
        MockUpdateFetcher::new()
            .with_update(REPO_A, manifest(1.0, vec![item(1, "a1")]))
            .with_update(REPO_B, manifest(2.0, vec![item(2, "b2")]))
            .with_update(REPO_C, manifest(3.0, vec![item(3, "c3")])),
    );
    let resolver = UpdateResolver::new(Arc::clone(&fetcher));

    let items = resolver
        .resolve("m1", &urls(&[REPO_A, REPO_B, REPO_C]))
        .await;

    assert_eq!(codes(&items), vec![3, 2, 1]);
    assert_eq!(fetcher.call_count(), 3);
}

#[tokio::test]
async fn test_fetches_issued_concurrently() {
    let fetcher = Arc::new(
        MockUpdateFetcher::new()
            .with_pending(REPO_A)
            .with_update(REPO_B, manifest(2.0, vec![item(2, "b2")])),
    );
    let resolver = UpdateResolver::new(Arc::clone(&fetcher));

    // REPO_A never answers; REPO_B must still be queried while it hangs
    let result = tokio::time::timeout(
        Duration::from_millis(100),
        resolver.resolve("m1", &urls(&[REPO_A, REPO_B])),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(fetcher.call_count(), 2);
}

#[tokio::test]
async fn test_entries_tagged_with_fetch_url() {
    let mut served = manifest(1.0, vec![item(4, "v4")]);
    served.repo_url = "https://elsewhere.example.org".to_string();
    let fetcher = MockUpdateFetcher::new().with_update(REPO_A, served);
    let resolver = UpdateResolver::new(Arc::new(fetcher));

    let items = resolver.resolve("m1", &urls(&[REPO_A])).await;

    assert_eq!(items[0].repo_url, REPO_A);
}

#[tokio::test]
async fn test_resolve_twice_same_output() {
    let fetcher = MockUpdateFetcher::new()
        .with_update(REPO_A, manifest(50.0, vec![item(2, "a2"), item(9, "a9")]))
        .with_update(REPO_B, manifest(50.0, vec![item(9, "b9"), item(4, "b4")]));
    let resolver = UpdateResolver::new(Arc::new(fetcher));
    let repos = urls(&[REPO_A, REPO_B]);

    let first = resolver.resolve("m1", &repos).await;
    let second = resolver.resolve("m1", &repos).await;

    assert_eq!(first, second);
    // Equal timestamps: the first repository listed wins
    assert_eq!(first[0].version, "a9");
}

#[test]
fn test_merge_keeps_newest_manifest_entry() {
    let mut old = manifest(100.0, vec![item(5, "a5"), item(7, "a7")]);
    old.repo_url = REPO_A.to_string();
    let mut new = manifest(200.0, vec![item(7, "b7"), item(8, "b8")]);
    new.repo_url = REPO_B.to_string();

    let merged = merge_updates(vec![old, new]);

    assert_eq!(codes(&merged), vec![8, 7, 5]);
    assert_eq!(merged[1].version, "b7");
    assert_eq!(merged[1].repo_url, REPO_B);
}
