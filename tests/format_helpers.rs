//! Cell formatting tests
//!
//! Covers age rendering, truncation and the per-kind row layout.

use chrono::Duration;
use fluxcli::models::{FluxResourceKind, Resource};
use fluxcli::tui::RowFormatter;
use fluxcli::tui::views::{format_age, truncate_with_ellipsis};

#[test]
fn test_format_age_examples() {
    assert_eq!(format_age(Duration::seconds(45)), "45s");
    assert_eq!(format_age(Duration::seconds(90)), "1m");
    assert_eq!(format_age(Duration::seconds(3700)), "1h");
    assert_eq!(format_age(Duration::seconds(90_000)), "1d");
    assert_eq!(format_age(Duration::seconds(-5)), "0s");
}

#[test]
fn test_status_truncation() {
    assert_eq!(
        truncate_with_ellipsis("ProgressingXYZ1", 12, 9),
        "Progressi…"
    );
    assert_eq!(truncate_with_ellipsis("ReconcileOK1", 12, 9), "ReconcileOK1");
}

#[test]
fn test_message_truncation_counts_characters() {
    let long = "é".repeat(40);
    let truncated = truncate_with_ellipsis(&long, 35, 32);
    assert_eq!(truncated.chars().count(), 33);
    assert!(truncated.ends_with('…'));

    let exact = "a".repeat(35);
    assert_eq!(truncate_with_ellipsis(&exact, 35, 32), exact);
}

fn ready_release() -> Resource {
    let mut r = Resource::new(FluxResourceKind::HelmRelease, "apps", "podinfo");
    r.ready = true;
    r.status = "InstallSucceeded".to_string();
    r.message = "Helm install succeeded".to_string();
    r.age = Duration::hours(3);
    r.chart = Some("podinfo".to_string());
    r.version = Some("6.5.0".to_string());
    r
}

#[test]
fn test_helm_release_row() {
    let row = RowFormatter::for_kind(FluxResourceKind::HelmRelease).format_row(&ready_release(), false);
    assert_eq!(
        row,
        vec![
            "podinfo",
            "True",
            "InstallSu…",
            "3h",
            "Helm install succeeded",
            "podinfo:6.5.0"
        ]
    );
}

#[test]
fn test_namespace_prefix_and_suspended_status() {
    let mut resource = ready_release();
    resource.suspended = true;
    let row = RowFormatter::for_kind(FluxResourceKind::HelmRelease).format_row(&resource, true);
    assert_eq!(row[0], "apps/podinfo");
    assert_eq!(row[2], "Suspended");
}

#[test]
fn test_missing_status_shows_unknown() {
    let resource = Resource::new(FluxResourceKind::GitRepository, "flux-system", "infra");
    let row = RowFormatter::for_kind(FluxResourceKind::GitRepository).format_row(&resource, false);
    assert_eq!(row[1], "False");
    assert_eq!(row[2], "Unknown");
    assert_eq!(row[5], "");
}

#[test]
fn test_kustomization_trailing_cell() {
    let formatter = RowFormatter::for_kind(FluxResourceKind::Kustomization);
    let mut resource = Resource::new(FluxResourceKind::Kustomization, "flux-system", "apps");
    resource.path = Some("./apps".to_string());
    assert_eq!(formatter.trailing_cell(&resource), "./apps");
    resource.source = Some("flux-system".to_string());
    assert_eq!(formatter.trailing_cell(&resource), "flux-system/./apps");
}
