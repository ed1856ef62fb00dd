//! Chart-directory detection and subtree exclusion scenarios.

use driftwood::core::ResourceId;
use driftwood::loader::{Loader, looks_like_chart};
use tempfile::TempDir;

use crate::common::{config_map, write_file};

fn chart_markers(dir: &std::path::Path) {
    write_file(&dir.join("Chart.yaml"), "apiVersion: v2\nname: demo\nversion: 0.1.0\n");
    write_file(&dir.join("values.yaml"), "replicas: 1\n");
}

#[test]
fn test_chart_subtree_yields_zero_resources() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    chart_markers(&base.join("chart"));
    // Plain, parseable manifests inside the chart tree must never be
    // scanned, however deep.
    write_file(&base.join("chart/templates/cm.yaml"), &config_map("templated"));
    write_file(&base.join("chart/templates/sub/deep.yaml"), &config_map("deep"));

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();
    assert!(objs.is_empty());
}

#[test]
fn test_manifests_next_to_a_chart_still_load() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    chart_markers(&base.join("chart"));
    write_file(&base.join("chart/templates/cm.yaml"), &config_map("templated"));
    write_file(&base.join("plain.yaml"), &config_map("plain"));

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();
    assert_eq!(objs.len(), 1);
    assert!(objs.contains(&ResourceId::from("v1/ConfigMap/default/plain")));
}

#[test]
fn test_single_marker_is_not_a_chart() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();

    // Only a values file: scanned as plain manifests.
    write_file(&base.join("only-values/values.yaml"), &config_map("values"));
    // Only a chart descriptor: also scanned.
    write_file(&base.join("only-chart/Chart.yaml"), &config_map("chart"));

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();
    assert_eq!(objs.len(), 2);
}

#[test]
fn test_chart_detection_is_per_directory_not_inherited() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();

    // The parent is not a chart; a chart nested below it only excludes its
    // own subtree.
    write_file(&base.join("deploy/app.yaml"), &config_map("app"));
    chart_markers(&base.join("deploy/vendored-chart"));
    write_file(
        &base.join("deploy/vendored-chart/templates/cm.yaml"),
        &config_map("vendored"),
    );
    write_file(&base.join("deploy/more/extra.yaml"), &config_map("extra"));

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();
    assert_eq!(objs.len(), 2);
    assert!(objs.contains(&ResourceId::from("v1/ConfigMap/default/app")));
    assert!(objs.contains(&ResourceId::from("v1/ConfigMap/default/extra")));
}

#[test]
fn test_root_that_is_itself_a_chart_loads_nothing() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    let chart = base.join("chart");
    chart_markers(&chart);
    write_file(&chart.join("templates/cm.yaml"), &config_map("templated"));

    let objs = Loader::new().load(base, &[chart]).unwrap();
    assert!(objs.is_empty());
}

#[test]
fn test_looks_like_chart_predicate() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();

    chart_markers(&base.join("real-chart"));
    write_file(&base.join("half/values.yaml"), "a: 1\n");
    std::fs::create_dir_all(base.join("empty")).unwrap();

    assert!(looks_like_chart(&base.join("real-chart")));
    assert!(!looks_like_chart(&base.join("half")));
    assert!(!looks_like_chart(&base.join("empty")));
    assert!(!looks_like_chart(&base.join("missing")));
}
