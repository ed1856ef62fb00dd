//! End-to-end tree loading scenarios.

use driftwood::core::{DriftwoodError, Resource, ResourceId};
use driftwood::loader::Loader;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{config_map, deployment, init_tracing, write_file};

#[test]
fn test_loads_mixed_tree_into_one_set() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    write_file(&base.join("cm.yaml"), &config_map("settings"));
    write_file(&base.join("apps/web.yaml"), &deployment("prod", "web"));
    write_file(&base.join("apps/worker.yml"), &deployment("prod", "worker"));
    write_file(&base.join("docs/README.md"), "# not a manifest\n");

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();

    assert_eq!(objs.len(), 3);
    assert!(objs.contains(&ResourceId::from("v1/ConfigMap/default/settings")));
    assert!(objs.contains(&ResourceId::from("apps/v1/Deployment/prod/web")));
    assert!(objs.contains(&ResourceId::from("apps/v1/Deployment/prod/worker")));
}

#[test]
fn test_source_labels_are_relative_to_base() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    write_file(&base.join("apps/web.yaml"), &deployment("prod", "web"));

    let objs = Loader::new().load(base, &[base.join("apps")]).unwrap();

    let web = objs.get(&ResourceId::from("apps/v1/Deployment/prod/web")).unwrap();
    assert_eq!(
        Resource::source(web),
        Path::new("apps").join("web.yaml").display().to_string()
    );
}

#[test]
fn test_multi_document_file_yields_one_entry_per_document() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    let multidoc = format!("{}---\n{}", config_map("first"), config_map("second"));
    write_file(&base.join("both.yaml"), &multidoc);

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();

    assert_eq!(objs.len(), 2);
    let first = objs.get(&ResourceId::from("v1/ConfigMap/default/first")).unwrap();
    let second = objs.get(&ResourceId::from("v1/ConfigMap/default/second")).unwrap();
    assert_eq!(Resource::source(first), "both.yaml");
    assert_eq!(Resource::source(second), "both.yaml");
}

#[test]
fn test_blank_documents_do_not_count_as_resources() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    let multidoc = format!(
        "# generated, do not edit\n---\n{}---\n# trailing comment block\n",
        config_map("real")
    );
    write_file(&base.join("sparse.yaml"), &multidoc);

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();

    assert_eq!(objs.len(), 1);
    assert!(objs.contains(&ResourceId::from("v1/ConfigMap/default/real")));
}

#[test]
fn test_duplicate_across_files_fails_and_names_both() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    write_file(&base.join("one/cm.yaml"), &config_map("foo"));
    write_file(&base.join("two/cm.yaml"), &config_map("foo"));

    let failure = Loader::new().load(base, &[base.to_path_buf()]).unwrap_err();

    let message = failure.to_string();
    assert!(message.contains("v1/ConfigMap/default/foo"), "message: {message}");
    assert!(message.contains(&Path::new("one").join("cm.yaml").display().to_string()));
    assert!(message.contains(&Path::new("two").join("cm.yaml").display().to_string()));
}

#[test]
fn test_failure_still_returns_previously_loaded_resources() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    write_file(&base.join("a-ok.yaml"), &config_map("loaded"));
    write_file(&base.join("z-bad.yaml"), "kind: {unterminated\n");

    let failure = Loader::new().load(base, &[base.to_path_buf()]).unwrap_err();
    let (partial, error) = failure.into_parts();

    assert!(matches!(error, DriftwoodError::Decode { .. }));
    assert_eq!(partial.len(), 1);
    assert!(partial.contains(&ResourceId::from("v1/ConfigMap/default/loaded")));
}

#[test]
fn test_document_larger_than_initial_buffer_loads() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();

    // Well past the scanner's 4 KiB initial buffer, well under its 1 MiB
    // ceiling.
    let blob = "x".repeat(64 * 1024);
    let manifest = format!(
        "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: big\ndata:\n  blob: {blob}\n---\n{}",
        config_map("small")
    );
    write_file(&base.join("big.yaml"), &manifest);

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();
    assert_eq!(objs.len(), 2);
    assert!(objs.contains(&ResourceId::from("v1/ConfigMap/default/big")));
}

#[test]
fn test_file_ending_mid_separator_line_loads() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    // Last line opens a separator but has trailing text and no final
    // newline; the load must finish and keep the document before it.
    let manifest = format!("{}--- leftover", config_map("kept"));
    write_file(&base.join("truncated.yaml"), &manifest);

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();
    assert_eq!(objs.len(), 1);
    assert!(objs.contains(&ResourceId::from("v1/ConfigMap/default/kept")));
}

#[test]
fn test_multiple_roots_merge_into_one_set() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    write_file(&base.join("east/cm.yaml"), &config_map("east"));
    write_file(&base.join("west/cm.yaml"), &config_map("west"));
    write_file(&base.join("unscanned/cm.yaml"), &config_map("unscanned"));

    let objs = Loader::new()
        .load(base, &[base.join("east"), base.join("west")])
        .unwrap();

    assert_eq!(objs.len(), 2);
    assert!(!objs.contains(&ResourceId::from("v1/ConfigMap/default/unscanned")));
}

#[test]
fn test_empty_tree_loads_empty_set() {
    let temp = TempDir::new().unwrap();
    let base = temp.path();
    std::fs::create_dir_all(base.join("empty/nested")).unwrap();

    let objs = Loader::new().load(base, &[base.to_path_buf()]).unwrap();
    assert!(objs.is_empty());
}
