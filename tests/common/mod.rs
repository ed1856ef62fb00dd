//! Shared helpers for integration tests.

use std::fs;
use std::path::Path;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a test subscriber once so `RUST_LOG=driftwood=debug cargo test`
/// shows pipeline logging.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture directories");
    }
    fs::write(path, content).expect("write fixture file");
}

/// A minimal ConfigMap manifest with the given name.
pub fn config_map(name: &str) -> String {
    format!("apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: {name}\ndata:\n  key: value\n")
}

/// A minimal namespaced Deployment manifest.
pub fn deployment(namespace: &str, name: &str) -> String {
    format!(
        "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  namespace: {namespace}\n  name: {name}\nspec:\n  replicas: 1\n"
    )
}
