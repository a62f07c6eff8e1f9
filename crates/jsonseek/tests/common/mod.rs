use std::io::Write;

use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

/// Routes library events to the test harness output; `RUST_LOG` overrides
/// the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jsonseek=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Writes `contents` to a fresh temporary file.
pub fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub const FEATURES: &str = r#"[
  {"id": 0, "name": "alpha", "tags": []},
  {"tags": ["x", "y"], "name": "beta", "id": 2},
  {"id": 3, "name": "gamma", "geometry": {"type": "Point", "coordinates": [102.0, 0.5]}}
]
"#;
