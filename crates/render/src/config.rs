//! Environment-driven configuration for the render binary.

use std::path::PathBuf;

pub const SNAPSHOT_VAR: &str = "SHOPATTR_SNAPSHOT";
pub const OUTPUT_VAR: &str = "SHOPATTR_OUTPUT";

/// Where the product snapshot is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    Stdin,
    File(PathBuf),
}

/// What gets printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Every display string and section flag, as JSON.
    #[default]
    Page,
    /// Only the JSON-LD document.
    JsonLd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub source: SnapshotSource,
    pub output: OutputMode,
}

impl RenderConfig {
    /// Read configuration from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(SNAPSHOT_VAR).ok(),
            std::env::var(OUTPUT_VAR).ok(),
        )
    }

    /// A positional argument overrides `SHOPATTR_SNAPSHOT`; "-" means stdin.
    pub fn resolve(arg: Option<String>, snapshot_var: Option<String>, output_var: Option<String>) -> Self {
        let source = match arg.or(snapshot_var).filter(|s| !s.is_empty()) {
            Some(path) if path != "-" => SnapshotSource::File(PathBuf::from(path)),
            _ => SnapshotSource::Stdin,
        };

        let output = match output_var.as_deref().map(str::trim) {
            None | Some("") | Some("page") => OutputMode::Page,
            Some("jsonld") | Some("json-ld") => OutputMode::JsonLd,
            Some(other) => {
                tracing::warn!("unknown {OUTPUT_VAR} value {other:?}; falling back to page output");
                OutputMode::Page
            }
        };

        Self { source, output }
    }
}
