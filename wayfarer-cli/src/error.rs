//! Error types emitted by the Wayfarer CLI.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use wayfarer_core::{CatalogError, RoundError, SqliteCatalogError};
use wayfarer_match::BlendWeightError;

/// Errors emitted by the Wayfarer CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: PathBuf,
    },
    /// The blend weight option was outside `0..=1`.
    #[error(transparent)]
    InvalidBlendWeight(#[from] BlendWeightError),
    /// Opening a JSON catalogue file failed.
    #[error("failed to open catalogue at {path:?}: {source}")]
    OpenCatalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Catalogue JSON could not be decoded.
    #[error("failed to parse catalogue JSON at {path:?}: {source}")]
    ParseCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Opening or reading the SQLite catalogue failed.
    #[error(transparent)]
    SqliteCatalog(#[from] SqliteCatalogError),
    /// Reading destinations out of the catalogue failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// No destination survived the budget filter.
    #[error("no destination fits a total budget of {budget} over {days} days")]
    EmptyCatalog { budget: f32, days: u32 },
    /// A recorded pick was not among the shown candidates.
    #[error(transparent)]
    Selection(#[from] RoundError),
    /// Reading the interactive selection from stdin failed.
    #[error("failed to read selection: {0}")]
    ReadSelection(#[source] std::io::Error),
    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Serializing the session export failed.
    #[error("failed to serialize session export: {0}")]
    SerializeExport(#[source] serde_json::Error),
    /// Writing the session export file failed.
    #[error("failed to write session export to {path:?}: {source}")]
    WriteExport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
