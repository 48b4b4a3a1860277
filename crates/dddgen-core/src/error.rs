use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while materializing module files. All of them abort the run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to read template {template} from {}: {source}", path.display())]
    TemplateRead {
        template: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse template {template}: {source}")]
    TemplateSyntax {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render template {template}: {source}")]
    TemplateRender {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        /// Files written earlier in the same run. They are left in place.
        written: Vec<PathBuf>,
        #[source]
        source: io::Error,
    },
}

/// Failures while inserting fragments into an aggregator file.
///
/// These never abort a run; the caller reports them and moves on.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("marker comment not found in {}: {marker}", path.display())]
    MarkerNotFound { path: PathBuf, marker: String },

    #[error("marker comment appears {count} times in {}: {marker}", path.display())]
    DuplicateMarker {
        path: PathBuf,
        marker: String,
        count: usize,
    },

    #[error(
        "inserting before marker would leave it {count} times in {}: {marker}",
        path.display()
    )]
    MarkerCorrupted {
        path: PathBuf,
        marker: String,
        count: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// A module name that can't be turned into paths and identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("module name is empty")]
    Empty,

    #[error("module name {name:?} contains no words")]
    NoWords { name: String },

    #[error(
        "module name {name:?} contains {found:?}; only ASCII letters, digits, '_' and '-' are allowed"
    )]
    InvalidChar { name: String, found: char },
}
