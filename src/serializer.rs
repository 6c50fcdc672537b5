//! Serialization module for writing OpenAPI documents as YAML or JSON.
//!
//! The output format is picked from the destination's file extension. Without
//! a destination the document is printed to stdout as JSON.

use crate::application::{AppHandle, Document};
use crate::error::{Error, Result};
use log::{debug, info};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Picks the format from a destination path.
    ///
    /// `.yaml` and `.yml` select YAML; every other extension, or none, selects
    /// JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }
}

/// Asks the application for its OpenAPI document.
pub fn get_openapi_spec(app: &AppHandle) -> Document {
    debug!("Generating OpenAPI document for '{}'", app.title());
    app.openapi()
}

/// Serializes a document to YAML format.
///
/// Mapping keys are emitted in the document's own order, not sorted.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &Document) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Serializes a document to JSON format with pretty printing.
///
/// Uses a two-space indent. The result has no trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &Document) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Serializes a document in the given format.
pub fn serialize(doc: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serialize_yaml(doc),
        OutputFormat::Json => serialize_json(doc),
    }
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or truncates it if it does.
/// Parent directories are not created.
///
/// # Arguments
///
/// * `content` - The string content to write
/// * `path` - The file path to write to
///
/// # Errors
///
/// Returns [`Error::WriteError`] if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    let write_error = |source: std::io::Error| Error::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Exports an application's OpenAPI document.
///
/// Without a destination the document is written to `stdout` as JSON followed
/// by a newline. With a destination the format follows the file extension
/// (see [`OutputFormat::from_path`]) and the file is created or truncated.
///
/// # Arguments
///
/// * `app` - The resolved application
/// * `destination` - Output file, or `None` for stdout
/// * `stdout` - Where stdout output goes
///
/// # Errors
///
/// Returns [`Error::WriteError`] when the destination cannot be written.
pub fn export_openapi<W: Write + ?Sized>(
    app: &AppHandle,
    destination: Option<&Path>,
    stdout: &mut W,
) -> Result<()> {
    let spec = get_openapi_spec(app);

    let Some(path) = destination else {
        let json = serialize_json(&spec)?;
        writeln!(stdout, "{}", json).map_err(|source| Error::WriteError {
            path: "<stdout>".into(),
            source,
        })?;
        return Ok(());
    };

    let format = OutputFormat::from_path(path);
    info!("Writing {:?} output to: {}", format, path.display());
    let content = serialize(&spec, format)?;
    write_to_file(&content, path)
}
