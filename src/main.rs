//! openapi-export - Command-line tool for exporting OpenAPI documentation.
//!
//! This binary resolves an application by its `module:attribute` path in the
//! built-in module registry and writes the application's OpenAPI document to
//! stdout or to a file.
//!
//! # Usage
//!
//! ```bash
//! openapi-export --app <MODULE:ATTRIBUTE> [--output <FILE>]
//! ```
//!
//! # Examples
//!
//! Print JSON documentation:
//! ```bash
//! openapi-export --app samples.sample_app:app
//! ```
//!
//! Write YAML documentation:
//! ```bash
//! openapi-export -a samples.sample_app:app -o openapi.yaml
//! ```
//!
//! Applications that want their own modules available link the library and
//! call [`openapi_export::cli::main_with_registry`] from their own binary.

use anyhow::Result;
use openapi_export::{cli, registry::ModuleRegistry, sample};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let mut registry = ModuleRegistry::new();
    sample::register(&mut registry);

    cli::main_with_registry(&registry)
}
