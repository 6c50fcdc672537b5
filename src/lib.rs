//! openapi-export - Export the OpenAPI document of a web application.
//!
//! An application is located with a `module:attribute` path, resolved against
//! an in-process [`registry::ModuleRegistry`], asked for its API description,
//! and the resulting document is written as JSON or YAML.
//!
//! # Architecture
//!
//! 1. [`locator`] - Parses `module:attribute` paths
//! 2. [`registry`] - Registered modules and their exports, loaded lazily and cached
//! 3. [`resolver`] - Turns a locator into an application handle
//! 4. [`application`] - The capability an exportable application provides
//! 5. [`serializer`] - Writes the document to stdout or a file
//! 6. [`cli`] - Command-line front end
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_export::{
//!     registry::{Module, ModuleRegistry},
//!     resolver::resolve,
//!     sample::sample_app,
//!     serializer::export_openapi,
//! };
//! use std::path::Path;
//!
//! let mut registry = ModuleRegistry::new();
//! registry.register_module(Module::new("my_service.main").with_app("app", sample_app()));
//!
//! let app = resolve(&registry, "my_service.main:app").unwrap();
//! export_openapi(&app, Some(Path::new("openapi.yaml")), &mut std::io::stdout()).unwrap();
//! ```

pub mod application;
pub mod cli;
pub mod error;
pub mod locator;
pub mod registry;
pub mod resolver;
pub mod sample;
pub mod serializer;
