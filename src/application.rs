//! The application capability consumed by the exporter.
//!
//! Anything that can describe its own HTTP API as an OpenAPI document can be
//! exported. The exporter never looks inside the document; it only asks the
//! application for it and hands it to the serializer.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// An API description document.
///
/// A tree of mappings, sequences and scalars. Mapping keys keep their
/// insertion order, which the serializers preserve.
pub type Document = Value;

/// A web application that exposes its API description.
///
/// This is the "recognized application type": a module export counts as an
/// application exactly when it implements this trait.
pub trait Application: Send + Sync {
    /// Configured API title
    fn title(&self) -> &str;

    /// Configured API version
    fn version(&self) -> &str;

    /// Generates the OpenAPI document for this application.
    ///
    /// A fresh document is produced on every call.
    fn openapi(&self) -> Document;
}

/// Shared handle to a resolved application.
///
/// The handle is owned by the module registry's cache and shared with callers;
/// the exporter never mutates it.
#[derive(Clone)]
pub struct AppHandle(Arc<dyn Application>);

impl AppHandle {
    pub fn new<A: Application + 'static>(app: A) -> Self {
        Self(Arc::new(app))
    }

    /// Returns true if both handles point to the same application instance.
    pub fn ptr_eq(&self, other: &AppHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for AppHandle {
    type Target = dyn Application;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppHandle")
            .field("title", &self.title())
            .field("version", &self.version())
            .finish()
    }
}
