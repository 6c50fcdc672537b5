//! In-process module registry.
//!
//! Applications are made reachable by registering the modules that export
//! them. A module is registered under a dotted path together with a loader;
//! the loader runs on first import and its outcome is cached for the
//! lifetime of the registry, whether it succeeded or failed.

use crate::application::{AppHandle, Application};
use crate::error::{Error, Result};
use crate::locator::package_prefixes;
use log::debug;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

/// A value exported by a module under an attribute name.
#[derive(Debug, Clone)]
pub enum Export {
    /// An application exposing its API description
    Application(AppHandle),
    /// Any other attribute (settings, constants, ...)
    Value(Value),
}

impl Export {
    /// Returns the application handle if this export is an application.
    pub fn as_application(&self) -> Option<&AppHandle> {
        match self {
            Export::Application(app) => Some(app),
            Export::Value(_) => None,
        }
    }
}

/// A loaded module: a named set of exports.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    exports: BTreeMap<String, Export>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exports: BTreeMap::new(),
        }
    }

    /// Adds an application export.
    pub fn with_app<A: Application + 'static>(mut self, attribute: &str, app: A) -> Self {
        self.exports
            .insert(attribute.to_string(), Export::Application(AppHandle::new(app)));
        self
    }

    /// Adds a plain value export.
    pub fn with_value(mut self, attribute: &str, value: Value) -> Self {
        self.exports.insert(attribute.to_string(), Export::Value(value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an attribute of the module.
    pub fn get(&self, attribute: &str) -> Option<&Export> {
        self.exports.get(attribute)
    }

    /// Names of all exported attributes, sorted.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }
}

/// Produces a module, or a diagnostic explaining why it could not be loaded.
pub type Loader = Box<dyn Fn() -> std::result::Result<Module, String> + Send + Sync>;

struct Entry {
    loader: Loader,
    loaded: OnceLock<std::result::Result<Arc<Module>, String>>,
}

/// Registry of importable modules, keyed by dotted module path.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Entry>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under `path` with a loader that runs on first import.
    ///
    /// Registering the same path again replaces the previous loader and
    /// discards anything it had cached.
    pub fn register<F>(&mut self, path: &str, loader: F) -> &mut Self
    where
        F: Fn() -> std::result::Result<Module, String> + Send + Sync + 'static,
    {
        debug!("Registering module: {}", path);
        self.modules.insert(
            path.to_string(),
            Entry {
                loader: Box::new(loader),
                loaded: OnceLock::new(),
            },
        );
        self
    }

    /// Registers an already-built module under its own name.
    pub fn register_module(&mut self, module: Module) -> &mut Self {
        let path = module.name().to_string();
        self.register(&path, move || Ok(module.clone()))
    }

    /// Returns true if a module is registered under exactly this path.
    pub fn contains(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }

    /// All registered module paths, sorted.
    pub fn module_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Imports a module, running its loader on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModuleNotFound`] when nothing is registered under the
    /// path, or when the module's loader fails. In the first case the
    /// diagnostic names the outermost missing package along the dotted path.
    pub fn import(&self, path: &str) -> Result<Arc<Module>> {
        let entry = self.modules.get(path).ok_or_else(|| Error::ModuleNotFound {
            module: path.to_string(),
            reason: format!("No module named '{}'", self.first_missing(path)),
        })?;

        let loaded = entry.loaded.get_or_init(|| {
            debug!("Loading module: {}", path);
            (entry.loader)().map(Arc::new)
        });

        loaded.clone().map_err(|reason| Error::ModuleNotFound {
            module: path.to_string(),
            reason,
        })
    }

    /// A prefix exists if it is a registered module or a package containing one.
    fn first_missing<'a>(&self, path: &'a str) -> &'a str {
        package_prefixes(path)
            .find(|prefix| !self.is_module_or_package(prefix))
            .unwrap_or(path)
    }

    fn is_module_or_package(&self, prefix: &str) -> bool {
        self.modules.keys().any(|path| {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}
