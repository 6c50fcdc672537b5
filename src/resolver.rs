//! Resolution of application locators against a module registry.

use crate::application::AppHandle;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::registry::ModuleRegistry;
use log::debug;

/// Resolves a `module:attribute` locator to an application.
///
/// Resolution runs three checks in order and stops at the first failure:
///
/// 1. the locator is parsed; nothing is imported if it is malformed
/// 2. the module is imported from the registry
/// 3. the attribute is looked up and must expose the application capability
///
/// # Arguments
///
/// * `registry` - Modules that can be imported
/// * `app_path` - Locator string such as `tests.fixtures.sample_app:app`
///
/// # Errors
///
/// Returns [`Error::MalformedLocator`], [`Error::ModuleNotFound`],
/// [`Error::AttributeNotFound`] or [`Error::NotAnApplication`].
pub fn resolve(registry: &ModuleRegistry, app_path: &str) -> Result<AppHandle> {
    let locator = Locator::parse(app_path)?;
    resolve_locator(registry, &locator)
}

/// Resolves an already-parsed locator. See [`resolve`].
pub fn resolve_locator(registry: &ModuleRegistry, locator: &Locator) -> Result<AppHandle> {
    debug!("Resolving application: {}", locator);

    let module = registry.import(&locator.module_path)?;

    let export = module
        .get(&locator.identifier)
        .ok_or_else(|| Error::AttributeNotFound {
            module: locator.module_path.clone(),
            attribute: locator.identifier.clone(),
        })?;

    let app = export
        .as_application()
        .ok_or_else(|| Error::NotAnApplication {
            module: locator.module_path.clone(),
            attribute: locator.identifier.clone(),
        })?;

    debug!(
        "Resolved application '{}' version {}",
        app.title(),
        app.version()
    );
    Ok(app.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Application, Document};
    use crate::registry::Module;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct TestApp;

    impl Application for TestApp {
        fn title(&self) -> &str {
            "Test API"
        }

        fn version(&self) -> &str {
            "1.0.0"
        }

        fn openapi(&self) -> Document {
            json!({
                "openapi": "3.1.0",
                "info": {"title": "Test API", "version": "1.0.0"},
                "paths": {}
            })
        }
    }

    fn create_test_registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register_module(
            Module::new("tests.fixtures.sample_app")
                .with_app("app", TestApp)
                .with_value("settings", json!({"debug": false})),
        );
        registry
    }

    #[test]
    fn test_resolve_valid_locator() {
        let registry = create_test_registry();
        let app = resolve(&registry, "tests.fixtures.sample_app:app").unwrap();

        assert_eq!(app.title(), "Test API");
        assert_eq!(app.version(), "1.0.0");
        assert_eq!(app.openapi()["info"]["title"], "Test API");
    }

    #[test]
    fn test_resolve_returns_cached_instance() {
        let registry = create_test_registry();
        let first = resolve(&registry, "tests.fixtures.sample_app:app").unwrap();
        let second = resolve(&registry, "tests.fixtures.sample_app:app").unwrap();
        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn test_resolve_malformed_locator_skips_import() {
        static IMPORTED: AtomicBool = AtomicBool::new(false);

        let mut registry = ModuleRegistry::new();
        registry.register("foo", || {
            IMPORTED.store(true, Ordering::SeqCst);
            Ok(Module::new("foo"))
        });

        let err = resolve(&registry, "foo").unwrap_err();
        assert!(matches!(err, Error::MalformedLocator(_)));
        assert!(!IMPORTED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_resolve_unknown_module() {
        let registry = create_test_registry();
        let err = resolve(&registry, "nonexistent.module:app").unwrap_err();

        assert!(matches!(err, Error::ModuleNotFound { .. }));
        let message = err.to_string();
        assert!(message.contains("Could not import module"));
        assert!(message.contains("nonexistent.module"));
    }

    #[test]
    fn test_resolve_missing_attribute() {
        let registry = create_test_registry();
        let err = resolve(&registry, "tests.fixtures.sample_app:application").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Module 'tests.fixtures.sample_app' has no attribute 'application'"
        );
    }

    #[test]
    fn test_resolve_attribute_is_not_application() {
        let registry = create_test_registry();
        let err = resolve(&registry, "tests.fixtures.sample_app:settings").unwrap_err();

        assert!(matches!(err, Error::NotAnApplication { .. }));
        assert!(err.is_resolution());
    }
}
