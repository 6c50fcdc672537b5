//! Application modules shared by the integration tests.

use openapi_export::registry::{Module, ModuleRegistry};
use openapi_export::sample::{HttpMethod, SampleApp};
use serde_json::json;

pub const SAMPLE_APP: &str = "tests.fixtures.sample_app:app";

/// `Sample API` 1.0.0 with `GET /` and `GET /items/{item_id}`
pub fn sample_app() -> SampleApp {
    SampleApp::new("Sample API", "1.0.0")
        .route(HttpMethod::Get, "/", "read_root")
        .route(HttpMethod::Get, "/items/{item_id}", "read_item")
        .path_param("item_id", "integer")
}

/// `Test API` 1.0.0 with a health check
pub fn test_app() -> SampleApp {
    SampleApp::new("Test API", "1.0.0")
        .with_description("A test API")
        .route(HttpMethod::Get, "/health", "health_check")
}

pub fn create_test_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register("tests.fixtures.sample_app", || {
        Ok(Module::new("tests.fixtures.sample_app")
            .with_app("app", sample_app())
            .with_value("title", json!("Sample API")))
    });
    registry.register("tests.fixtures.test_app", || {
        Ok(Module::new("tests.fixtures.test_app").with_app("app", test_app()))
    });
    registry.register("tests.fixtures.broken", || {
        Err("missing required environment variable 'DATABASE_URL'".to_string())
    });
    registry
}
