//! Built-in sample application.
//!
//! The binary ships with one module, `samples.sample_app`, so that the tool
//! can be tried without linking a real application:
//!
//! ```bash
//! openapi-export --app samples.sample_app:app -o openapi.yaml
//! ```

use crate::application::{Application, Document};
use crate::registry::{Module, ModuleRegistry};
use log::debug;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Module path of the built-in sample module
pub const SAMPLE_MODULE: &str = "samples.sample_app";

/// HTTP methods a sample route can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Lowercase name, as used for OpenAPI path item keys
    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: HttpMethod,
    path: String,
    handler_name: String,
    /// (name, JSON schema type) for each `{param}` in the path
    path_params: Vec<(String, String)>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, Serialize)]
struct Info {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    version: String,
}

/// OpenAPI path Parameter object
#[derive(Debug, Clone, Serialize)]
struct Parameter<'a> {
    name: &'a str,
    #[serde(rename = "in")]
    location: &'static str,
    required: bool,
    schema: ParameterSchema<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct ParameterSchema<'a> {
    #[serde(rename = "type")]
    schema_type: &'a str,
    title: String,
}

/// A small declarative application: metadata plus a list of routes.
#[derive(Debug, Clone)]
pub struct SampleApp {
    info: Info,
    routes: Vec<Route>,
}

impl SampleApp {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Info {
                title: title.into(),
                description: None,
                version: version.into(),
            },
            routes: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    /// Adds a route handled by `handler_name`.
    ///
    /// Path parameters written as `{name}` are typed as strings unless given
    /// a type with [`SampleApp::path_param`].
    pub fn route(mut self, method: HttpMethod, path: &str, handler_name: &str) -> Self {
        let path_params = path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .map(|name| (name.to_string(), "string".to_string()))
            .collect();

        self.routes.push(Route {
            method,
            path: path.to_string(),
            handler_name: handler_name.to_string(),
            path_params,
        });
        self
    }

    /// Sets the schema type of a path parameter on the most recently added route.
    pub fn path_param(mut self, name: &str, schema_type: &str) -> Self {
        if let Some(route) = self.routes.last_mut() {
            for (param, ty) in route.path_params.iter_mut() {
                if param == name {
                    *ty = schema_type.to_string();
                }
            }
        }
        self
    }

    fn operation(route: &Route) -> Value {
        let mut operation = Map::new();
        operation.insert("summary".to_string(), json!(summary(&route.handler_name)));
        operation.insert("operationId".to_string(), json!(operation_id(route)));

        if !route.path_params.is_empty() {
            let parameters: Vec<Parameter> = route
                .path_params
                .iter()
                .map(|(name, ty)| Parameter {
                    name,
                    location: "path",
                    required: true,
                    schema: ParameterSchema {
                        schema_type: ty,
                        title: summary(name),
                    },
                })
                .collect();
            operation.insert("parameters".to_string(), json!(parameters));
        }

        operation.insert(
            "responses".to_string(),
            json!({
                "200": {
                    "description": "Successful Response",
                    "content": {"application/json": {"schema": {}}}
                }
            }),
        );
        Value::Object(operation)
    }
}

impl Application for SampleApp {
    fn title(&self) -> &str {
        &self.info.title
    }

    fn version(&self) -> &str {
        &self.info.version
    }

    fn openapi(&self) -> Document {
        debug!("Building OpenAPI document with {} routes", self.routes.len());

        let mut paths = Map::new();
        for route in &self.routes {
            let item = paths
                .entry(route.path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(item) = item {
                item.insert(route.method.as_str().to_string(), Self::operation(route));
            }
        }

        json!({
            "openapi": "3.1.0",
            "info": self.info,
            "paths": paths,
        })
    }
}

/// `read_item` -> `Read Item`
fn summary(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Handler name, path and method joined with every non-word character
/// replaced by `_` (e.g. `read_item_items__item_id__get`).
fn operation_id(route: &Route) -> String {
    let raw = format!("{}{}_{}", route.handler_name, route.path, route.method.as_str());
    raw.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// The application exported as `samples.sample_app:app`.
pub fn sample_app() -> SampleApp {
    SampleApp::new("Sample API", "1.0.0")
        .route(HttpMethod::Get, "/", "read_root")
        .route(HttpMethod::Get, "/items/{item_id}", "read_item")
        .path_param("item_id", "integer")
}

/// Registers the built-in sample module.
pub fn register(registry: &mut ModuleRegistry) {
    registry.register(SAMPLE_MODULE, || {
        Ok(Module::new(SAMPLE_MODULE)
            .with_app("app", sample_app())
            .with_value("settings", json!({"debug": false})))
    });
}
