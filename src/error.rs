use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the application
#[derive(Debug)]
pub enum Error {
    /// The locator does not split into a module path and an attribute name
    MalformedLocator(String),
    /// The module path could not be imported from the registry
    ModuleNotFound { module: String, reason: String },
    /// The module was imported but has no such attribute
    AttributeNotFound { module: String, attribute: String },
    /// The attribute exists but does not expose the application capability
    NotAnApplication { module: String, attribute: String },
    SerializationError(String),
    /// The output destination could not be created or written
    WriteError { path: PathBuf, source: std::io::Error },
}

impl Error {
    /// Whether the error was raised while resolving a locator, as opposed to
    /// while producing output.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::MalformedLocator(_)
                | Error::ModuleNotFound { .. }
                | Error::AttributeNotFound { .. }
                | Error::NotAnApplication { .. }
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MalformedLocator(locator) => write!(
                f,
                "Invalid app path '{}': expected format 'module:attribute'",
                locator
            ),
            Error::ModuleNotFound { module, reason } => {
                write!(f, "Could not import module '{}': {}", module, reason)
            }
            Error::AttributeNotFound { module, attribute } => {
                write!(f, "Module '{}' has no attribute '{}'", module, attribute)
            }
            Error::NotAnApplication { module, attribute } => write!(
                f,
                "Attribute '{}' in module '{}' is not an application instance",
                attribute, module
            ),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Error::WriteError { path, source } => {
                write!(f, "Failed to write to file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::WriteError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON serialization failed: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML serialization failed: {}", err))
    }
}
