//! Parsing of `module:attribute` application locators.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between the module path and the attribute name.
pub const SEPARATOR: char = ':';

/// A parsed application locator such as `tests.fixtures.sample_app:app`.
///
/// The module path is a dotted path into the module registry and the
/// identifier names an export of that module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Dotted module path (e.g., `tests.fixtures.sample_app`)
    pub module_path: String,
    /// Attribute name inside the module (e.g., `app`)
    pub identifier: String,
}

impl Locator {
    /// Parses a locator string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLocator`] unless the input contains exactly one
    /// `:` with a non-empty module path on the left and a non-empty identifier
    /// on the right. Module path segments separated by `.` must also be
    /// non-empty.
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || Error::MalformedLocator(input.to_string());

        let mut parts = input.split(SEPARATOR);
        let (module_path, identifier) = match (parts.next(), parts.next(), parts.next()) {
            (Some(module), Some(ident), None) => (module.trim(), ident.trim()),
            _ => return Err(malformed()),
        };

        if module_path.is_empty() || identifier.is_empty() {
            return Err(malformed());
        }
        if module_path.split('.').any(str::is_empty) {
            return Err(malformed());
        }

        Ok(Self {
            module_path: module_path.to_string(),
            identifier: identifier.to_string(),
        })
    }
}

/// Iterates over the package prefixes of a dotted module path, outermost first.
///
/// `a.b.c` yields `a`, `a.b`, `a.b.c`.
pub fn package_prefixes(module_path: &str) -> impl Iterator<Item = &str> {
    module_path
        .match_indices('.')
        .map(move |(idx, _)| &module_path[..idx])
        .chain(std::iter::once(module_path))
}

impl FromStr for Locator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locator::parse(s)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.module_path, SEPARATOR, self.identifier)
    }
}
