//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Options consumed by parsing and code emission.
///
/// Every recognized option has a stated default; callers override individual
/// fields over [`GeneratorOptions::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Path or URL of the root descriptor. The extension selects the parser
    /// backend: `.wadl` for WADL, anything else for Swagger v2.
    pub input: String,
    /// Where the rendered client source is written.
    pub output_file: String,
    /// Output backend id.
    pub platform: String,
    /// Overrides any root URL discovered in the document.
    pub root_url: Option<String>,
    /// Upper-case the first character of formatted identifiers.
    pub capitalize: bool,
    /// Literal suffix appended to every formatted service name.
    pub service_suffix: String,
    /// Substring removed from the raw grouping key before formatting.
    pub service_exclude: String,
    /// Substring removed from the raw operation id before formatting.
    pub method_exclude: String,
    /// Fallback grouping name for resources and operations that have none.
    pub default_service_name: String,
    /// Module name emitted into generated sources.
    pub module_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            input: String::new(),
            output_file: "services.ts".to_string(),
            platform: "typescript".to_string(),
            root_url: None,
            capitalize: true,
            service_suffix: "Service".to_string(),
            service_exclude: String::new(),
            method_exclude: String::new(),
            default_service_name: String::new(),
            module_name: "ServiceModule".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Options for the given descriptor reference, defaults everywhere else.
    pub fn for_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }
}
