//! Descriptor front-ends.
//!
//! Each front-end fetches a descriptor document and produces an IR
//! [`ApiMeta`](crate::ir::ApiMeta). The dispatch here selects exactly one
//! front-end from the descriptor extension.

mod swagger2;
mod wadl;

pub use swagger2::parse_swagger2;
pub use wadl::parse_wadl;

use crate::fetch::{FetchError, Fetcher};
use crate::ir::ApiMeta;
use crate::options::GeneratorOptions;

/// Errors raised while parsing a descriptor into the IR.
///
/// Every variant aborts the whole parse; there are no partial results.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid include reference {href}: {source}")]
    InvalidInclude {
        href: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported descriptor format: {0}")]
    UnsupportedFormat(String),
}

/// Parse the configured descriptor with the front-end its extension selects.
pub async fn parse_descriptor(
    options: &GeneratorOptions,
    fetcher: &Fetcher,
) -> Result<ApiMeta, ParseError> {
    if options.input.ends_with(".wadl") {
        parse_wadl(options, fetcher).await
    } else {
        parse_swagger2(options, fetcher).await
    }
}
