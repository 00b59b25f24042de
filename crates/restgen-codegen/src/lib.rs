//! REST client generation from API descriptor documents.
//!
//! `restgen-codegen` parses machine-readable REST API descriptors into a
//! unified, language-neutral description of services, operations, and data
//! types, which output backends render into client source code.
//!
//! # Architecture
//!
//! ```text
//! Descriptor Formats        IR               Output Backends
//! ──────────────────    ─────────────     ─────────────────
//! WADL + XSD       ─┐                  ┌─> TypeScript client
//! Swagger v2       ─┴─> ApiMeta ───────┘   (more via Backend)
//! (JSON or YAML)        (ir.rs)
//! ```
//!
//! The descriptor extension selects the front-end (`.wadl` for WADL, anything
//! else for Swagger v2); both normalize into [`ir::ApiMeta`]. All document
//! I/O goes through the async [`Fetcher`], which accepts filesystem paths and
//! `http(s)` URLs alike.
//!
//! # Example
//!
//! ```no_run
//! use restgen_codegen::{Fetcher, GeneratorOptions, generate};
//!
//! # async fn run() -> Result<(), restgen_codegen::GenerateError> {
//! let mut options = GeneratorOptions::for_input("application.wadl");
//! options.root_url = Some("http://my.server/rest".to_string());
//! let source = generate(&options, &Fetcher::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod fetch;
pub mod ident;
pub mod input;
pub mod ir;
pub mod options;
pub mod output;

// Re-export commonly used items
pub use fetch::{FetchError, Fetcher};
pub use ident::format_ident;
pub use input::{ParseError, parse_descriptor, parse_swagger2, parse_wadl};
pub use options::GeneratorOptions;
pub use output::{Backend, backends, find_backend};

/// Errors raised by [`generate`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

/// Parse the configured descriptor and render it with the configured backend.
pub async fn generate(
    options: &GeneratorOptions,
    fetcher: &Fetcher,
) -> Result<String, GenerateError> {
    let meta = parse_descriptor(options, fetcher).await?;
    let backend = find_backend(&options.platform)
        .ok_or_else(|| GenerateError::UnknownPlatform(options.platform.clone()))?;
    Ok(backend.render(&meta, options))
}
