//! REST client generator CLI.
//!
//! Parses a WADL or Swagger v2 descriptor and writes a generated client for
//! the selected platform.

use clap::Parser;
use restgen_codegen::{Fetcher, GeneratorOptions, find_backend, parse_descriptor};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a typed REST client from a WADL or Swagger v2 descriptor.
#[derive(Parser)]
#[command(name = "restgen", version, about)]
struct Cli {
    /// Path or URL of the descriptor (.wadl, .json or .yaml)
    input: String,

    /// Output file
    #[arg(long, default_value = "services.ts")]
    output_file: String,

    /// Output platform
    #[arg(long, default_value = "typescript")]
    platform: String,

    /// Root URL of all REST calls (overrides the descriptor)
    #[arg(long)]
    root_url: Option<String>,

    /// Service name for resources and operations without one
    #[arg(long, default_value = "")]
    default_service_name: String,

    /// Suffix appended to every service name
    #[arg(long, default_value = "Service")]
    service_suffix: String,

    /// Substring removed from grouping keys before formatting
    #[arg(long, default_value = "")]
    service_exclude: String,

    /// Substring removed from operation ids before formatting
    #[arg(long, default_value = "")]
    method_exclude: String,

    /// Module name emitted into the generated source
    #[arg(long, default_value = "ServiceModule")]
    module_name: String,

    /// Do not capitalize resource and type names
    #[arg(long)]
    no_capitalize: bool,
}

impl Cli {
    fn into_options(self) -> GeneratorOptions {
        let mut options = GeneratorOptions::for_input(self.input);
        options.output_file = self.output_file;
        options.platform = self.platform;
        options.root_url = self.root_url;
        options.default_service_name = self.default_service_name;
        options.service_suffix = self.service_suffix;
        options.service_exclude = self.service_exclude;
        options.method_exclude = self.method_exclude;
        options.module_name = self.module_name;
        options.capitalize = !self.no_capitalize;
        options
    }
}

async fn run(options: &GeneratorOptions) -> Result<(), Box<dyn std::error::Error>> {
    let kind = if options.input.ends_with(".wadl") {
        "WADL"
    } else {
        "Swagger"
    };
    info!("reading {} descriptor from {}", kind, options.input);

    let fetcher = Fetcher::new();
    let meta = parse_descriptor(options, &fetcher).await?;
    info!("descriptor parsed, found {} services", meta.services.len());

    let backend = find_backend(&options.platform)
        .ok_or_else(|| format!("unknown platform: {}", options.platform))?;
    info!("generating {} sources", backend.name());
    let source = backend.render(&meta, options);

    tokio::fs::write(&options.output_file, source).await?;
    info!("client written to {}", options.output_file);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = Cli::parse().into_options();
    if let Err(e) = run(&options).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
