use clap::Parser;
use std::path::PathBuf;

mod commands;
mod context;
mod format;
mod logging;

/// taglist - list image tags in a Docker v2 registry
///
/// With no arguments, prints every tag of the official alpine image on
/// Docker Hub, one per line.
#[derive(Parser, Debug)]
#[command(name = "taglist")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Image name
    #[arg(default_value = "alpine")]
    image: String,

    /// Repository namespace (empty for registries without namespaces)
    #[arg(long, default_value = libtaglist::DEFAULT_REPO)]
    repo: String,

    /// Registry name or hostname
    #[arg(long, env = "TAGLIST_REGISTRY", default_value = libtaglist::DEFAULT_REGISTRY)]
    registry: String,

    /// Output format
    #[arg(short, long, value_enum, ignore_case = true, default_value = "pretty")]
    format: format::OutputFormat,

    /// Path to a YAML configuration file
    #[arg(long, env = "TAGLIST_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    logging::init(context::VerbosityLevel::from_count(cli.verbose));

    // Precedence: defaults > config file > env vars > CLI flags
    let ctx = match context::AppContext::build(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            format::error(&format::error_chain(&e));
            std::process::exit(1);
        }
    };

    commands::tags::handle_tags(
        &ctx,
        &cli.image,
        &cli.repo,
        &cli.registry,
        cli.format,
    );
}
