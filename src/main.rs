mod change;
mod compare;
mod diff;
mod introspection;
mod loader;
mod report;
mod schema;
mod source;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::compare::CompareError;
use crate::source::{SchemaSource, resolve_source};

const LOG_ENV: &str = "GQLDIFF_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// GraphQL Schema Comparator
///
/// Compares two GraphQL schemas and prints the diff. Schemas can be loaded
/// from a file, from a URL (schema string) or from a GraphQL endpoint.
#[derive(Debug, Parser)]
#[command(version, about, long_about)]
struct Cli {
    /// File path to a GraphQL IDL file of the `from` schema
    #[arg(long = "fromFile", value_name = "FILE")]
    from_file: Option<String>,

    /// URL of GraphQL IDL file of the `from` schema
    #[arg(long = "fromUrl", alias = "fromURL", value_name = "URL")]
    from_url: Option<String>,

    /// URL of the GraphQL endpoint that will be used to extract the `from` schema
    #[arg(long = "fromGraphql", value_name = "URL")]
    from_graphql: Option<String>,

    /// File path to a GraphQL IDL file of the `to` schema
    #[arg(long = "toFile", value_name = "FILE")]
    to_file: Option<String>,

    /// URL of GraphQL IDL file of the `to` schema
    #[arg(long = "toUrl", alias = "toURL", value_name = "URL")]
    to_url: Option<String>,

    /// URL of the GraphQL endpoint that will be used to extract the `to` schema
    #[arg(long = "toGraphql", value_name = "URL")]
    to_graphql: Option<String>,

    /// Extra header sent to GraphQL endpoints, as "Name: value"
    #[arg(long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[derive(Debug)]
struct Options {
    from: Option<SchemaSource>,
    to: Option<SchemaSource>,
    headers: Vec<(String, String)>,
    color: bool,
}

// Headers are checked after parsing so `--help` is never blocked by a bad one.
impl TryFrom<Cli> for Options {
    type Error = String;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let headers = cli
            .headers
            .iter()
            .map(|raw| parse_header(raw))
            .collect::<Result<_, _>>()?;
        let color = match cli.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
        };
        Ok(Self {
            from: resolve_source(
                cli.from_file.as_deref(),
                cli.from_url.as_deref(),
                cli.from_graphql.as_deref(),
            ),
            to: resolve_source(
                cli.to_file.as_deref(),
                cli.to_url.as_deref(),
                cli.to_graphql.as_deref(),
            ),
            headers,
            color,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

async fn run(
    from: &SchemaSource,
    to: &SchemaSource,
    options: &Options,
) -> Result<String, CompareError> {
    let client = reqwest::Client::new();
    let comparison = compare::diff_schemas(
        loader::load(&client, from, &options.headers),
        loader::load(&client, to, &options.headers),
    )
    .await?;
    Ok(report::render(&comparison, options.color))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let options = match Options::try_from(Cli::parse()) {
        Ok(options) => options,
        Err(message) => Cli::command()
            .error(ErrorKind::ValueValidation, format!("invalid value for '--header': {message}"))
            .exit(),
    };
    colored::control::set_override(options.color);

    let (Some(from), Some(to)) = (&options.from, &options.to) else {
        eprintln!("You must define both the `from` and `to` schemas");
        return ExitCode::from(2);
    };

    println!("\n{}", report::comparing_line(from, to, options.color));
    tracing::debug!(%from, %to, "comparing schemas");

    match run(from, to, &options).await {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
