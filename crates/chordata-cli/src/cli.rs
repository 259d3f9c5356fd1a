use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chordata",
    about = "Chordata - browse the schema and records of a typed object store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the inspector dashboard over HTTP
    Serve(ServeArgs),
    /// Print one snapshot of every entity and its sampled records
    Snapshot(SnapshotArgs),
    /// Print entity schemas and record counts without sampling
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// JSON store fixture to load (defaults to the bundled demo catalogue)
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Records sampled per entity (overrides the config file)
    #[arg(long)]
    pub cap: Option<usize>,
    /// Minutes east of UTC used to render dates (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,
}

#[derive(Args)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// Records sampled per entity
    #[arg(long, default_value_t = chordata_inspect::DEFAULT_SAMPLE_CAP)]
    pub cap: usize,
}

#[derive(Args)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "chordata",
            "serve",
            "--bind",
            "0.0.0.0:9090",
            "--cap",
            "25",
            "--utc-offset",
            "-300",
        ])
        .unwrap();
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind, Some("0.0.0.0:9090".parse().unwrap()));
                assert_eq!(args.cap, Some(25));
                assert_eq!(args.utc_offset, Some(-300));
                assert!(args.store.fixture.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["chordata", "snapshot", "--format", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Snapshot(args) => assert_eq!(args.cap, 100),
            _ => panic!("expected snapshot"),
        }
    }
}
