//! Clap derive structures for the `onosctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// onosctl -- CLI for the ONOS SDN controller northbound REST API
#[derive(Debug, Parser)]
#[command(
    name = "onosctl",
    version,
    about = "Inspect and drive an ONOS SDN controller from the command line",
    long_about = "Query devices, hosts, links, and flows from an ONOS controller,\n\
        watch the topology, and fire arbitrary REST requests from saved\n\
        collection files.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller host (overrides config)
    #[arg(long, short = 'H', env = "ONOS_HOST", global = true)]
    pub host: Option<String>,

    /// Controller REST port (overrides config)
    #[arg(long, short = 'p', env = "ONOS_PORT", global = true)]
    pub port: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ONOSCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "ONOS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Serve canned demo data when the controller is unreachable
    #[arg(long, env = "ONOS_DEMO_FALLBACK", global = true)]
    pub demo_fallback: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect infrastructure devices (switches)
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List end-station hosts
    #[command(alias = "h")]
    Hosts(HostsArgs),

    /// List infrastructure links
    #[command(alias = "l")]
    Links(LinksArgs),

    /// List flow rules
    #[command(alias = "f")]
    Flows(FlowsArgs),

    /// Aggregate topology view (one-shot or polling)
    #[command(alias = "topo")]
    Topology(TopologyArgs),

    /// Test connectivity against the API root
    Ping,

    /// Fire ad-hoc or saved REST requests
    #[command(alias = "req")]
    Request(RequestArgs),

    /// Manage request collection files
    #[command(alias = "col")]
    Collections(CollectionsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES / HOSTS / LINKS / FLOWS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List all devices
    #[command(alias = "ls")]
    List,

    /// Get one device by id
    Get {
        /// Device id (e.g. of:0000000000000001)
        device: String,
    },
}

#[derive(Debug, Args)]
pub struct HostsArgs {
    #[command(subcommand)]
    pub command: HostsCommand,
}

#[derive(Debug, Subcommand)]
pub enum HostsCommand {
    /// List all hosts
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    #[command(subcommand)]
    pub command: LinksCommand,
}

#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// List all links
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct FlowsArgs {
    #[command(subcommand)]
    pub command: FlowsCommand,
}

#[derive(Debug, Subcommand)]
pub enum FlowsCommand {
    /// List flow rules, optionally scoped to one device
    #[command(alias = "ls")]
    List {
        /// Only flows installed on this device
        #[arg(long, short = 'd')]
        device: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOPOLOGY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TopologyArgs {
    /// Keep polling and print a summary after every refresh
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Poll cadence in seconds (with --watch)
    #[arg(long, short = 'i', requires = "watch")]
    pub interval: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REQUEST
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RequestArgs {
    #[command(subcommand)]
    pub command: RequestCommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestCommand {
    /// Fire an ad-hoc request at a controller-relative endpoint
    Send {
        /// Endpoint template, e.g. /devices/{deviceId}
        endpoint: String,

        /// HTTP method (GET, POST, PUT, DELETE; PATCH is rejected)
        #[arg(long, short = 'X', default_value = "GET")]
        method: String,

        /// Placeholder value as key=value (repeatable)
        #[arg(long = "param", short = 'P', value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Raw JSON body
        #[arg(long, short = 'd', conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
    },

    /// Execute a request saved in a collection file
    Run {
        /// Collection file (as produced by `collections create`)
        file: PathBuf,

        /// Request name or id within the collection
        request: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COLLECTIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CollectionsArgs {
    #[command(subcommand)]
    pub command: CollectionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CollectionsCommand {
    /// Create a new (empty) collection file
    Create {
        /// Collection name (must not be blank)
        name: String,

        /// Output path (default: "<NAME>.json" in the current directory)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// List the requests in a collection file
    #[command(alias = "ls")]
    List {
        /// Collection file
        file: PathBuf,
    },

    /// Add a request to a collection file
    Add {
        /// Collection file
        file: PathBuf,

        /// Request name
        #[arg(long, required = true)]
        name: String,

        /// HTTP method
        #[arg(long, short = 'X', default_value = "GET")]
        method: String,

        /// Endpoint template, e.g. /flows/{deviceId}
        #[arg(long, required = true)]
        url: String,

        /// Extra header as key=value (repeatable)
        #[arg(long = "header", value_parser = parse_key_val)]
        headers: Vec<(String, String)>,

        /// Placeholder value as key=value (repeatable)
        #[arg(long = "param", short = 'P', value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Raw JSON body
        #[arg(long, short = 'd')]
        body: Option<String>,
    },

    /// Remove a request from a collection file
    #[command(alias = "rm")]
    Remove {
        /// Collection file
        file: PathBuf,

        /// Request id to remove
        request_id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the current resolved configuration
    Show,

    /// Persist controller connection settings
    Set {
        /// Controller host
        #[arg(long)]
        host: Option<String>,

        /// Controller REST port
        #[arg(long)]
        port: Option<String>,
    },

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse a `key=value` argument.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_val_parsing() {
        assert_eq!(
            parse_key_val("deviceId=of:1"),
            Ok(("deviceId".to_owned(), "of:1".to_owned()))
        );
        assert_eq!(
            parse_key_val("k=v=w"),
            Ok(("k".to_owned(), "v=w".to_owned()))
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=v").is_err());
    }
}
