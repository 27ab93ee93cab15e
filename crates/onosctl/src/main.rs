mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use onos_core::{Controller, SettingsBus};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.quiet);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local-only commands never build a controller connection.
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Collections(args) => commands::collections::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "onosctl", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let (controller, cfg) = build_controller(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &controller, &cfg, &cli.global).await
        }
    }
}

/// Build a `Controller` from the config file layered with CLI overrides.
fn build_controller(
    global: &cli::GlobalOpts,
) -> Result<(Controller, onos_config::Config), CliError> {
    let mut cfg = onos_config::load_config_or_default();

    if let Some(ref host) = global.host {
        cfg.host.clone_from(host);
    }
    if let Some(ref port) = global.port {
        cfg.port.clone_from(port);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout_secs = timeout;
    }
    if global.demo_fallback {
        cfg.demo_fallback = true;
    }

    let bus = SettingsBus::new(cfg.connection_settings());
    let controller = Controller::new(
        &bus,
        cfg.credentials(),
        cfg.transport(),
        cfg.fetch_policy(),
    )?;
    Ok((controller, cfg))
}
