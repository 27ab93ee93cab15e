//! Config command handlers.

use onos_config::{Config, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            show(global);
            Ok(())
        }
        ConfigCommand::Set { host, port } => set(host, port, global),
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn show(global: &GlobalOpts) {
    let mut cfg = load_config_or_default();
    // Never echo a stored password.
    if cfg.password.is_some() {
        cfg.password = Some("*****".into());
    }

    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => detail(&cfg),
        OutputFormat::Json => output::render_json_pretty(&cfg),
        OutputFormat::JsonCompact => output::render_json_compact(&cfg),
        OutputFormat::Yaml => output::render_yaml(&cfg),
    };
    output::print_output(&out, global.quiet);
}

fn set(host: Option<String>, port: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    if host.is_none() && port.is_none() {
        return Err(CliError::Validation {
            field: "set".into(),
            reason: "pass at least one of --host / --port".into(),
        });
    }

    let mut cfg = load_config_or_default();
    if let Some(host) = host {
        cfg.host = host;
    }
    if let Some(port) = port {
        cfg.port = port;
    }
    save_config(&cfg)?;

    output::print_output(
        &format!(
            "saved {} (controller: {})",
            config_path().display(),
            cfg.connection_settings().base_url()
        ),
        global.quiet,
    );
    Ok(())
}

fn detail(cfg: &Config) -> String {
    [
        format!("Host:          {}", cfg.host),
        format!("Port:          {}", cfg.port),
        format!("Base URL:      {}", cfg.connection_settings().base_url()),
        format!("Username:      {}", cfg.username),
        format!(
            "Password:      {}",
            cfg.password.as_deref().unwrap_or("(keyring/env/default)")
        ),
        format!("Timeout:       {}s", cfg.timeout_secs),
        format!("Poll interval: {}s", cfg.poll_interval_secs),
        format!("Demo fallback: {}", cfg.demo_fallback),
        format!("Config file:   {}", config_path().display()),
    ]
    .join("\n")
}
