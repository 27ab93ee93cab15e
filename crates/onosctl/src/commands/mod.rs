//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod collections;
pub mod config_cmd;
pub mod devices;
pub mod flows;
pub mod hosts;
pub mod links;
pub mod ping;
pub mod request;
pub mod topology;

use onos_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    cfg: &onos_config::Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(controller, args, global).await,
        Command::Hosts(args) => hosts::handle(controller, args, global).await,
        Command::Links(args) => links::handle(controller, args, global).await,
        Command::Flows(args) => flows::handle(controller, args, global).await,
        Command::Topology(args) => topology::handle(controller, args, cfg, global).await,
        Command::Ping => ping::handle(controller, global).await,
        Command::Request(args) => request::handle(controller, args, global).await,
        // Handled before dispatch in main::run.
        Command::Collections(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
