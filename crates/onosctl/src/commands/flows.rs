//! Flow rule command handlers.

use tabled::Tabled;

use onos_core::{Controller, Flow};

use crate::cli::{FlowsArgs, FlowsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::devices::warn_if_degraded;

#[derive(Tabled)]
struct FlowRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Table")]
    table: i64,
    #[tabled(rename = "Priority")]
    priority: i64,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "App")]
    app: String,
    #[tabled(rename = "Packets")]
    packets: i64,
}

impl From<&Flow> for FlowRow {
    fn from(f: &Flow) -> Self {
        Self {
            id: f.id.clone(),
            device: f.device_id.clone(),
            table: f.table_id,
            priority: f.priority,
            state: f.state.clone(),
            app: f.app_id.clone(),
            packets: f.packets,
        }
    }
}

pub async fn handle(
    controller: &Controller,
    args: FlowsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FlowsCommand::List { device } => {
            let response = controller.flows(device.as_deref()).await?;
            warn_if_degraded(response.success, response.error.as_deref());
            let out = output::render_list(
                &global.output,
                &response.data,
                |f| FlowRow::from(f),
                |f| f.id.clone(),
            );
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}
