//! Link command handlers.

use tabled::Tabled;

use onos_core::{Controller, Link};

use crate::cli::{GlobalOpts, LinksArgs, LinksCommand};
use crate::error::CliError;
use crate::output;

use super::devices::warn_if_degraded;

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "Src")]
    src: String,
    #[tabled(rename = "Dst")]
    dst: String,
    #[tabled(rename = "Type")]
    ltype: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&Link> for LinkRow {
    fn from(l: &Link) -> Self {
        Self {
            src: format!("{}/{}", l.src.device, l.src.port),
            dst: format!("{}/{}", l.dst.device, l.dst.port),
            ltype: l.link_type.clone(),
            state: l.state.clone(),
        }
    }
}

pub async fn handle(
    controller: &Controller,
    args: LinksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LinksCommand::List => {
            let response = controller.links().await?;
            warn_if_degraded(response.success, response.error.as_deref());
            let out = output::render_list(&global.output, &response.data, |l| LinkRow::from(l), |l| {
                format!("{}/{} -> {}/{}", l.src.device, l.src.port, l.dst.device, l.dst.port)
            });
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}
