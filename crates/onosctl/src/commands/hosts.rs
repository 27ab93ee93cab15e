//! Host command handlers.

use tabled::Tabled;

use onos_core::{Controller, Host};

use crate::cli::{GlobalOpts, HostsArgs, HostsCommand};
use crate::error::CliError;
use crate::output;

use super::devices::warn_if_degraded;

#[derive(Tabled)]
struct HostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "IPs")]
    ips: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&Host> for HostRow {
    fn from(h: &Host) -> Self {
        let location = h
            .locations
            .first()
            .map_or_else(String::new, |l| format!("{}/{}", l.element_id, l.port));
        Self {
            id: h.id.clone(),
            mac: h.mac.clone(),
            vlan: h.vlan.clone(),
            ips: h.ip_addresses.join(", "),
            location,
        }
    }
}

pub async fn handle(
    controller: &Controller,
    args: HostsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        HostsCommand::List => {
            let response = controller.hosts().await?;
            warn_if_degraded(response.success, response.error.as_deref());
            let out = output::render_list(
                &global.output,
                &response.data,
                |h| HostRow::from(h),
                |h| h.id.clone(),
            );
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}
