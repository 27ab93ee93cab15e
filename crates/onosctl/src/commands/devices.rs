//! Device command handlers.

use tabled::Tabled;

use onos_core::{Controller, Device};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Mfr")]
    mfr: String,
    #[tabled(rename = "HW")]
    hw: String,
    #[tabled(rename = "SW")]
    sw: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.clone(),
            dtype: d.device_type.clone(),
            available: if d.available { "yes" } else { "no" }.into(),
            role: d.role.clone(),
            mfr: d.mfr.clone(),
            hw: d.hw.clone(),
            sw: d.sw.clone(),
        }
    }
}

fn detail(d: &Device) -> String {
    let mut lines = vec![
        format!("ID:        {}", d.id),
        format!("Type:      {}", d.device_type),
        format!("Available: {}", if d.available { "yes" } else { "no" }),
        format!("Role:      {}", d.role),
        format!("Mfr:       {}", d.mfr),
        format!("HW:        {}", d.hw),
        format!("SW:        {}", d.sw),
        format!("Serial:    {}", d.serial),
        format!("Driver:    {}", d.driver),
        format!("Chassis:   {}", d.chassis_id),
    ];
    if let Some(ref ports) = d.ports {
        lines.push(format!("Ports:     {}", ports.len()));
    }
    if let Some(ref text) = d.last_update_text {
        lines.push(format!("Freshness: {text}"));
    }
    lines.join("\n")
}

pub async fn handle(
    controller: &Controller,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let response = controller.devices().await?;
            warn_if_degraded(response.success, response.error.as_deref());
            let out = output::render_list(
                &global.output,
                &response.data,
                |d| DeviceRow::from(d),
                |d| d.id.clone(),
            );
            output::print_output(&out, global.quiet);
        }
        DevicesCommand::Get { device } => {
            let response = controller.device(&device).await?;
            warn_if_degraded(response.success, response.error.as_deref());
            let out = output::render_single(&global.output, &response.data, detail, |d| {
                d.id.clone()
            });
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

pub(super) fn warn_if_degraded(success: bool, error: Option<&str>) {
    if !success {
        tracing::warn!(
            error = error.unwrap_or("unknown"),
            "showing demo data, live fetch failed"
        );
    }
}
