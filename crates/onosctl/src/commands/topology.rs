//! Topology command: one-shot aggregate or the polling loop.

use std::time::Duration;

use owo_colors::OwoColorize;

use onos_core::{ApiResponse, Controller, Topology};

use crate::cli::{GlobalOpts, OutputFormat, TopologyArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    controller: &Controller,
    args: TopologyArgs,
    cfg: &onos_config::Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !args.watch {
        let response = controller.topology().await?;
        print_snapshot(&response, global);
        return Ok(());
    }

    let interval = args
        .interval
        .map_or_else(|| cfg.poll_interval(), Duration::from_secs);
    watch(controller, interval, global).await;
    Ok(())
}

/// Poll until Ctrl-C. Failed cycles are logged by the poller and the
/// cadence continues; we only print when a fresh snapshot lands.
async fn watch(controller: &Controller, interval: Duration, global: &GlobalOpts) {
    let handle = controller.spawn_poller(interval);
    let mut refreshed = controller.store().subscribe_last_refresh();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = refreshed.changed() => {
                if changed.is_err() {
                    break;
                }
                let store = controller.store();
                let snapshot = Topology {
                    devices: store.devices_snapshot().as_ref().clone(),
                    links: store.links_snapshot().as_ref().clone(),
                    hosts: store.hosts_snapshot().as_ref().clone(),
                };
                print_snapshot(&ApiResponse::ok(snapshot), global);
            }
        }
    }

    controller.shutdown();
    let _ = handle.await;
}

fn print_snapshot(response: &ApiResponse<Topology>, global: &GlobalOpts) {
    match global.output {
        OutputFormat::Table | OutputFormat::Plain => {
            let color = output::should_color(&global.color);
            let status = if response.success {
                if color {
                    format!("{}", "ok".green())
                } else {
                    "ok".to_owned()
                }
            } else if color {
                format!("{}", "degraded".yellow())
            } else {
                "degraded".to_owned()
            };

            let topo = &response.data;
            let mut line = format!(
                "[{}] {} devices, {} links, {} hosts ({status})",
                chrono::Utc::now().format("%H:%M:%S"),
                topo.devices.len(),
                topo.links.len(),
                topo.hosts.len(),
            );
            if let Some(ref error) = response.error {
                line.push_str(&format!("\n  partial data: {error}"));
            }
            output::print_output(&line, global.quiet);
        }
        _ => {
            let out = output::render_value(
                &global.output,
                &serde_json::to_value(response).unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
        }
    }
}
