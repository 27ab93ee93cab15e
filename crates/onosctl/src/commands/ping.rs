//! Connection test against the API root.

use owo_colors::OwoColorize;

use onos_core::Controller;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let response = controller.ping().await?;

    if response.success {
        let msg = if output::should_color(&global.color) {
            format!("{} controller is reachable", "ok:".green().bold())
        } else {
            "ok: controller is reachable".to_owned()
        };
        output::print_output(&msg, global.quiet);
        return Ok(());
    }

    Err(CliError::ConnectionFailed {
        url: "controller API root".into(),
        source: response
            .error
            .unwrap_or_else(|| "connection test failed".into())
            .into(),
    })
}
