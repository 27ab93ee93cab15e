//! Ad-hoc and saved request execution through the passthrough accessor.

use std::collections::BTreeMap;

use onos_core::{ApiRequest, CollectionStore, Controller, HttpMethod};

use crate::cli::{GlobalOpts, RequestArgs, RequestCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    controller: &Controller,
    args: RequestArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let request = match args.command {
        RequestCommand::Send {
            endpoint,
            method,
            params,
            body,
            body_file,
        } => {
            let mut request = ApiRequest::draft("ad-hoc", parse_method(&method)?, endpoint);
            request.params = params.into_iter().collect::<BTreeMap<_, _>>();
            request.body = match body_file {
                Some(path) => Some(std::fs::read_to_string(path)?),
                None => body,
            };
            request
        }

        RequestCommand::Run { file, request } => {
            let contents = std::fs::read_to_string(&file)?;
            let mut store = CollectionStore::new();
            let collection_id = store.import(&contents).map_err(CliError::from)?;
            let collection = store
                .collection(&collection_id)
                .expect("freshly imported collection is present");

            collection
                .requests
                .iter()
                .find(|r| r.id == request || r.name == request)
                .cloned()
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "request".into(),
                    identifier: request.clone(),
                    list_command: format!("collections list {}", file.display()),
                })?
        }
    };

    let response = controller.send_request(&request).await?;
    let envelope = serde_json::to_value(&response)?;
    output::print_output(&output::render_value(&global.output, &envelope), global.quiet);
    Ok(())
}

pub(super) fn parse_method(raw: &str) -> Result<HttpMethod, CliError> {
    raw.parse::<HttpMethod>()
        .map_err(|_| CliError::UnsupportedMethod {
            method: raw.to_owned(),
        })
}
