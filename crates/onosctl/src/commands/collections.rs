//! Collection file management.
//!
//! The store itself is in-memory only; every mutating command is an
//! import, one store operation, and an export back to the file.

use std::path::{Path, PathBuf};

use tabled::Tabled;

use onos_core::{ApiRequest, CollectionStore};

use crate::cli::{CollectionsArgs, CollectionsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::request::parse_method;

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&ApiRequest> for RequestRow {
    fn from(r: &ApiRequest) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            method: r.method.to_string(),
            url: r.url.clone(),
        }
    }
}

pub fn handle(args: CollectionsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        CollectionsCommand::Create { name, file } => create(&name, file, global),
        CollectionsCommand::List { file } => list(&file, global),
        CollectionsCommand::Add {
            file,
            name,
            method,
            url,
            headers,
            params,
            body,
        } => {
            let mut request = ApiRequest::draft(name, parse_method(&method)?, url);
            request.headers.extend(headers);
            request.params = params.into_iter().collect();
            request.body = body;
            add(&file, &request, global)
        }
        CollectionsCommand::Remove { file, request_id } => remove(&file, &request_id, global),
    }
}

fn create(name: &str, file: Option<PathBuf>, global: &GlobalOpts) -> Result<(), CliError> {
    let mut store = CollectionStore::new();
    let id = store
        .create_collection(name)
        .ok_or_else(|| CliError::Validation {
            field: "name".into(),
            reason: "collection name must not be blank".into(),
        })?;

    let collection = store
        .collection(&id)
        .expect("freshly created collection is present");
    let export = CollectionStore::export(collection).map_err(CliError::from)?;
    let path = file.unwrap_or_else(|| PathBuf::from(&export.file_name));

    std::fs::write(&path, export.json)?;
    output::print_output(&format!("created collection at {}", path.display()), global.quiet);
    Ok(())
}

fn list(file: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let (store, id) = load(file)?;
    let collection = store.collection(&id).expect("imported collection is present");

    let out = output::render_list(
        &global.output,
        &collection.requests,
        |r| RequestRow::from(r),
        |r| r.id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn add(file: &Path, request: &ApiRequest, global: &GlobalOpts) -> Result<(), CliError> {
    let (mut store, id) = load(file)?;
    let request_id = store
        .add_request(&id, request)
        .expect("imported collection is present");

    write_back(&store, &id, file)?;
    output::print_output(&format!("added request {request_id}"), global.quiet);
    Ok(())
}

fn remove(file: &Path, request_id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let (mut store, id) = load(file)?;
    if !store.remove_request(&id, request_id) {
        return Err(CliError::NotFound {
            resource_type: "request".into(),
            identifier: request_id.to_owned(),
            list_command: format!("collections list {}", file.display()),
        });
    }

    write_back(&store, &id, file)?;
    output::print_output(&format!("removed request {request_id}"), global.quiet);
    Ok(())
}

// ── File round trip ─────────────────────────────────────────────────

fn load(file: &Path) -> Result<(CollectionStore, String), CliError> {
    let contents = std::fs::read_to_string(file)?;
    let mut store = CollectionStore::new();
    let id = store.import(&contents).map_err(CliError::from)?;
    Ok((store, id))
}

fn write_back(store: &CollectionStore, id: &str, file: &Path) -> Result<(), CliError> {
    let collection = store.collection(id).expect("imported collection is present");
    let export = CollectionStore::export(collection).map_err(CliError::from)?;
    std::fs::write(file, export.json)?;
    Ok(())
}
