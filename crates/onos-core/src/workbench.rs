// ── Request workbench ──
//
// Pure in-memory CRUD over saved API requests and named collections.
// Nothing here touches the network, and nothing persists across the
// process except through explicit export/import of collection files.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use onos_api::HttpMethod;

use crate::error::CoreError;

// ── Data model ───────────────────────────────────────────────────────

/// One editable HTTP request.
///
/// `url` holds a controller-relative endpoint template (e.g.
/// `/devices/{deviceId}`) when driven through the passthrough accessor.
/// The `body` is raw JSON text, not parsed until send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl ApiRequest {
    /// A fresh draft with the fixed JSON headers pre-filled. The id is
    /// a placeholder until the request is added to a collection, which
    /// re-assigns it.
    pub fn draft(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_owned(), "application/json".to_owned());
        headers.insert("Content-Type".to_owned(), "application/json".to_owned());

        Self {
            id: Utc::now().timestamp_millis().to_string(),
            name: name.into(),
            method,
            url: url.into(),
            headers,
            body: None,
            params: BTreeMap::new(),
        }
    }
}

/// A named, ordered group of saved requests.
///
/// All fields take serde defaults so that any JSON object imports;
/// shape beyond JSON-parseability is deliberately not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCollection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub requests: Vec<ApiRequest>,
}

/// The serialized form of an export: pretty JSON plus the artifact name.
#[derive(Debug, Clone)]
pub struct CollectionExport {
    pub file_name: String,
    pub json: String,
}

// ── Store ────────────────────────────────────────────────────────────

/// In-memory collection list. Every operation is synchronous and
/// atomic; ids are millisecond timestamps made collision-free by a
/// monotonic bump.
#[derive(Debug, Default)]
pub struct CollectionStore {
    collections: Vec<ApiCollection>,
    last_id: i64,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        if candidate <= self.last_id {
            candidate = self.last_id + 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }

    pub fn collections(&self) -> &[ApiCollection] {
        &self.collections
    }

    pub fn collection(&self, id: &str) -> Option<&ApiCollection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Create an empty collection. Blank or whitespace-only names are a
    /// no-op: `None` is returned and the list is unchanged.
    pub fn create_collection(&mut self, name: &str) -> Option<String> {
        if name.trim().is_empty() {
            return None;
        }
        let id = self.next_id();
        self.collections.push(ApiCollection {
            id: id.clone(),
            name: name.to_owned(),
            requests: Vec::new(),
        });
        Some(id)
    }

    /// Append a copy of `request` with a freshly generated id. Returns
    /// the new id, or `None` (no-op) when the collection is absent.
    pub fn add_request(&mut self, collection_id: &str, request: &ApiRequest) -> Option<String> {
        if self.collection(collection_id).is_none() {
            return None;
        }
        let id = self.next_id();
        let collection = self
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)?;
        let mut copy = request.clone();
        copy.id = id.clone();
        collection.requests.push(copy);
        Some(id)
    }

    /// Filter the named request out. No-op if either id is absent.
    pub fn remove_request(&mut self, collection_id: &str, request_id: &str) -> bool {
        let Some(collection) = self.collections.iter_mut().find(|c| c.id == collection_id) else {
            return false;
        };
        let before = collection.requests.len();
        collection.requests.retain(|r| r.id != request_id);
        collection.requests.len() != before
    }

    /// Remove the collection entirely. No-op if absent.
    pub fn delete_collection(&mut self, collection_id: &str) -> bool {
        let before = self.collections.len();
        self.collections.retain(|c| c.id != collection_id);
        self.collections.len() != before
    }

    /// Serialize a collection to a downloadable artifact:
    /// pretty-printed JSON named `{collection.name}.json`.
    pub fn export(collection: &ApiCollection) -> Result<CollectionExport, CoreError> {
        let json = serde_json::to_string_pretty(collection)
            .map_err(|e| CoreError::Internal(format!("collection serialization failed: {e}")))?;
        Ok(CollectionExport {
            file_name: format!("{}.json", collection.name),
            json,
        })
    }

    /// Parse and append an imported collection, assigning a fresh id so
    /// it cannot collide with an existing one. On parse failure the
    /// store is left untouched.
    pub fn import(&mut self, json: &str) -> Result<String, CoreError> {
        let mut collection: ApiCollection =
            serde_json::from_str(json).map_err(|e| CoreError::Import {
                message: format!("not a valid collection file: {e}"),
            })?;
        let id = self.next_id();
        collection.id = id.clone();
        self.collections.push(collection);
        Ok(id)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store_with_collection() -> (CollectionStore, String) {
        let mut store = CollectionStore::new();
        let id = store.create_collection("onos basics").expect("created");
        (store, id)
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut store = CollectionStore::new();
        assert!(store.create_collection("").is_none());
        assert!(store.create_collection("   ").is_none());
        assert!(store.collections().is_empty());
    }

    #[test]
    fn ids_are_unique_even_within_one_millisecond() {
        let mut store = CollectionStore::new();
        let a = store.create_collection("a").expect("a");
        let b = store.create_collection("b").expect("b");
        assert_ne!(a, b);
    }

    #[test]
    fn add_then_remove_round_trips() {
        let (mut store, collection_id) = store_with_collection();
        let draft = ApiRequest::draft("list devices", HttpMethod::Get, "/devices");
        let before = store.collection(&collection_id).expect("col").requests.clone();

        let fresh_id = store.add_request(&collection_id, &draft).expect("added");
        assert_ne!(fresh_id, draft.id, "insertion must re-assign the id");

        // Removing by the original draft id does nothing...
        assert!(!store.remove_request(&collection_id, &draft.id));
        // ...removing by the returned id restores the prior content.
        assert!(store.remove_request(&collection_id, &fresh_id));
        assert_eq!(store.collection(&collection_id).expect("col").requests, before);
    }

    #[test]
    fn add_to_missing_collection_is_noop() {
        let (mut store, _) = store_with_collection();
        let draft = ApiRequest::draft("x", HttpMethod::Get, "/");
        assert!(store.add_request("no-such-id", &draft).is_none());
    }

    #[test]
    fn export_import_keeps_content_but_not_id() {
        let (mut store, collection_id) = store_with_collection();
        let draft = ApiRequest::draft("list flows", HttpMethod::Get, "/flows/{deviceId}");
        store.add_request(&collection_id, &draft).expect("added");

        let original = store.collection(&collection_id).expect("col").clone();
        let export = CollectionStore::export(&original).expect("export");
        assert_eq!(export.file_name, "onos basics.json");

        let imported_id = store.import(&export.json).expect("import");
        let imported = store.collection(&imported_id).expect("imported");

        assert_ne!(imported.id, original.id);
        assert_eq!(imported.name, original.name);
        assert_eq!(imported.requests, original.requests);
    }

    #[test]
    fn malformed_import_leaves_store_unchanged() {
        let (mut store, _) = store_with_collection();
        let result = store.import("{not valid json");
        assert!(matches!(result, Err(CoreError::Import { .. })));
        assert_eq!(store.collections().len(), 1);
    }

    #[test]
    fn import_does_not_validate_shape_beyond_json() {
        let mut store = CollectionStore::new();
        // Valid JSON object with none of the expected fields: accepted,
        // defaults fill in.
        let id = store.import(r#"{ "comment": "oops" }"#).expect("import");
        let collection = store.collection(&id).expect("col");
        assert_eq!(collection.name, "");
        assert!(collection.requests.is_empty());
    }

    #[test]
    fn delete_collection_removes_it() {
        let (mut store, collection_id) = store_with_collection();
        assert!(store.delete_collection(&collection_id));
        assert!(!store.delete_collection(&collection_id));
        assert!(store.collections().is_empty());
    }
}
