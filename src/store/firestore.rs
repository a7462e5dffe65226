//! Firestore REST v1 record store
//!
//! Talks to `projects/{project}/databases/(default)/documents` with a blocking
//! reqwest client: paginated list, `:runQuery` equality filters, single-field
//! PATCH with an update mask, and DELETE.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::value_codec::{decode_fields, encode_value};
use super::RecordStore;
use crate::config::FirestoreSettings;
use crate::types::{AdminError, Document, Result};

/// Documents per list page (Firestore caps at 300)
const PAGE_SIZE: u32 = 300;

/// Firestore-backed record store
pub struct FirestoreStore {
    client: Client,
    settings: FirestoreSettings,
}

impl FirestoreStore {
    pub fn new(settings: FirestoreSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AdminError::Store(format!("HTTP client error: {}", e)))?;
        Ok(Self { client, settings })
    }

    /// `.../projects/{p}/databases/(default)/documents`
    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.project_id
        )
    }

    fn collection_url(&self, collection: &str) -> Result<String> {
        check_segment(collection)?;
        Ok(format!("{}/{}", self.documents_url(), collection))
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<String> {
        check_segment(id)?;
        Ok(format!("{}/{}", self.collection_url(collection)?, id))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut req = self.client.request(method, url);
        if let Some(key) = &self.settings.api_key {
            req = req.query(&[("key", key)]);
        }
        if let Some(token) = &self.settings.bearer_token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn send(req: RequestBuilder) -> Result<Response> {
        req.send()
            .map_err(|e| AdminError::Store(format!("HTTP request failed: {}", e)))
    }

    fn read_json(resp: Response) -> Result<Value> {
        resp.json()
            .map_err(|e| AdminError::Decode(format!("JSON parse error: {}", e)))
    }
}

impl RecordStore for FirestoreStore {
    fn name(&self) -> &str {
        "firestore"
    }

    fn fetch_all(&self, collection: &str) -> Result<Vec<Document>> {
        let url = self.collection_url(collection)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .request(Method::GET, &url)
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token)]);
            }

            let resp = ensure_success(Self::send(req)?, collection, None)?;
            let body = Self::read_json(resp)?;
            let (page, next) = parse_list_response(&body)?;
            debug!(collection, page_len = page.len(), "fetched page");
            documents.extend(page);

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(collection, count = documents.len(), "fetched collection");
        Ok(documents)
    }

    fn fetch_where(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>> {
        check_segment(collection)?;
        let url = format!("{}:runQuery", self.documents_url());
        let req = self
            .request(Method::POST, &url)
            .json(&build_equality_query(collection, field, value));

        let resp = ensure_success(Self::send(req)?, collection, None)?;
        let body = Self::read_json(resp)?;
        let documents = parse_query_response(&body)?;
        info!(collection, field, count = documents.len(), "queried collection");
        Ok(documents)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let url = self.document_url(collection, id)?;
        let resp = Self::send(self.request(Method::GET, &url))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = ensure_success(resp, collection, Some(id))?;
        parse_document(&Self::read_json(resp)?).map(Some)
    }

    fn update_field(&self, collection: &str, id: &str, field: &str, value: Value) -> Result<()> {
        let url = self.document_url(collection, id)?;
        let mut fields = Map::new();
        fields.insert(field.to_string(), encode_value(&value));

        let req = self
            .request(Method::PATCH, &url)
            .query(&[
                ("updateMask.fieldPaths", field),
                ("currentDocument.exists", "true"),
            ])
            .json(&json!({ "fields": fields }));

        ensure_success(Self::send(req)?, collection, Some(id))?;
        info!(collection, id, field, "updated document field");
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let url = self.document_url(collection, id)?;
        let req = self
            .request(Method::DELETE, &url)
            .query(&[("currentDocument.exists", "true")]);
        ensure_success(Self::send(req)?, collection, Some(id))?;
        info!(collection, id, "deleted document");
        Ok(())
    }
}

/// Map HTTP failures onto store errors. A failed precondition on a document
/// request means the document does not exist.
fn ensure_success(resp: Response, collection: &str, id: Option<&str>) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if let Some(id) = id {
        if status == StatusCode::NOT_FOUND || status == StatusCode::PRECONDITION_FAILED {
            return Err(AdminError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
    }

    let body = resp.text().unwrap_or_default();
    Err(AdminError::Store(format!(
        "{} {} failed: {}",
        status.as_u16(),
        collection,
        error_message(&body)
    )))
}

/// Extract `error.message` from a Firestore error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Reject ids that would escape their path segment
fn check_segment(segment: &str) -> Result<()> {
    if segment.is_empty() || segment.contains('/') {
        return Err(AdminError::Store(format!(
            "invalid document path segment: {:?}",
            segment
        )));
    }
    Ok(())
}

/// Convert one Firestore document resource into a [`Document`]
pub(crate) fn parse_document(resource: &Value) -> Result<Document> {
    let name = resource["name"]
        .as_str()
        .ok_or_else(|| AdminError::Decode("document without name".into()))?;
    let id = name.rsplit('/').next().unwrap_or(name);
    let fields = decode_fields(resource.get("fields"))?;
    Ok(Document::new(id, fields))
}

/// Parse a list response into documents plus the next page token
pub(crate) fn parse_list_response(body: &Value) -> Result<(Vec<Document>, Option<String>)> {
    let documents = match body.get("documents") {
        Some(Value::Array(items)) => items
            .iter()
            .map(parse_document)
            .collect::<Result<Vec<_>>>()?,
        _ => Vec::new(),
    };
    let next = body["nextPageToken"]
        .as_str()
        .filter(|t| !t.is_empty())
        .map(String::from);
    Ok((documents, next))
}

/// Parse a `:runQuery` response; entries without `document` carry only a read time
pub(crate) fn parse_query_response(body: &Value) -> Result<Vec<Document>> {
    let entries = body
        .as_array()
        .ok_or_else(|| AdminError::Decode("runQuery response is not an array".into()))?;
    entries
        .iter()
        .filter_map(|entry| entry.get("document"))
        .map(parse_document)
        .collect()
}

/// Structured query body for `field == value` over one collection
pub(crate) fn build_equality_query(collection: &str, field: &str, value: &Value) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": encode_value(value)
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FirestoreSettings {
        FirestoreSettings {
            project_id: "eventease-test".into(),
            api_key: Some("k".into()),
            bearer_token: None,
            base_url: "https://firestore.example.com/v1/".into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_urls() {
        let store = FirestoreStore::new(settings()).unwrap();
        assert_eq!(
            store.collection_url("Supplier").unwrap(),
            "https://firestore.example.com/v1/projects/eventease-test/databases/(default)/documents/Supplier"
        );
        assert!(store
            .document_url("Supplier", "abc123")
            .unwrap()
            .ends_with("/documents/Supplier/abc123"));
    }

    #[test]
    fn test_document_url_rejects_path_escape() {
        let store = FirestoreStore::new(settings()).unwrap();
        assert!(store.document_url("Supplier", "../Clients").is_err());
        assert!(store.document_url("Supplier", "").is_err());
    }

    #[test]
    fn test_parse_list_response() {
        let body = json!({
            "documents": [{
                "name": "projects/p/databases/(default)/documents/Ratings/r1",
                "fields": {
                    "serviceName": {"stringValue": "Catering"},
                    "rating": {"integerValue": "5"}
                },
                "createTime": "2024-01-01T00:00:00Z"
            }],
            "nextPageToken": "tok-2"
        });

        let (docs, next) = parse_list_response(&body).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "r1");
        assert_eq!(docs[0].get("rating"), Some(&json!(5)));
        assert_eq!(next.as_deref(), Some("tok-2"));
    }

    #[test]
    fn test_parse_empty_list_response() {
        let (docs, next) = parse_list_response(&json!({})).unwrap();
        assert!(docs.is_empty());
        assert!(next.is_none());
    }

    #[test]
    fn test_parse_query_response_skips_read_time_entries() {
        let body = json!([
            {"readTime": "2024-01-01T00:00:00Z"},
            {"document": {
                "name": "projects/p/databases/(default)/documents/Bookings/b7",
                "fields": {"status": {"stringValue": "Pending"}}
            }, "readTime": "2024-01-01T00:00:00Z"}
        ]);
        let docs = parse_query_response(&body).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "b7");
    }

    #[test]
    fn test_build_equality_query() {
        let q = build_equality_query("Bookings", "status", &json!("Pending"));
        let filter = &q["structuredQuery"]["where"]["fieldFilter"];
        assert_eq!(filter["field"]["fieldPath"], "status");
        assert_eq!(filter["op"], "EQUAL");
        assert_eq!(filter["value"]["stringValue"], "Pending");
        assert_eq!(q["structuredQuery"]["from"][0]["collectionId"], "Bookings");
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error": {"code": 403, "message": "Missing or insufficient permissions."}}"#;
        assert_eq!(error_message(body), "Missing or insufficient permissions.");
        assert_eq!(error_message("  gateway timeout \n"), "gateway timeout");
    }
}
