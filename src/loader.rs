use cynic_introspection::{IntrospectionQuery, SchemaError as IntrospectionError};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::path::Path;

use crate::introspection;
use crate::source::SchemaSource;

type LoadErrorLocation = String;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{0}': {1}")]
    Io(LoadErrorLocation, #[source] std::io::Error),
    #[error("request to '{0}' failed: {1}")]
    Http(LoadErrorLocation, #[source] reqwest::Error),
    #[error("'{0}' responded with status {1}")]
    Status(LoadErrorLocation, reqwest::StatusCode),
    #[error("invalid JSON from '{0}': {1}")]
    Json(LoadErrorLocation, #[source] serde_json::Error),
    #[error("'{0}' returned errors:\n{1}")]
    GraphQl(LoadErrorLocation, String),
    #[error("'{0}' returned no introspection data")]
    MissingData(LoadErrorLocation),
    #[error("invalid header: {0}")]
    Header(String),
    #[error("failed to convert introspection from '{0}': {1}")]
    Introspection(LoadErrorLocation, #[source] IntrospectionError),
}

#[derive(Deserialize)]
struct RawResponse {
    data: Option<serde_json::Value>,
    errors: Option<serde_json::Value>,
}

pub async fn load_file(path: &Path) -> Result<String, LoadError> {
    let path_str = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::Io(path_str.clone(), e))?;

    tracing::debug!(path = %path_str, bytes = content.len(), "read schema file");
    Ok(content)
}

pub async fn load_url(client: &Client, url: &str) -> Result<String, LoadError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::Http(url.to_string(), e))?;

    let status = response.status();
    tracing::debug!(url, %status, "fetched schema");
    if !status.is_success() {
        return Err(LoadError::Status(url.to_string(), status));
    }

    response
        .text()
        .await
        .map_err(|e| LoadError::Http(url.to_string(), e))
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, LoadError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| LoadError::Header(format!("'{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| LoadError::Header(format!("value of '{name}': {e}")))?;
        map.append(name, value);
    }
    map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(map)
}

/// Run the introspection query against a GraphQL endpoint and print the result
/// as SDL.
pub async fn load_endpoint(
    client: &Client,
    url: &str,
    headers: &[(String, String)],
) -> Result<String, LoadError> {
    let body = serde_json::to_string(&introspection::query())
        .map_err(|e| LoadError::Json(url.to_string(), e))?;
    let response = client
        .post(url)
        .headers(header_map(headers)?)
        .body(body)
        .send()
        .await
        .map_err(|e| LoadError::Http(url.to_string(), e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Http(url.to_string(), e))?;
    tracing::debug!(url, %status, bytes = body.len(), "introspection response");

    let raw: RawResponse = match serde_json::from_str(&body) {
        Ok(raw) => raw,
        Err(_) if !status.is_success() => return Err(LoadError::Status(url.to_string(), status)),
        Err(e) => return Err(LoadError::Json(url.to_string(), e)),
    };

    if let Some(errors) = raw.errors.filter(|e| !e.is_null()) {
        let rendered = serde_json::to_string_pretty(&errors)
            .map_err(|e| LoadError::Json(url.to_string(), e))?;
        return Err(LoadError::GraphQl(url.to_string(), rendered));
    }

    let Some(data) = raw.data.filter(|d| !d.is_null()) else {
        return Err(LoadError::MissingData(url.to_string()));
    };

    let data: IntrospectionQuery =
        serde_json::from_value(data).map_err(|e| LoadError::Json(url.to_string(), e))?;

    introspection::to_sdl(data).map_err(|e| LoadError::Introspection(url.to_string(), e))
}

pub async fn load(
    client: &Client,
    source: &SchemaSource,
    headers: &[(String, String)],
) -> Result<String, LoadError> {
    match source {
        SchemaSource::File(path) => load_file(path).await,
        SchemaSource::Url(url) => load_url(client, url).await,
        SchemaSource::Endpoint(url) => load_endpoint(client, url, headers).await,
    }
}
