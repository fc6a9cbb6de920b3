// API client module: a small blocking HTTP client for the menu backend.
// It only moves bytes; deciding what a status code means is left to the
// seeder, which talks to the backend through the `MenuBackend` trait so
// it can be driven by a fake in tests.

use crate::catalog::{NewCategory, NewMenuItem};
use crate::error::ApiError;
use crate::images;
use reqwest::blocking::{multipart, Client, Response};
use reqwest::header::LOCATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Timeout for the reachability probe at startup.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for a single image upload.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// What came back from the backend, reduced to the parts the seeder
/// branches on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
    pub location: Option<String>,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiReply { status, body: body.into(), location: None }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// First `max_chars` characters of the body, for status lines.
    pub fn snippet(&self, max_chars: usize) -> String {
        self.body.chars().take(max_chars).collect()
    }

    /// Last path segment of the `Location` header, if any.
    pub fn location_id(&self) -> Option<String> {
        let location = self.location.as_deref()?.trim_end_matches('/');
        let id = location.rsplit('/').next()?;
        (!id.is_empty()).then(|| id.to_string())
    }

    fn read(res: Response) -> Result<Self, ApiError> {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = res.text()?;
        Ok(ApiReply { status, body, location })
    }
}

/// Category as listed by `GET /categories`. The backend returns GUIDs but
/// we keep `id` as a `serde_json::Value` so numeric ids parse too. Both
/// fields default so one malformed entry is skipped on its own instead of
/// failing the whole listing.
#[derive(Deserialize, Debug, Clone)]
pub struct RemoteCategory {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
}

/// Response of `POST /menuitems/{id}/image`.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploaded {
    pub image_url: Option<String>,
}

/// Render a JSON id as the string used in URLs and request bodies.
/// Null, empty strings and non-scalar values count as missing.
pub fn id_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The calls the seeder makes against the backend.
pub trait MenuBackend {
    /// Base URL, for banners and hints.
    fn target(&self) -> &str;

    /// `GET /categories` with a short timeout; returns the status code.
    fn probe(&self) -> Result<u16, ApiError>;

    fn list_categories(&self) -> Result<ApiReply, ApiError>;

    fn create_category(&self, body: &NewCategory) -> Result<ApiReply, ApiError>;

    fn create_menu_item(&self, body: &NewMenuItem) -> Result<ApiReply, ApiError>;

    fn upload_image(&self, menu_item_id: &str, image: &Path) -> Result<ApiReply, ApiError>;
}

/// Blocking reqwest client bound to one backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` (the backend's `/api` root). A
    /// trailing slash is dropped so paths can be appended directly.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl MenuBackend for ApiClient {
    fn target(&self) -> &str {
        &self.base_url
    }

    fn probe(&self) -> Result<u16, ApiError> {
        let url = self.url("categories");
        debug!(%url, "probing backend");
        let res = self.client.get(&url).timeout(PROBE_TIMEOUT).send()?;
        Ok(res.status().as_u16())
    }

    fn list_categories(&self) -> Result<ApiReply, ApiError> {
        let url = self.url("categories");
        debug!(%url, "listing categories");
        ApiReply::read(self.client.get(&url).send()?)
    }

    fn create_category(&self, body: &NewCategory) -> Result<ApiReply, ApiError> {
        let url = self.url("categories");
        debug!(%url, name = %body.name, "creating category");
        ApiReply::read(self.client.post(&url).json(body).send()?)
    }

    fn create_menu_item(&self, body: &NewMenuItem) -> Result<ApiReply, ApiError> {
        let url = self.url("menuitems");
        debug!(%url, name = %body.name, category_id = %body.category_id, "creating menu item");
        ApiReply::read(self.client.post(&url).json(body).send()?)
    }

    /// Upload `image` as multipart field `image`, named after the file and
    /// typed by its extension.
    fn upload_image(&self, menu_item_id: &str, image: &Path) -> Result<ApiReply, ApiError> {
        let url = self.url(&format!("menuitems/{menu_item_id}/image"));
        let file = File::open(image).map_err(|source| ApiError::ImageRead {
            path: image.to_path_buf(),
            source,
        })?;
        let file_name = image
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("image")
            .to_string();

        let part = multipart::Part::reader(file)
            .file_name(file_name)
            .mime_str(images::content_type(image))?;
        let form = multipart::Form::new().part("image", part);

        debug!(%url, image = %image.display(), "uploading image");
        let res = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()?;
        ApiReply::read(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_id_takes_last_segment() {
        let reply = ApiReply::new(201, "").with_location("http://h/api/menuitems/abc-123/");
        assert_eq!(reply.location_id().as_deref(), Some("abc-123"));
        assert_eq!(ApiReply::new(201, "").location_id(), None);
        assert_eq!(ApiReply::new(201, "").with_location("/").location_id(), None);
    }

    #[test]
    fn snippet_counts_characters() {
        let reply = ApiReply::new(500, "ééééé");
        assert_eq!(reply.snippet(3), "ééé");
        assert_eq!(reply.snippet(50), "ééééé");
    }

    #[test]
    fn id_string_accepts_strings_and_numbers() {
        assert_eq!(id_string(&json!("a1")).as_deref(), Some("a1"));
        assert_eq!(id_string(&json!(42)).as_deref(), Some("42"));
        assert_eq!(id_string(&json!("")), None);
        assert_eq!(id_string(&json!(null)), None);
        assert_eq!(id_string(&json!({"x": 1})), None);
    }

    #[test]
    fn listed_category_without_id_still_decodes() {
        let listed: Vec<RemoteCategory> =
            serde_json::from_str(r#"[{"id":"g-1","name":"Sandwiches"},{"name":"Stray"},{"id":"g-9"}]"#)
                .unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed[1].id.is_null());
        assert_eq!(listed[2].name, "");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:5267/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.target(), "http://localhost:5267/api");
        assert_eq!(client.url("categories"), "http://localhost:5267/api/categories");
    }
}
