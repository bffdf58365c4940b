use async_trait::async_trait;
use atelier_application::ComposerBackend;
use atelier_core::{AppError, AppResult};
use atelier_domain::{BlueprintInstance, ContentBlueprint};
use serde_json::Value;
use tracing::warn;
use url::Url;


/// Composer backend talking to the content API over HTTP.
#[derive(Clone)]
pub struct HttpComposerBackend {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpComposerBackend {
    /// Creates a backend for the API served at `base_url`.
    pub fn new(http_client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid content API url '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "content API url '{base_url}' cannot be a base"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!("content API url '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> AppResult<Value> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|error| AppError::Unavailable(format!("GET {url} failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Unavailable(format!("GET {url} returned {status}")));
        }

        response.json::<Value>().await.map_err(|error| {
            AppError::Unavailable(format!("GET {url} returned an unreadable body: {error}"))
        })
    }
}

/// Decodes a JSON array, treating any other payload as an empty list.
fn decode_list<T>(url: &Url, payload: Value) -> AppResult<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    if !payload.is_array() {
        warn!(%url, "expected a JSON array, treating response as empty");
        return Ok(Vec::new());
    }

    serde_json::from_value(payload).map_err(|error| {
        AppError::Unavailable(format!("GET {url} returned malformed items: {error}"))
    })
}

#[async_trait]
impl ComposerBackend for HttpComposerBackend {
    async fn load_blueprints(&self) -> AppResult<Vec<ContentBlueprint>> {
        let url = self.endpoint(&["api", "blueprints"])?;
        let payload = self.get_json(url.clone()).await?;
        decode_list(&url, payload)
    }

    async fn load_instances(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>> {
        let url = self.endpoint(&["api", "pages", page_id, "components"])?;
        let payload = self.get_json(url.clone()).await?;
        decode_list(&url, payload)
    }

    async fn save_instances(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<Vec<BlueprintInstance>> {
        let url = self.endpoint(&["api", "pages", page_id, "components"])?;
        let response = self
            .http_client
            .put(url.clone())
            .json(&instances)
            .send()
            .await
            .map_err(|error| AppError::Unavailable(format!("PUT {url} failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Unavailable(format!(
                "PUT {url} returned {status}: {body}"
            )));
        }

        response
            .json::<Vec<BlueprintInstance>>()
            .await
            .map_err(|error| {
                AppError::Unavailable(format!("PUT {url} returned malformed items: {error}"))
            })
    }
}
