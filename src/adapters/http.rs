use crate::domain::model::{
    ListQuery, MatchId, MatchRequest, MatchResult, MatchesPage, SavedMatch, SelectedFile,
    UploadedResume,
};
use crate::domain::ports::{ConfigProvider, MatchApi};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const UPLOAD_ENDPOINT: &str = "api/upload-resume";
const MATCH_ENDPOINT: &str = "api/match";
const MATCHES_ENDPOINT: &str = "api/matches";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// `MatchApi` over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpMatchApi {
    client: Client,
    base_url: Url,
}

impl HttpMatchApi {
    /// `timeout: None` waits for the server indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // 確保相對路徑接在 base path 之後
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn match_endpoint(&self, id: MatchId) -> Result<Url> {
        self.endpoint(&format!("{MATCH_ENDPOINT}/{id}"))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "API response");

        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = Self::check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MatchApi for HttpMatchApi {
    async fn upload_resume(&self, file: &SelectedFile) -> Result<UploadedResume> {
        let url = self.endpoint(UPLOAD_ENDPOINT)?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.mime_type())?;
        let form = Form::new().part("file", part);

        tracing::debug!(%url, file = %file.name, "POST upload");
        let response = self.client.post(url).multipart(form).send().await?;
        Self::decode(response).await
    }

    async fn submit_match(&self, request: &MatchRequest) -> Result<MatchResult> {
        let url = self.endpoint(MATCH_ENDPOINT)?;
        tracing::debug!(%url, save = request.save, "POST match");
        let response = self.client.post(url).json(request).send().await?;
        Self::decode(response).await
    }

    async fn list_matches(&self, query: &ListQuery) -> Result<MatchesPage> {
        let mut url = self.endpoint(MATCHES_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("limit", &query.limit.to_string())
            .append_pair("order", query.order.as_str());

        tracing::debug!(%url, "GET matches");
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn get_match(&self, id: MatchId) -> Result<SavedMatch> {
        let url = self.match_endpoint(id)?;
        tracing::debug!(%url, "GET match");
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn delete_match(&self, id: MatchId) -> Result<()> {
        let url = self.match_endpoint(id)?;
        tracing::debug!(%url, "DELETE match");
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
