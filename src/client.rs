use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use url::Url;

use crate::error::{Result, TeamAdminError};
use crate::types::{Team, TeamDraft, TeamId};

const TEAMS_PATH: &str = "teams";

/// Team collection operations offered by the backend
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TeamApi: Send + Sync {
    /// GET /teams/
    async fn list(&self) -> Result<Vec<Team>>;

    /// GET /teams/{id}
    async fn get(&self, id: &TeamId) -> Result<Team>;

    /// POST /teams
    async fn create(&self, draft: &TeamDraft) -> Result<()>;

    /// PUT /teams/{id}
    async fn update(&self, id: &TeamId, draft: &TeamDraft) -> Result<()>;

    /// DELETE /teams/{id}
    async fn delete(&self, id: &TeamId) -> Result<()>;
}

pub struct TeamsClient {
    http: Client,
    base_url: Url,
}

impl TeamsClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Append path segments to the base URL, keeping any prefix it already has.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn collection_url(&self) -> Url {
        // The listing route is registered with a trailing slash.
        self.endpoint(&[TEAMS_PATH, ""])
    }

    fn create_url(&self) -> Url {
        self.endpoint(&[TEAMS_PATH])
    }

    fn item_url(&self, id: &TeamId) -> Url {
        self.endpoint(&[TEAMS_PATH, id.as_str()])
    }

    async fn send(&self, method: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, response.url(), status.as_u16());

        if !status.is_success() {
            return Err(TeamAdminError::Api {
                status: status.as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl TeamApi for TeamsClient {
    async fn list(&self) -> Result<Vec<Team>> {
        let url = self.collection_url();
        tracing::debug!("GET {}", url);

        let response = self.send("GET", self.http.get(url)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get(&self, id: &TeamId) -> Result<Team> {
        let url = self.item_url(id);
        tracing::debug!("GET {}", url);

        let response = match self.send("GET", self.http.get(url)).await {
            Err(TeamAdminError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(TeamAdminError::TeamNotFound(id.to_string()));
            }
            other => other?,
        };
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create(&self, draft: &TeamDraft) -> Result<()> {
        let url = self.create_url();
        tracing::debug!("POST {}", url);

        self.send("POST", self.http.post(url).json(draft)).await?;
        Ok(())
    }

    async fn update(&self, id: &TeamId, draft: &TeamDraft) -> Result<()> {
        let url = self.item_url(id);
        tracing::debug!("PUT {}", url);

        self.send("PUT", self.http.put(url).json(draft)).await?;
        Ok(())
    }

    async fn delete(&self, id: &TeamId) -> Result<()> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);

        self.send("DELETE", self.http.delete(url)).await?;
        Ok(())
    }
}
