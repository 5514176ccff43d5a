use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::ProjectFolder,
    error::ApiError,
    protocol::{
        CreateProjectFolderRequest, GenerateArticleRequest, GenerateArticleResponse,
        ProjectFolderQuery, GENERATE_ARTICLE_STRUCTURE_ROUTE, PROJECT_FOLDERS_ROUTE,
    },
};
use thiserror::Error;
use url::Url;

use crate::folders::FolderSource;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
}

/// HTTP client for the article service endpoints.
#[derive(Debug, Clone)]
pub struct ArticleServiceClient {
    http: Client,
    base_url: Url,
}

impl ArticleServiceClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(server_url.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, route: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(route.trim_start_matches('/'))?)
    }

    pub async fn generate_article_structure(&self, prompt: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.endpoint(GENERATE_ARTICLE_STRUCTURE_ROUTE)?)
            .json(&GenerateArticleRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await?;
        let body: GenerateArticleResponse = ensure_success(response).await?.json().await?;
        Ok(body.result)
    }

    pub async fn list_project_folders(&self, owner: &str) -> Result<Vec<ProjectFolder>, ClientError> {
        let response = self
            .http
            .get(self.endpoint(PROJECT_FOLDERS_ROUTE)?)
            .query(&ProjectFolderQuery {
                user_email: owner.to_string(),
            })
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    pub async fn create_project_folder(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<ProjectFolder, ClientError> {
        let response = self
            .http
            .post(self.endpoint(PROJECT_FOLDERS_ROUTE)?)
            .json(&CreateProjectFolderRequest {
                user_email: owner.to_string(),
                name: name.to_string(),
            })
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl FolderSource for ArticleServiceClient {
    async fn list_project_folders(&self, owner: &str) -> anyhow::Result<Vec<ProjectFolder>> {
        Ok(ArticleServiceClient::list_project_folders(self, owner).await?)
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
