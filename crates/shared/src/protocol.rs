use serde::{Deserialize, Serialize};

use crate::domain::{ArticleLength, ArticleType, Language, ProjectFolderId, Tone};

pub const GENERATE_ARTICLE_STRUCTURE_ROUTE: &str = "/generate-article-structure";
pub const PROJECT_FOLDERS_ROUTE: &str = "/project-folders";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateArticleRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateArticleResponse {
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFolderQuery {
    pub user_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectFolderRequest {
    pub user_email: String,
    pub name: String,
}

/// Everything the article form collected, handed to the embedding application on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSubmission {
    pub title: String,
    pub article_type: ArticleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectFolderId>,
    pub keywords: String,
    pub description: String,
    pub tone: Tone,
    pub length: ArticleLength,
    pub language: Language,
    pub include_images: bool,
    pub include_videos: bool,
    pub include_sources: bool,
    pub enable_web_search: bool,
    pub number_of_sources: u8,
}
