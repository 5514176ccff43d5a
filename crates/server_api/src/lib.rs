use std::sync::Arc;

use shared::{
    domain::ProjectFolder,
    error::{ApiException, ErrorCode, INTERNAL_ERROR_MESSAGE},
    protocol::GenerateArticleResponse,
};
use storage::Storage;
use tracing::error;

pub mod completion;

pub use completion::{
    CompletionError, CompletionProvider, OpenAiCompletionClient, COMPLETION_MODEL,
    DEFAULT_OPENAI_BASE_URL,
};

pub const MAX_FOLDER_NAME_BYTES: usize = 120;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub completions: Arc<dyn CompletionProvider>,
}

/// Forwards `prompt` upstream exactly once. The upstream cause is only logged;
/// callers always see the fixed generation failure message.
pub async fn generate_article_structure(
    ctx: &ApiContext,
    prompt: &str,
) -> Result<GenerateArticleResponse, ApiException> {
    match ctx.completions.complete(prompt).await {
        Ok(result) => Ok(GenerateArticleResponse { result }),
        Err(error) => {
            error!(%error, "error generating article structure");
            Err(ApiException::generation_failed())
        }
    }
}

pub async fn list_project_folders(
    ctx: &ApiContext,
    user_email: &str,
) -> Result<Vec<ProjectFolder>, ApiException> {
    let owner = require_owner(user_email)?;
    ctx.storage
        .list_project_folders(owner)
        .await
        .map_err(internal)
}

pub async fn create_project_folder(
    ctx: &ApiContext,
    user_email: &str,
    name: &str,
) -> Result<ProjectFolder, ApiException> {
    let owner = require_owner(user_email)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiException::new(
            ErrorCode::Validation,
            "folder name cannot be empty",
        ));
    }
    if name.len() > MAX_FOLDER_NAME_BYTES {
        return Err(ApiException::new(
            ErrorCode::Validation,
            "folder name is too long",
        ));
    }
    let id = ctx
        .storage
        .create_project_folder(owner, name)
        .await
        .map_err(internal)?;
    Ok(ProjectFolder {
        id,
        name: name.to_string(),
    })
}

fn require_owner(user_email: &str) -> Result<&str, ApiException> {
    let owner = user_email.trim();
    if owner.is_empty() {
        return Err(ApiException::new(
            ErrorCode::Validation,
            "user_email is required",
        ));
    }
    Ok(owner)
}

fn internal(err: anyhow::Error) -> ApiException {
    error!(error = %err, "storage operation failed");
    ApiException::new(ErrorCode::Internal, INTERNAL_ERROR_MESSAGE)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
