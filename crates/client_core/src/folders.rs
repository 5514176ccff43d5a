use async_trait::async_trait;
use shared::domain::ProjectFolder;
use storage::Storage;
use tracing::error;

#[async_trait]
pub trait FolderSource: Send + Sync {
    /// Folders owned by `owner`, ordered by name ascending.
    async fn list_project_folders(&self, owner: &str) -> anyhow::Result<Vec<ProjectFolder>>;
}

#[async_trait]
impl FolderSource for Storage {
    async fn list_project_folders(&self, owner: &str) -> anyhow::Result<Vec<ProjectFolder>> {
        Storage::list_project_folders(self, owner).await
    }
}

/// One query against `source`. Failures are logged and yield an empty list.
pub async fn lookup_folders(source: &dyn FolderSource, owner: &str) -> Vec<ProjectFolder> {
    match source.list_project_folders(owner).await {
        Ok(folders) => folders,
        Err(error) => {
            error!(owner, error = %format!("{error:#}"), "error fetching project folders");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

/// Generation counter for folder fetches; only the latest token may publish.
#[derive(Debug, Default)]
pub struct FolderRequests {
    latest: u64,
}

impl FolderRequests {
    pub fn issue(&mut self) -> FetchToken {
        self.latest += 1;
        FetchToken(self.latest)
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        token.0 == self.latest
    }
}

#[derive(Debug, Clone)]
pub struct FolderFetchOutcome {
    pub token: FetchToken,
    pub owner: String,
    pub folders: Vec<ProjectFolder>,
}
