use super::*;
use async_trait::async_trait;
use shared::domain::ProjectFolder;
use storage::Storage;

struct BrokenStore;

#[async_trait]
impl FolderSource for BrokenStore {
    async fn list_project_folders(&self, _owner: &str) -> anyhow::Result<Vec<ProjectFolder>> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

#[tokio::test]
async fn lookup_reads_owned_folders_from_storage_in_name_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_project_folder("ola@example.com", "Reiser")
        .await
        .expect("folder");
    storage
        .create_project_folder("ola@example.com", "Blogg")
        .await
        .expect("folder");
    storage
        .create_project_folder("kari@example.com", "Annet")
        .await
        .expect("folder");

    let folders = lookup_folders(&storage, "ola@example.com").await;
    let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Blogg", "Reiser"]);
}

#[tokio::test]
async fn lookup_failure_yields_empty_list() {
    let folders = lookup_folders(&BrokenStore, "ola@example.com").await;
    assert!(folders.is_empty());
}

#[test]
fn only_the_latest_token_is_current() {
    let mut requests = FolderRequests::default();
    let first = requests.issue();
    assert!(requests.is_current(first));
    let second = requests.issue();
    assert!(!requests.is_current(first));
    assert!(requests.is_current(second));
    assert!(second > first);
}
