use shared::domain::ProjectFolder;
use storage::Storage;

#[tokio::test]
async fn folders_survive_reopening_an_on_disk_store() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("folders.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    let second = storage
        .create_project_folder("dana@example.com", "Zeta")
        .await
        .expect("zeta");
    let first = storage
        .create_project_folder("dana@example.com", "Alfa")
        .await
        .expect("alfa");
    storage.pool().close().await;
    drop(storage);

    let reopened = Storage::new(&database_url).await.expect("reopen");
    let folders = reopened
        .list_project_folders("dana@example.com")
        .await
        .expect("list");
    assert_eq!(
        folders,
        vec![
            ProjectFolder {
                id: first,
                name: "Alfa".into(),
            },
            ProjectFolder {
                id: second,
                name: "Zeta".into(),
            },
        ]
    );
}
