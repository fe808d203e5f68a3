//! Backend selection through configuration.

use opsdeck_core::{Config, StorageKind};
use opsdeck_storage::create_storage;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn memory_backend_starts_empty() {
    let config = Config::default();
    let storage = create_storage(&config).await.unwrap();
    let snapshot = storage.fetch_all().await.unwrap();
    assert!(snapshot.companies.is_empty());
    assert!(snapshot.users.is_empty());
}

#[tokio::test]
async fn jsonfile_backend_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        storage_backend: StorageKind::JsonFile,
        data_file_path: dir
            .path()
            .join("opsdeck.json")
            .to_string_lossy()
            .into_owned(),
        ..Config::default()
    };

    let id = Uuid::new_v4();
    {
        let storage = create_storage(&config).await.unwrap();
        storage
            .save(
                opsdeck_core::Collection::Leads,
                json!({
                    "id": id,
                    "company_id": Uuid::new_v4(),
                    "name": "Persisted Lead",
                    "company_name": null,
                    "email": null,
                    "phone": null,
                    "source": null,
                    "status": "new",
                    "messages": [],
                    "created_at": "2026-03-15T08:00:00Z",
                }),
            )
            .await
            .unwrap();
    }

    let storage = create_storage(&config).await.unwrap();
    let snapshot = storage.fetch_all().await.unwrap();
    assert_eq!(snapshot.leads.len(), 1);
    assert_eq!(snapshot.leads[0].id, id);
}
