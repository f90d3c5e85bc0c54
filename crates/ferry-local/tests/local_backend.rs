// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Local` backend driven entirely through the binder.

use ferry_core::{QualifiedName, RemoteFile, RemoteFileKind, TransferManager};
use ferry_plugin::ComponentRegistry;

const PLUGIN: &str = "org.ferry.plugins.local.LocalTransferPlugin";

async fn bound_manager(registry: &ComponentRegistry, path: &str) -> Box<dyn TransferManager> {
    let binder = registry.binder();
    let plugin = QualifiedName::parse(PLUGIN);

    let mut settings = binder.settings_for_plugin(&plugin).unwrap().create();
    settings.set_field("path", path).unwrap();
    settings.validate().unwrap();

    let mut manager = binder
        .manager_for_plugin(&plugin)
        .unwrap()
        .create(settings)
        .unwrap();
    manager.connect().await.unwrap();
    manager
}

#[tokio::test]
async fn upload_list_download_move_delete() {
    let mut registry = ComponentRegistry::new();
    ferry_local::register(&mut registry).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");
    let mut manager = bound_manager(&registry, repo.to_str().unwrap()).await;
    manager.init(true).await.unwrap();

    let source = dir.path().join("db-1.bin");
    std::fs::write(&source, b"database contents").unwrap();

    let db = RemoteFile::new(RemoteFileKind::Database, "db-1");
    manager.upload(&source, &db).await.unwrap();
    manager.upload(&source, &RemoteFile::repo()).await.unwrap();

    let listed = manager.list(RemoteFileKind::Database).await.unwrap();
    assert_eq!(listed.keys().collect::<Vec<_>>(), vec!["db-1"]);
    assert!(manager.list(RemoteFileKind::Temp).await.unwrap().is_empty());
    assert!(
        manager
            .list(RemoteFileKind::Repo)
            .await
            .unwrap()
            .contains_key("repo")
    );

    let copy = dir.path().join("copy.bin");
    manager.download(&db, &copy).await.unwrap();
    assert_eq!(std::fs::read(&copy).unwrap(), b"database contents");

    let renamed = RemoteFile::new(RemoteFileKind::Database, "db-2");
    manager.move_file(&db, &renamed).await.unwrap();
    let listed = manager.list(RemoteFileKind::Database).await.unwrap();
    assert!(listed.contains_key("db-2") && !listed.contains_key("db-1"));

    assert!(manager.delete(&renamed).await.unwrap());
    assert!(!manager.delete(&renamed).await.unwrap());

    let result = manager.test(false).await.unwrap();
    assert!(result.is_usable_repo());
}

#[tokio::test]
async fn wrong_settings_type_is_rejected() {
    let mut registry = ComponentRegistry::new();
    ferry_local::register(&mut registry).unwrap();

    #[derive(Debug, Default)]
    struct Foreign;

    impl ferry_core::TransferSettings for Foreign {
        fn field_names(&self) -> &'static [&'static str] {
            &[]
        }
        fn get_field(&self, _key: &str) -> Option<String> {
            None
        }
        fn set_field(&mut self, key: &str, _value: &str) -> Result<(), ferry_core::FerryError> {
            Err(ferry_core::FerryError::Config(key.to_string()))
        }
    }

    let factory = registry
        .binder()
        .manager_for_plugin(&QualifiedName::parse(PLUGIN))
        .unwrap();
    assert!(matches!(
        factory.create(Box::new(Foreign)),
        Err(ferry_core::FerryError::SettingsMismatch { .. })
    ));
}
