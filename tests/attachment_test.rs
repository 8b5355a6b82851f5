mod common;

use sqlx::sqlite::SqlitePoolOptions;

use obra_backend::{
    common::error::AppError,
    config::AppState,
    models::attachment::{AttachmentKind, OwnerTable},
};

// Estado com diretório de upload isolado, para poder olhar o filesystem.
async fn state_with_uploads() -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Falha ao criar diretório temporário");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Falha ao abrir o banco em memória");
    sqlx::migrate!().run(&pool).await.expect("Falha ao aplicar as migrações");

    (AppState::with_pool(pool, dir.path().to_path_buf()), dir)
}

#[tokio::test]
async fn upload_stores_the_file_and_the_row() {
    let (state, _dir) = state_with_uploads().await;
    let project_id = common::seed_project(&state, "Obra com fotos").await;

    let attachment = state
        .attachment_service
        .store_upload(
            &state.db_pool,
            AttachmentKind::Image,
            Some(OwnerTable::Projects),
            Some(project_id),
            "fachada.jpg",
            b"nao-e-um-jpg-de-verdade",
            Some("Fachada em março"),
        )
        .await
        .unwrap();

    assert_eq!(attachment.file_name, "fachada.jpg");
    assert!(std::path::Path::new(&attachment.file_path).exists());

    let listed = state
        .attachment_service
        .list(Some(OwnerTable::Projects), Some(project_id), Some(AttachmentKind::Image))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn photo_upload_raises_a_notification() {
    let (state, _dir) = state_with_uploads().await;
    let project_id = common::seed_project(&state, "Obra J").await;

    state
        .attachment_service
        .store_upload(
            &state.db_pool,
            AttachmentKind::Image,
            Some(OwnerTable::Projects),
            Some(project_id),
            "laje.png",
            b"png",
            None,
        )
        .await
        .unwrap();

    let notifications =
        state.notification_service.list(Some(project_id), true).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "photo");
}

#[tokio::test]
async fn document_upload_stays_quiet() {
    let (state, _dir) = state_with_uploads().await;

    state
        .attachment_service
        .store_upload(
            &state.db_pool,
            AttachmentKind::Document,
            None,
            None,
            "nota-fiscal.pdf",
            b"pdf",
            None,
        )
        .await
        .unwrap();

    // Documento não vira notificação.
    assert!(state.notification_service.list(None, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_an_attachment_removes_row_first_then_file() {
    let (state, _dir) = state_with_uploads().await;
    let project_id = common::seed_project(&state, "Obra K").await;

    let attachment = state
        .attachment_service
        .store_upload(
            &state.db_pool,
            AttachmentKind::Image,
            Some(OwnerTable::Projects),
            Some(project_id),
            "muro.jpg",
            b"jpg",
            None,
        )
        .await
        .unwrap();
    let file_path = attachment.file_path.clone();

    state.attachment_service.delete(&state.db_pool, attachment.id).await.unwrap();

    assert!(!std::path::Path::new(&file_path).exists());
    assert!(state
        .attachment_service
        .list(Some(OwnerTable::Projects), Some(project_id), None)
        .await
        .unwrap()
        .is_empty());

    let err = state
        .attachment_service
        .delete(&state.db_pool, attachment.id)
        .await
        .expect_err("Anexo já removido");
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn deleting_an_item_cleans_up_its_image_file() {
    let (state, dir) = state_with_uploads().await;

    // Simula uma imagem já salva e um item apontando para ela.
    let image_path = dir.path().join("item.jpg");
    tokio::fs::write(&image_path, b"jpg").await.unwrap();
    let image_path = image_path.to_string_lossy().to_string();

    let item = state
        .inventory_service
        .create_item(&state.db_pool, "Betoneira", None, 1.0, "un", 3_500.0, 0.0, Some(&image_path))
        .await
        .unwrap();

    state.inventory_service.delete_item(&state.db_pool, item.id).await.unwrap();

    assert!(!std::path::Path::new(&image_path).exists());
    let err = state.inventory_service.get_item(item.id).await.expect_err("Item removido");
    assert!(matches!(err, AppError::NotFound));
}
