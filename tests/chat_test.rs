mod common;

use common::{seed_project, test_state};
use obra_backend::common::error::AppError;

#[tokio::test]
async fn cursor_returns_only_newer_messages_in_order() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra com chat").await;
    let other_project = seed_project(&state, "Outra obra").await;

    let m1 = state
        .chat_service
        .create(&state.db_pool, project_id, "Dona Cida", "Bom dia!")
        .await
        .unwrap();
    let m2 = state
        .chat_service
        .create(&state.db_pool, project_id, "Marcos", "Chegou o cimento?")
        .await
        .unwrap();
    let m3 = state
        .chat_service
        .create(&state.db_pool, project_id, "Dona Cida", "Chegou sim.")
        .await
        .unwrap();

    // Mensagem de outra obra não vaza no filtro.
    state
        .chat_service
        .create(&state.db_pool, other_project, "Zé", "Outro assunto")
        .await
        .unwrap();

    let all = state.chat_service.list_after(project_id, 0, 100).await.unwrap();
    assert_eq!(all.iter().map(|m| m.id).collect::<Vec<_>>(), vec![m1.id, m2.id, m3.id]);

    let newer = state.chat_service.list_after(project_id, m2.id, 100).await.unwrap();
    assert_eq!(newer.len(), 1);
    assert_eq!(newer[0].id, m3.id);
    assert_eq!(newer[0].message, "Chegou sim.");

    let none = state.chat_service.list_after(project_id, m3.id, 100).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn chat_message_raises_a_notification() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra G").await;

    state
        .chat_service
        .create(&state.db_pool, project_id, "Marcos", "Fiscal chega às 14h")
        .await
        .unwrap();

    let notifications =
        state.notification_service.list(Some(project_id), false).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "chat");
    assert!(!notifications[0].is_read);
    assert!(notifications[0].message.contains("Fiscal chega às 14h"));
}

#[tokio::test]
async fn notifications_flip_to_read_one_by_one_or_all_at_once() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra H").await;

    for text in ["uma", "duas", "três"] {
        state.chat_service.create(&state.db_pool, project_id, "Zé", text).await.unwrap();
    }

    let unread = state.notification_service.list(None, true).await.unwrap();
    assert_eq!(unread.len(), 3);

    state
        .notification_service
        .mark_read(&state.db_pool, unread[0].id)
        .await
        .unwrap();
    assert_eq!(state.notification_service.list(None, true).await.unwrap().len(), 2);

    let flipped = state.notification_service.mark_all_read(&state.db_pool).await.unwrap();
    assert_eq!(flipped, 2);
    assert!(state.notification_service.list(None, true).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_missing_message_is_not_found() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra I").await;

    let msg = state
        .chat_service
        .create(&state.db_pool, project_id, "Zé", "Apaga isso aí")
        .await
        .unwrap();
    state.chat_service.delete(&state.db_pool, msg.id).await.unwrap();

    let err = state
        .chat_service
        .delete(&state.db_pool, msg.id)
        .await
        .expect_err("Mensagem já apagada");
    assert!(matches!(err, AppError::NotFound));
}
