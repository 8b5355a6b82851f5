mod common;

use common::{seed_item, test_state};
use obra_backend::{
    common::error::AppError,
    models::inventory::MovementType,
};

#[tokio::test]
async fn delivery_debits_stock_and_freezes_total_value() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Cimento CP-II 50kg", 100.0, 10.0).await;

    let delivery = state
        .inventory_service
        .create_delivery(&state.db_pool, item_id, None, "Construtora Horizonte", 30.0, 12.0, None)
        .await
        .expect("Entrega deveria passar com saldo suficiente");

    assert_eq!(delivery.quantity, 30.0);
    assert_eq!(delivery.total_value, 360.0);
    assert!(delivery.delivery_code.starts_with("ENT-"));

    let item = state.inventory_service.get_item(item_id).await.unwrap();
    assert_eq!(item.quantity, 70.0);

    // Mudar o custo do item depois não recalcula o total da entrega.
    state
        .inventory_service
        .update_item(&state.db_pool, item_id, "Cimento CP-II 50kg", None, "un", 99.0, 0.0, None)
        .await
        .unwrap();
    let delivery_after = state.inventory_service.get_delivery(delivery.id).await.unwrap();
    assert_eq!(delivery_after.total_value, 360.0);
}

#[tokio::test]
async fn deleting_a_delivery_restores_stock_exactly_once() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Areia média", 100.0, 10.0).await;

    let delivery = state
        .inventory_service
        .create_delivery(&state.db_pool, item_id, None, "Cliente", 30.0, 12.0, None)
        .await
        .unwrap();
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 70.0);

    state.inventory_service.delete_delivery(&state.db_pool, delivery.id).await.unwrap();
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 100.0);

    // Segunda remoção: NotFound, sem crédito dobrado.
    let err = state
        .inventory_service
        .delete_delivery(&state.db_pool, delivery.id)
        .await
        .expect_err("Entrega já removida");
    assert!(matches!(err, AppError::NotFound));
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 100.0);
}

#[tokio::test]
async fn delivery_fails_without_enough_stock() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Brita 1", 10.0, 5.0).await;

    let err = state
        .inventory_service
        .create_delivery(&state.db_pool, item_id, None, "Cliente", 30.0, 12.0, None)
        .await
        .expect_err("Saldo de 10 não cobre entrega de 30");
    assert!(matches!(err, AppError::InsufficientStock));

    // Nada mudou e nenhuma entrega ficou para trás.
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 10.0);
    assert!(state.inventory_service.list_deliveries(Some(item_id), None).await.unwrap().is_empty());
}

#[tokio::test]
async fn stock_follows_the_sum_of_movements() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Vergalhão 10mm", 50.0, 20.0).await;
    let today = chrono::Utc::now().date_naive();

    let inbound = [15.0, 5.0];
    let outbound = [20.0, 7.0];

    for qty in inbound {
        state
            .inventory_service
            .create_movement(
                &state.db_pool,
                item_id,
                None,
                MovementType::In,
                qty,
                None,
                None,
                today,
            )
            .await
            .unwrap();
    }
    for qty in outbound {
        state
            .inventory_service
            .create_movement(
                &state.db_pool,
                item_id,
                None,
                MovementType::Out,
                qty,
                None,
                None,
                today,
            )
            .await
            .unwrap();
    }

    let expected = 50.0 + 15.0 + 5.0 - 20.0 - 7.0;
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, expected);

    let movements =
        state.inventory_service.list_movements(Some(item_id), None, None).await.unwrap();
    assert_eq!(movements.len(), 4);
}

#[tokio::test]
async fn outbound_movement_cannot_overdraw() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Tinta acrílica", 3.0, 80.0).await;
    let today = chrono::Utc::now().date_naive();

    let err = state
        .inventory_service
        .create_movement(&state.db_pool, item_id, None, MovementType::Out, 5.0, None, None, today)
        .await
        .expect_err("Saída maior que o saldo");
    assert!(matches!(err, AppError::InsufficientStock));

    // Transação desfeita por inteiro: saldo intacto, nenhuma movimentação.
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 3.0);
    assert!(state.inventory_service.list_movements(Some(item_id), None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn movement_codes_carry_direction_prefix() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Prego 17x21", 100.0, 0.5).await;
    let today = chrono::Utc::now().date_naive();

    let entrada = state
        .inventory_service
        .create_movement(&state.db_pool, item_id, None, MovementType::In, 10.0, None, None, today)
        .await
        .unwrap();
    let saida = state
        .inventory_service
        .create_movement(&state.db_pool, item_id, None, MovementType::Out, 4.0, None, None, today)
        .await
        .unwrap();

    assert!(entrada.transaction_code.starts_with("ENT-"));
    assert!(saida.transaction_code.starts_with("SAI-"));
    // {PREFIXO}-{YYYYMMDD}-{6 chars}
    let parts: Vec<&str> = saida.transaction_code.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[1].len(), 8);
    assert_eq!(parts[2].len(), 6);
}

#[tokio::test]
async fn item_update_does_not_touch_quantity() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Argamassa AC-II", 40.0, 25.0).await;

    let updated = state
        .inventory_service
        .update_item(&state.db_pool, item_id, "Argamassa AC-III", None, "saco", 27.5, 5.0, None)
        .await
        .unwrap();

    assert_eq!(updated.name, "Argamassa AC-III");
    assert_eq!(updated.unit_cost, 27.5);
    // O saldo continua o mesmo: edição de cadastro não é movimentação.
    assert_eq!(updated.quantity, 40.0);
}

#[tokio::test]
async fn summary_counts_low_stock_items() {
    let state = test_state().await;

    // quantity <= min_quantity conta como estoque baixo.
    state
        .inventory_service
        .create_item(&state.db_pool, "Cal hidratada", None, 2.0, "saco", 15.0, 5.0, None)
        .await
        .unwrap();
    state
        .inventory_service
        .create_item(&state.db_pool, "Bloco cerâmico", None, 500.0, "un", 1.2, 50.0, None)
        .await
        .unwrap();

    let summary = state.inventory_service.summary().await.unwrap();
    assert_eq!(summary.total_items, 2);
    assert_eq!(summary.low_stock_items, 1);
    assert_eq!(summary.total_value, 2.0 * 15.0 + 500.0 * 1.2);
}
