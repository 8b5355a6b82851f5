mod common;

use common::{seed_item, seed_project, test_state};
use obra_backend::{common::error::AppError, models::inventory::MovementType};

#[tokio::test]
async fn material_from_inventory_debits_stock_and_records_movement() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra Vila Nova").await;
    let item_id = seed_item(&state, "Cimento CP-II 50kg", 20.0, 38.5).await;

    let material = state
        .material_service
        .create(
            &state.db_pool,
            project_id,
            Some(item_id),
            "Cimento CP-II 50kg",
            None,
            5.0,
            "saco",
            192.5,
            None,
        )
        .await
        .unwrap();

    // Saldo debitado e movimentação de saída sintetizada com o mesmo código.
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 15.0);

    let code = material.transaction_code.expect("Consumo de estoque gera código");
    assert!(code.starts_with("SAI-"));

    let movements = state
        .inventory_service
        .list_movements(Some(item_id), Some(project_id), Some(MovementType::Out))
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].transaction_code, code);
    assert_eq!(movements[0].quantity, 5.0);
}

#[tokio::test]
async fn material_without_enough_stock_rolls_back_everything() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra Central").await;
    let item_id = seed_item(&state, "Areia média", 3.0, 90.0).await;

    let err = state
        .material_service
        .create(
            &state.db_pool,
            project_id,
            Some(item_id),
            "Areia média",
            None,
            5.0,
            "m3",
            450.0,
            None,
        )
        .await
        .expect_err("Estoque de 3 não cobre consumo de 5");
    assert!(matches!(err, AppError::InsufficientStock));

    // Nada ficou pela metade: sem material, sem movimentação, saldo intacto.
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 3.0);
    assert!(state.material_service.list_by_project(project_id).await.unwrap().is_empty());
    assert!(state
        .inventory_service
        .list_movements(Some(item_id), None, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn material_without_inventory_source_skips_the_ledger() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Reforma Galpão").await;

    let material = state
        .material_service
        .create(
            &state.db_pool,
            project_id,
            None,
            "Telha metálica",
            Some("Comprada direto do fornecedor"),
            12.0,
            "un",
            840.0,
            None,
        )
        .await
        .unwrap();

    assert!(material.transaction_code.is_none());
    assert!(material.inventory_id.is_none());
}

#[tokio::test]
async fn material_update_and_delete_do_not_move_stock() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra Sul").await;
    let item_id = seed_item(&state, "Brita 1", 50.0, 60.0).await;

    let material = state
        .material_service
        .create(&state.db_pool, project_id, Some(item_id), "Brita 1", None, 10.0, "m3", 600.0, None)
        .await
        .unwrap();
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 40.0);

    state
        .material_service
        .update(&state.db_pool, material.id, "Brita 1", None, 8.0, "m3", 480.0, None)
        .await
        .unwrap();
    state.material_service.delete(&state.db_pool, material.id).await.unwrap();

    // O consumo registrado continua valendo: nem edição nem remoção devolvem saldo.
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 40.0);
}

#[tokio::test]
async fn project_detail_report_aggregates_costs_and_budget() {
    let state = test_state().await;
    let project_id = state
        .project_service
        .create(
            &state.db_pool,
            "Obra com orçamento",
            None,
            obra_backend::models::project::ProjectStatus::Active,
            None,
            None,
            10_000.0,
            Some("Eng. Marcos Lima"),
            None,
        )
        .await
        .unwrap()
        .id;

    state
        .material_service
        .create(&state.db_pool, project_id, None, "Telha", None, 10.0, "un", 700.0, None)
        .await
        .unwrap();
    state
        .material_service
        .create(&state.db_pool, project_id, None, "Caibro", None, 20.0, "un", 300.0, None)
        .await
        .unwrap();

    let today = chrono::Utc::now().date_naive();
    state
        .finance_service
        .create(
            &state.db_pool,
            project_id,
            obra_backend::models::finance::TransactionKind::Expense,
            "Mão de obra",
            2_500.0,
            today,
        )
        .await
        .unwrap();
    state
        .finance_service
        .create(
            &state.db_pool,
            project_id,
            obra_backend::models::finance::TransactionKind::Revenue,
            "Medição 1",
            4_000.0,
            today,
        )
        .await
        .unwrap();

    let report = state.report_service.project_detail(project_id).await.unwrap();
    assert_eq!(report.materials.len(), 2);
    assert_eq!(report.totals.material_cost, 1_000.0);
    assert_eq!(report.totals.expense_total, 2_500.0);
    assert_eq!(report.totals.revenue_total, 4_000.0);
    assert_eq!(report.totals.remaining_budget, 7_500.0);
}

#[tokio::test]
async fn inventory_materials_report_totals_outbound_value() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra Norte").await;
    let item_id = seed_item(&state, "Cimento", 100.0, 40.0).await;

    state
        .material_service
        .create(&state.db_pool, project_id, Some(item_id), "Cimento", None, 10.0, "saco", 400.0, None)
        .await
        .unwrap();

    let report = state.report_service.inventory_materials(Some(project_id)).await.unwrap();
    assert_eq!(report.rows.len(), 1);
    // Valor da linha = quantidade movimentada x custo unitário atual.
    assert_eq!(report.rows[0].value, 400.0);
    assert_eq!(report.grand_total, 400.0);
}
