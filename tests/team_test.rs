mod common;

use common::{seed_project, test_state};
use obra_backend::{common::error::AppError, models::team::PaymentType};

async fn seed_member(
    state: &obra_backend::config::AppState,
    name: &str,
    payment_type: PaymentType,
    daily_rate: f64,
    contract_value: f64,
) -> i64 {
    state
        .team_service
        .create_member(
            &state.db_pool,
            name,
            Some("123.456.789-00"),
            Some("Pedreiro"),
            payment_type,
            0.0,
            daily_rate,
            contract_value,
            None,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn member_can_join_many_projects_but_each_only_once() {
    let state = test_state().await;
    let member_id = seed_member(&state, "José Carlos", PaymentType::Diaria, 180.0, 0.0).await;
    let project_a = seed_project(&state, "Obra A").await;
    let project_b = seed_project(&state, "Obra B").await;

    state
        .team_service
        .create_assignment(&state.db_pool, member_id, project_a, None, None, None, None, None, None)
        .await
        .unwrap();
    state
        .team_service
        .create_assignment(
            &state.db_pool,
            member_id,
            project_b,
            Some(PaymentType::Empreita),
            Some(5_000.0),
            Some("Mestre de obras"),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let assignments =
        state.team_service.list_assignments(Some(member_id), None).await.unwrap();
    assert_eq!(assignments.len(), 2);

    // Terceira tentativa na mesma obra: recusada sem criar linha duplicada.
    let err = state
        .team_service
        .create_assignment(&state.db_pool, member_id, project_a, None, None, None, None, None, None)
        .await
        .expect_err("Par (funcionário, obra) é único");
    assert!(matches!(err, AppError::AssignmentAlreadyExists));
    assert_eq!(state.team_service.list_assignments(Some(member_id), None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn time_entries_filter_by_member_project_and_period() {
    let state = test_state().await;
    let member_id = seed_member(&state, "Antônio", PaymentType::Hora, 0.0, 0.0).await;
    let project_id = seed_project(&state, "Obra C").await;

    let d1 = chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let d2 = chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    let d3 = chrono::NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();

    for (date, hours) in [(d1, 8.0), (d2, 6.0), (d3, 4.0)] {
        state
            .team_service
            .create_time_entry(&state.db_pool, member_id, project_id, date, hours, 1.0, None)
            .await
            .unwrap();
    }

    let march = state
        .team_service
        .list_time_entries(
            Some(member_id),
            Some(project_id),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 31),
        )
        .await
        .unwrap();
    assert_eq!(march.len(), 2);

    let all = state
        .team_service
        .list_time_entries(Some(member_id), None, None, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn team_hours_report_computes_diaria_and_empreita() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra D").await;

    let diarista = seed_member(&state, "Diarista", PaymentType::Diaria, 180.0, 0.0).await;
    let empreiteiro = seed_member(&state, "Empreiteiro", PaymentType::Empreita, 0.0, 12_000.0).await;
    let horista = seed_member(&state, "Horista", PaymentType::Hora, 0.0, 0.0).await;

    let date = chrono::NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    state
        .team_service
        .create_time_entry(&state.db_pool, diarista, project_id, date, 8.0, 1.0, None)
        .await
        .unwrap();
    state
        .team_service
        .create_time_entry(&state.db_pool, diarista, project_id, date, 8.0, 1.5, None)
        .await
        .unwrap();
    state
        .team_service
        .create_time_entry(&state.db_pool, horista, project_id, date, 6.0, 0.0, None)
        .await
        .unwrap();

    let report = state.report_service.team_hours().await.unwrap();

    let row_diarista = report.rows.iter().find(|r| r.team_member_id == diarista).unwrap();
    assert_eq!(row_diarista.total_days, 2.5);
    assert_eq!(row_diarista.amount, Some(2.5 * 180.0));

    let row_empreiteiro = report.rows.iter().find(|r| r.team_member_id == empreiteiro).unwrap();
    assert_eq!(row_empreiteiro.amount, Some(12_000.0));

    // Horista aparece com os totais, mas sem valor calculado.
    let row_horista = report.rows.iter().find(|r| r.team_member_id == horista).unwrap();
    assert_eq!(row_horista.total_hours, 6.0);
    assert_eq!(row_horista.amount, None);
}

#[tokio::test]
async fn deleting_a_member_cascades_assignments_and_entries() {
    let state = test_state().await;
    let member_id = seed_member(&state, "Temporário", PaymentType::Diaria, 150.0, 0.0).await;
    let project_id = seed_project(&state, "Obra E").await;

    state
        .team_service
        .create_assignment(&state.db_pool, member_id, project_id, None, None, None, None, None, None)
        .await
        .unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    state
        .team_service
        .create_time_entry(&state.db_pool, member_id, project_id, date, 8.0, 1.0, None)
        .await
        .unwrap();

    state.team_service.delete_member(&state.db_pool, member_id).await.unwrap();

    assert!(state.team_service.list_assignments(Some(member_id), None).await.unwrap().is_empty());
    assert!(state
        .team_service
        .list_time_entries(Some(member_id), None, None, None)
        .await
        .unwrap()
        .is_empty());

    let err = state.team_service.get_member(member_id).await.expect_err("Funcionário removido");
    assert!(matches!(err, AppError::NotFound));
}
