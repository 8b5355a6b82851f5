// Infra compartilhada dos testes de integração: banco SQLite em memória com
// as migrações aplicadas e o AppState montado por cima.

use sqlx::sqlite::SqlitePoolOptions;

use obra_backend::config::AppState;

pub async fn test_state() -> AppState {
    // Uma conexão só: em memória, cada conexão nova seria um banco vazio.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Falha ao abrir o banco em memória");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Falha ao aplicar as migrações no banco de testes");

    AppState::with_pool(pool, std::env::temp_dir().join("obra-backend-test-uploads"))
}

/// Obra mínima para os testes que precisam de uma.
pub async fn seed_project(state: &AppState, name: &str) -> i64 {
    state
        .project_service
        .create(
            &state.db_pool,
            name,
            None,
            obra_backend::models::project::ProjectStatus::Active,
            None,
            None,
            0.0,
            None,
            None,
        )
        .await
        .expect("Falha ao criar obra de teste")
        .id
}

/// Item de almoxarifado com estoque inicial.
pub async fn seed_item(state: &AppState, name: &str, quantity: f64, unit_cost: f64) -> i64 {
    state
        .inventory_service
        .create_item(&state.db_pool, name, None, quantity, "un", unit_cost, 0.0, None)
        .await
        .expect("Falha ao criar item de teste")
        .id
}
