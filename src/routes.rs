// src/routes.rs

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo. Vive fora do main para os testes de integração
/// dispararem requisições sem subir servidor.
pub fn app(app_state: AppState) -> Router {
    let project_routes = Router::new()
        .route("/", post(handlers::projects::create_project).get(handlers::projects::list_projects))
        .route(
            "/{id}",
            get(handlers::projects::get_project)
                .put(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        .route("/{id}/photos", get(handlers::projects::list_project_photos));

    let material_routes = Router::new()
        .route(
            "/",
            post(handlers::materials::create_material).get(handlers::materials::list_materials),
        )
        .route(
            "/{id}",
            get(handlers::materials::get_material)
                .put(handlers::materials::update_material)
                .delete(handlers::materials::delete_material),
        )
        .route("/{id}/images", get(handlers::materials::list_material_images));

    // Rotas fixas (movements/deliveries) antes da rota com {id}.
    let inventory_routes = Router::new()
        .route(
            "/",
            post(handlers::inventory::create_item).get(handlers::inventory::list_items),
        )
        .route(
            "/movements",
            post(handlers::inventory::create_movement).get(handlers::inventory::list_movements),
        )
        .route(
            "/deliveries",
            post(handlers::inventory::create_delivery).get(handlers::inventory::list_deliveries),
        )
        .route(
            "/deliveries/{id}",
            get(handlers::inventory::get_delivery).delete(handlers::inventory::delete_delivery),
        )
        .route(
            "/{id}",
            get(handlers::inventory::get_item)
                .put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        );

    let team_routes = Router::new()
        .route("/", post(handlers::team::create_member).get(handlers::team::list_members))
        .route(
            "/assignments",
            post(handlers::team::create_assignment).get(handlers::team::list_assignments),
        )
        .route(
            "/assignments/{id}",
            put(handlers::team::update_assignment).delete(handlers::team::delete_assignment),
        )
        .route(
            "/time-entries",
            post(handlers::team::create_time_entry).get(handlers::team::list_time_entries),
        )
        .route(
            "/time-entries/{id}",
            put(handlers::team::update_time_entry).delete(handlers::team::delete_time_entry),
        )
        .route(
            "/{id}",
            get(handlers::team::get_member)
                .put(handlers::team::update_member)
                .delete(handlers::team::delete_member),
        );

    let transaction_routes = Router::new()
        .route(
            "/",
            post(handlers::transactions::create_transaction)
                .get(handlers::transactions::list_transactions),
        )
        .route(
            "/{id}",
            get(handlers::transactions::get_transaction)
                .put(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        );

    let notification_routes = Router::new()
        .route(
            "/",
            post(handlers::notifications::create_notification)
                .get(handlers::notifications::list_notifications),
        )
        .route("/read-all", put(handlers::notifications::mark_all_read))
        .route("/{id}/read", put(handlers::notifications::mark_read))
        .route("/{id}", axum::routing::delete(handlers::notifications::delete_notification));

    let chat_routes = Router::new()
        .route("/", post(handlers::chat::create_message).get(handlers::chat::list_messages))
        .route("/{id}", axum::routing::delete(handlers::chat::delete_message));

    let attachment_routes = Router::new()
        .route("/", get(handlers::attachments::list_attachments))
        .route("/{id}", axum::routing::delete(handlers::attachments::delete_attachment));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/projects", project_routes)
        .nest("/api/materials", material_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/team", team_routes)
        .nest("/api/transactions", transaction_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/chat", chat_routes)
        .nest("/api/attachments", attachment_routes)
        .route("/api/upload", post(handlers::attachments::upload))
        .route("/api/history", get(handlers::history::list_history))
        .route("/api/reports", get(handlers::reports::get_report))
        .nest_service("/uploads", ServeDir::new(app_state.upload_dir.clone()))
        // O dashboard roda em outra origem; CORS totalmente aberto, como o
        // front espera.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
