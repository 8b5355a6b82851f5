// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Obras ---
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::create_project,
        handlers::projects::update_project,
        handlers::projects::delete_project,
        handlers::projects::list_project_photos,

        // --- Materiais ---
        handlers::materials::list_materials,
        handlers::materials::get_material,
        handlers::materials::create_material,
        handlers::materials::update_material,
        handlers::materials::delete_material,
        handlers::materials::list_material_images,

        // --- Almoxarifado ---
        handlers::inventory::list_items,
        handlers::inventory::get_item,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,
        handlers::inventory::list_movements,
        handlers::inventory::create_movement,
        handlers::inventory::list_deliveries,
        handlers::inventory::get_delivery,
        handlers::inventory::create_delivery,
        handlers::inventory::delete_delivery,

        // --- Equipe ---
        handlers::team::list_members,
        handlers::team::get_member,
        handlers::team::create_member,
        handlers::team::update_member,
        handlers::team::delete_member,
        handlers::team::list_assignments,
        handlers::team::create_assignment,
        handlers::team::update_assignment,
        handlers::team::delete_assignment,
        handlers::team::list_time_entries,
        handlers::team::create_time_entry,
        handlers::team::update_time_entry,
        handlers::team::delete_time_entry,

        // --- Financeiro ---
        handlers::transactions::list_transactions,
        handlers::transactions::get_transaction,
        handlers::transactions::create_transaction,
        handlers::transactions::update_transaction,
        handlers::transactions::delete_transaction,

        // --- Notificações ---
        handlers::notifications::list_notifications,
        handlers::notifications::create_notification,
        handlers::notifications::mark_read,
        handlers::notifications::mark_all_read,
        handlers::notifications::delete_notification,

        // --- Chat ---
        handlers::chat::list_messages,
        handlers::chat::create_message,
        handlers::chat::delete_message,

        // --- Anexos ---
        handlers::attachments::list_attachments,
        handlers::attachments::upload,
        handlers::attachments::delete_attachment,

        // --- Auditoria ---
        handlers::history::list_history,

        // --- Relatórios ---
        handlers::reports::get_report,
    ),
    components(
        schemas(
            // --- Obras ---
            models::project::ProjectStatus,
            models::project::Project,
            models::project::ProjectWithStats,
            handlers::projects::ProjectPayload,

            // --- Materiais ---
            models::material::Material,
            handlers::materials::CreateMaterialPayload,
            handlers::materials::UpdateMaterialPayload,

            // --- Almoxarifado ---
            models::inventory::InventoryItem,
            models::inventory::MovementType,
            models::inventory::InventoryMovement,
            models::inventory::InventoryDelivery,
            models::inventory::InventorySummary,
            handlers::inventory::CreateItemPayload,
            handlers::inventory::UpdateItemPayload,
            handlers::inventory::CreateMovementPayload,
            handlers::inventory::CreateDeliveryPayload,

            // --- Equipe ---
            models::team::PaymentType,
            models::team::TeamMember,
            models::team::ProjectTeamAssignment,
            models::team::TimeEntry,
            handlers::team::TeamMemberPayload,
            handlers::team::CreateAssignmentPayload,
            handlers::team::UpdateAssignmentPayload,
            handlers::team::CreateTimeEntryPayload,
            handlers::team::UpdateTimeEntryPayload,

            // --- Financeiro ---
            models::finance::TransactionKind,
            models::finance::Transaction,
            models::finance::TransactionSummary,
            handlers::transactions::CreateTransactionPayload,
            handlers::transactions::UpdateTransactionPayload,

            // --- Notificações ---
            models::notification::Notification,
            handlers::notifications::CreateNotificationPayload,

            // --- Chat ---
            models::chat::ChatMessage,
            handlers::chat::CreateChatMessagePayload,

            // --- Anexos ---
            models::attachment::OwnerTable,
            models::attachment::AttachmentKind,
            models::attachment::Attachment,

            // --- Auditoria ---
            models::audit::AuditAction,
            models::audit::AuditEntry,

            // --- Relatórios ---
            models::report::ProjectTotals,
            models::report::TeamEntry,
            models::report::ProjectDetailReport,
            models::report::InventoryMaterialRow,
            models::report::InventoryMaterialsReport,
            models::report::TeamHoursRow,
            models::report::TeamHoursReport,
        )
    ),
    tags(
        (name = "Obras", description = "Cadastro e acompanhamento de obras"),
        (name = "Materiais", description = "Materiais lançados por obra"),
        (name = "Almoxarifado", description = "Itens, movimentações e entregas de estoque"),
        (name = "Equipe", description = "Funcionários, vínculos e apontamentos"),
        (name = "Financeiro", description = "Despesas e receitas por obra"),
        (name = "Notificações", description = "Mural de avisos do dashboard"),
        (name = "Chat", description = "Conversa por obra"),
        (name = "Anexos", description = "Fotos e documentos"),
        (name = "Auditoria", description = "Trilha de alterações"),
        (name = "Relatórios", description = "Agregados prontos para impressão")
    )
)]
pub struct ApiDoc;
