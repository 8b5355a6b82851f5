// src/config.rs

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{
        AttachmentRepository, AuditRepository, ChatRepository, FinanceRepository,
        InventoryRepository, MaterialRepository, NotificationRepository, ProjectRepository,
        TeamRepository,
    },
    services::{
        AttachmentService, AuditService, ChatService, FinanceService, InventoryService,
        MaterialService, NotificationService, ProjectService, ReportService, TeamService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub upload_dir: PathBuf,
    pub project_service: ProjectService,
    pub inventory_service: InventoryService,
    pub material_service: MaterialService,
    pub team_service: TeamService,
    pub finance_service: FinanceService,
    pub chat_service: ChatService,
    pub notification_service: NotificationService,
    pub attachment_service: AttachmentService,
    pub report_service: ReportService,
    pub audit_service: AuditService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:obra.db".to_string());
        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        let options = SqliteConnectOptions::from_str(&database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, upload_dir))
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    /// Os testes usam este construtor com um banco em memória.
    pub fn with_pool(db_pool: SqlitePool, upload_dir: PathBuf) -> Self {
        let project_repo = ProjectRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let material_repo = MaterialRepository::new(db_pool.clone());
        let team_repo = TeamRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let chat_repo = ChatRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let attachment_repo = AttachmentRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());

        let audit_service = AuditService::new(audit_repo);

        let project_service = ProjectService::new(project_repo.clone(), audit_service.clone());
        let inventory_service =
            InventoryService::new(inventory_repo.clone(), audit_service.clone());
        let material_service = MaterialService::new(
            material_repo.clone(),
            inventory_repo.clone(),
            audit_service.clone(),
        );
        let team_service = TeamService::new(team_repo.clone(), audit_service.clone());
        let finance_service = FinanceService::new(finance_repo.clone(), audit_service.clone());
        let chat_service = ChatService::new(
            chat_repo,
            notification_repo.clone(),
            audit_service.clone(),
        );
        let notification_service = NotificationService::new(notification_repo.clone());
        let attachment_service = AttachmentService::new(
            attachment_repo.clone(),
            notification_repo,
            audit_service.clone(),
            upload_dir.clone(),
        );
        let report_service = ReportService::new(
            project_repo,
            material_repo,
            finance_repo,
            team_repo,
            inventory_repo,
            attachment_repo,
        );

        Self {
            db_pool,
            upload_dir,
            project_service,
            inventory_service,
            material_service,
            team_service,
            finance_service,
            chat_service,
            notification_service,
            attachment_service,
            report_service,
            audit_service,
        }
    }
}
