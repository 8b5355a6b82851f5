// src/services/inventory_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Sqlite};

use crate::{
    common::{codes, error::AppError},
    db::InventoryRepository,
    models::{
        audit::AuditAction,
        inventory::{
            InventoryDelivery, InventoryItem, InventoryMovement, InventorySummary, MovementType,
        },
    },
    services::audit_service::AuditService,
};

// Regras de negócio do almoxarifado. Toda escrita roda numa transação só:
// o registro (movimentação/entrega) e o ajuste de saldo do item entram ou
// caem juntos.
#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
    audit: AuditService,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    // ---
    // Itens
    // ---

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.repo.list_items().await
    }

    pub async fn get_item(&self, id: i64) -> Result<InventoryItem, AppError> {
        self.repo.get_item(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn summary(&self) -> Result<InventorySummary, AppError> {
        self.repo.summary().await
    }

    pub async fn create_item<'e, A>(
        &self,
        db: A,
        name: &str,
        description: Option<&str>,
        quantity: f64,
        unit: &str,
        unit_cost: f64,
        min_quantity: f64,
        image_path: Option<&str>,
    ) -> Result<InventoryItem, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let item = self
            .repo
            .insert_item(
                &mut *tx,
                name,
                description,
                quantity,
                unit,
                unit_cost,
                min_quantity,
                image_path,
            )
            .await?;

        self.audit
            .record(&mut tx, "inventory_items", item.id, AuditAction::Create, None, Some(&item))
            .await;

        tx.commit().await?;
        Ok(item)
    }

    /// Atualiza os dados cadastrais do item. O saldo não passa por aqui:
    /// quem quiser mexer em quantity registra uma movimentação.
    pub async fn update_item<'e, A>(
        &self,
        db: A,
        id: i64,
        name: &str,
        description: Option<&str>,
        unit: &str,
        unit_cost: f64,
        min_quantity: f64,
        image_path: Option<&str>,
    ) -> Result<InventoryItem, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_item(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let item = self
            .repo
            .update_item_info(&mut *tx, id, name, description, unit, unit_cost, min_quantity, image_path)
            .await?
            .ok_or(AppError::NotFound)?;

        self.audit
            .record(&mut tx, "inventory_items", id, AuditAction::Update, Some(&old), Some(&item))
            .await;

        tx.commit().await?;
        Ok(item)
    }

    pub async fn delete_item<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_item(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let rows = self.repo.delete_item(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }

        self.audit
            .record(&mut tx, "inventory_items", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;

        // A linha já se foi; o arquivo de imagem sai de cena depois do commit,
        // sem derrubar a requisição se o filesystem reclamar.
        if let Some(path) = &old.image_path {
            crate::services::attachment_service::remove_file_best_effort(path).await;
        }

        Ok(())
    }

    // ---
    // Movimentações
    // ---

    pub async fn list_movements(
        &self,
        inventory_id: Option<i64>,
        project_id: Option<i64>,
        movement_type: Option<MovementType>,
    ) -> Result<Vec<InventoryMovement>, AppError> {
        self.repo.list_movements(inventory_id, project_id, movement_type).await
    }

    /// Movimentação manual de entrada ou saída. Imutável depois de criada.
    pub async fn create_movement<'e, A>(
        &self,
        db: A,
        inventory_id: i64,
        project_id: Option<i64>,
        movement_type: MovementType,
        quantity: f64,
        destination: Option<&str>,
        notes: Option<&str>,
        movement_date: NaiveDate,
    ) -> Result<InventoryMovement, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let delta = match movement_type {
            MovementType::In => quantity,
            MovementType::Out => -quantity,
        };
        self.repo.apply_movement(&mut tx, inventory_id, delta).await?;

        let code = codes::movement_code(movement_type == MovementType::In);
        let movement = self
            .repo
            .insert_movement(
                &mut *tx,
                &code,
                inventory_id,
                project_id,
                movement_type,
                quantity,
                destination,
                notes,
                movement_date,
            )
            .await?;

        self.audit
            .record(
                &mut tx,
                "inventory_movements",
                movement.id,
                AuditAction::Create,
                None,
                Some(&movement),
            )
            .await;

        tx.commit().await?;
        Ok(movement)
    }

    // ---
    // Entregas
    // ---

    pub async fn list_deliveries(
        &self,
        inventory_id: Option<i64>,
        project_id: Option<i64>,
    ) -> Result<Vec<InventoryDelivery>, AppError> {
        self.repo.list_deliveries(inventory_id, project_id).await
    }

    pub async fn get_delivery(&self, id: i64) -> Result<InventoryDelivery, AppError> {
        self.repo.get_delivery(id).await?.ok_or(AppError::NotFound)
    }

    /// Entrega a cliente: sempre saída. Exige saldo suficiente e congela
    /// total_value = quantity * unit_price no momento da criação.
    pub async fn create_delivery<'e, A>(
        &self,
        db: A,
        inventory_id: i64,
        project_id: Option<i64>,
        client_name: &str,
        quantity: f64,
        unit_price: f64,
        notes: Option<&str>,
    ) -> Result<InventoryDelivery, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        self.repo.apply_movement(&mut tx, inventory_id, -quantity).await?;

        let total_value = quantity * unit_price;
        let delivery = self
            .repo
            .insert_delivery(
                &mut *tx,
                &codes::delivery_code(),
                inventory_id,
                project_id,
                client_name,
                quantity,
                unit_price,
                total_value,
                notes,
            )
            .await?;

        self.audit
            .record(
                &mut tx,
                "inventory_deliveries",
                delivery.id,
                AuditAction::Create,
                None,
                Some(&delivery),
            )
            .await;

        tx.commit().await?;
        Ok(delivery)
    }

    /// Apagar a entrega devolve a quantidade ao estoque. A restituição e a
    /// remoção da linha andam juntas: se a entrega já sumiu, nada é creditado.
    pub async fn delete_delivery<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_delivery(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        self.repo.apply_movement(&mut tx, old.inventory_id, old.quantity).await?;

        let rows = self.repo.delete_delivery(&mut *tx, id).await?;
        if rows == 0 {
            // Alguém apagou no meio do caminho; o rollback desfaz o crédito.
            return Err(AppError::NotFound);
        }

        self.audit
            .record(&mut tx, "inventory_deliveries", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }
}
