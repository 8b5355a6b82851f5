// src/services/material_service.rs

use chrono::Utc;
use sqlx::{Acquire, Sqlite};

use crate::{
    common::{codes, error::AppError},
    db::{InventoryRepository, MaterialRepository},
    models::{audit::AuditAction, inventory::MovementType, material::Material},
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct MaterialService {
    repo: MaterialRepository,
    inventory_repo: InventoryRepository,
    audit: AuditService,
}

impl MaterialService {
    pub fn new(
        repo: MaterialRepository,
        inventory_repo: InventoryRepository,
        audit: AuditService,
    ) -> Self {
        Self { repo, inventory_repo, audit }
    }

    pub async fn list_by_project(&self, project_id: i64) -> Result<Vec<Material>, AppError> {
        self.repo.list_by_project(project_id).await
    }

    pub async fn get(&self, id: i64) -> Result<Material, AppError> {
        self.repo.get(id).await?.ok_or(AppError::NotFound)
    }

    /// Lança um material na obra. Com `inventory_id`, o material é consumo de
    /// almoxarifado: debita o saldo e sintetiza uma movimentação de saída com
    /// o mesmo transaction_code, tudo na mesma transação.
    pub async fn create<'e, A>(
        &self,
        db: A,
        project_id: i64,
        inventory_id: Option<i64>,
        name: &str,
        description: Option<&str>,
        quantity: f64,
        unit: &str,
        cost: f64,
        image_path: Option<&str>,
    ) -> Result<Material, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let transaction_code = match inventory_id {
            Some(inv_id) => {
                self.inventory_repo.apply_movement(&mut tx, inv_id, -quantity).await?;

                let code = codes::movement_code(false);
                self.inventory_repo
                    .insert_movement(
                        &mut *tx,
                        &code,
                        inv_id,
                        Some(project_id),
                        MovementType::Out,
                        quantity,
                        None,
                        Some(&format!("Consumo de material: {}", name)),
                        Utc::now().date_naive(),
                    )
                    .await?;
                Some(code)
            }
            None => None,
        };

        let material = self
            .repo
            .insert(
                &mut *tx,
                project_id,
                inventory_id,
                name,
                description,
                quantity,
                unit,
                cost,
                transaction_code.as_deref(),
                image_path,
            )
            .await?;

        self.audit
            .record(&mut tx, "materials", material.id, AuditAction::Create, None, Some(&material))
            .await;

        tx.commit().await?;
        Ok(material)
    }

    pub async fn update<'e, A>(
        &self,
        db: A,
        id: i64,
        name: &str,
        description: Option<&str>,
        quantity: f64,
        unit: &str,
        cost: f64,
        image_path: Option<&str>,
    ) -> Result<Material, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let material = self
            .repo
            .update(&mut *tx, id, name, description, quantity, unit, cost, image_path)
            .await?
            .ok_or(AppError::NotFound)?;

        self.audit
            .record(&mut tx, "materials", id, AuditAction::Update, Some(&old), Some(&material))
            .await;

        tx.commit().await?;
        Ok(material)
    }

    /// Remoção dura. O consumo de estoque já registrado não volta: a
    /// movimentação de saída continua valendo no histórico.
    pub async fn delete<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let rows = self.repo.delete(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }

        self.audit
            .record(&mut tx, "materials", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }
}
