// src/db/inventory_repo.rs

use chrono::{NaiveDate, Utc};
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

use crate::{
    common::error::AppError,
    models::inventory::{
        InventoryDelivery, InventoryItem, InventoryMovement, InventorySummary, MovementType,
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Itens: leitura
    // ---

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items =
            sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    pub async fn get_item(&self, id: i64) -> Result<Option<InventoryItem>, AppError> {
        let item =
            sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(item)
    }

    pub async fn summary(&self) -> Result<InventorySummary, AppError> {
        let (total_items, total_value, low_stock_items) = sqlx::query_as::<_, (i64, f64, i64)>(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(quantity * unit_cost), 0.0),
                   COALESCE(SUM(CASE WHEN quantity <= min_quantity THEN 1 ELSE 0 END), 0)
              FROM inventory_items
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(InventorySummary { total_items, total_value, low_stock_items })
    }

    // ---
    // Itens: escrita
    // ---

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
        quantity: f64,
        unit: &str,
        unit_cost: f64,
        min_quantity: f64,
        image_path: Option<&str>,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items
                (name, description, quantity, unit, unit_cost, min_quantity, image_path, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(unit_cost)
        .bind(min_quantity)
        .bind(image_path)
        .bind(now)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    /// Atualiza só os campos cadastrais. `quantity` fica de fora de propósito:
    /// saldo muda por movimentação, nunca por edição direta.
    pub async fn update_item_info<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        description: Option<&str>,
        unit: &str,
        unit_cost: f64,
        min_quantity: f64,
        image_path: Option<&str>,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items
               SET name = ?2, description = ?3, unit = ?4, unit_cost = ?5,
                   min_quantity = ?6, image_path = ?7, updated_at = ?8
             WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(unit)
        .bind(unit_cost)
        .bind(min_quantity)
        .bind(image_path)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Livro-razão
    // ---

    /// Aplica um delta no saldo do item. Só pode ser chamado dentro de uma
    /// transação aberta pelo caller; qualquer erro derruba a transação inteira.
    ///
    /// O UPDATE condicional faz a checagem de suficiência e o débito num passo
    /// só, então dois débitos concorrentes nunca deixam o saldo negativo.
    pub async fn apply_movement(
        &self,
        conn: &mut SqliteConnection,
        inventory_id: i64,
        delta: f64,
    ) -> Result<f64, AppError> {
        let updated = sqlx::query_as::<_, (f64,)>(
            r#"
            UPDATE inventory_items
               SET quantity = quantity + ?2, updated_at = ?3
             WHERE id = ?1 AND quantity + ?2 >= 0
            RETURNING quantity
            "#,
        )
        .bind(inventory_id)
        .bind(delta)
        .bind(Utc::now())
        .fetch_optional(&mut *conn)
        .await?;

        match updated {
            Some((quantity,)) => Ok(quantity),
            None => {
                // A condição falhou: ou o item não existe, ou não há saldo.
                let exists = sqlx::query_as::<_, (i64,)>(
                    "SELECT id FROM inventory_items WHERE id = ?1",
                )
                .bind(inventory_id)
                .fetch_optional(&mut *conn)
                .await?;
                match exists {
                    Some(_) => Err(AppError::InsufficientStock),
                    None => Err(AppError::NotFound),
                }
            }
        }
    }

    pub async fn insert_movement<'e, E>(
        &self,
        executor: E,
        transaction_code: &str,
        inventory_id: i64,
        project_id: Option<i64>,
        movement_type: MovementType,
        quantity: f64,
        destination: Option<&str>,
        notes: Option<&str>,
        movement_date: NaiveDate,
    ) -> Result<InventoryMovement, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let movement = sqlx::query_as::<_, InventoryMovement>(
            r#"
            INSERT INTO inventory_movements
                (transaction_code, inventory_id, project_id, movement_type, quantity,
                 destination, notes, movement_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING *
            "#,
        )
        .bind(transaction_code)
        .bind(inventory_id)
        .bind(project_id)
        .bind(movement_type)
        .bind(quantity)
        .bind(destination)
        .bind(notes)
        .bind(movement_date)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    pub async fn list_movements(
        &self,
        inventory_id: Option<i64>,
        project_id: Option<i64>,
        movement_type: Option<MovementType>,
    ) -> Result<Vec<InventoryMovement>, AppError> {
        let movements = sqlx::query_as::<_, InventoryMovement>(
            r#"
            SELECT * FROM inventory_movements
             WHERE (?1 IS NULL OR inventory_id = ?1)
               AND (?2 IS NULL OR project_id = ?2)
               AND (?3 IS NULL OR movement_type = ?3)
             ORDER BY movement_date DESC, id DESC
            "#,
        )
        .bind(inventory_id)
        .bind(project_id)
        .bind(movement_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    // ---
    // Entregas
    // ---

    pub async fn insert_delivery<'e, E>(
        &self,
        executor: E,
        delivery_code: &str,
        inventory_id: i64,
        project_id: Option<i64>,
        client_name: &str,
        quantity: f64,
        unit_price: f64,
        total_value: f64,
        notes: Option<&str>,
    ) -> Result<InventoryDelivery, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let delivery = sqlx::query_as::<_, InventoryDelivery>(
            r#"
            INSERT INTO inventory_deliveries
                (delivery_code, inventory_id, project_id, client_name, quantity,
                 unit_price, total_value, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING *
            "#,
        )
        .bind(delivery_code)
        .bind(inventory_id)
        .bind(project_id)
        .bind(client_name)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_value)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(delivery)
    }

    pub async fn list_deliveries(
        &self,
        inventory_id: Option<i64>,
        project_id: Option<i64>,
    ) -> Result<Vec<InventoryDelivery>, AppError> {
        let deliveries = sqlx::query_as::<_, InventoryDelivery>(
            r#"
            SELECT * FROM inventory_deliveries
             WHERE (?1 IS NULL OR inventory_id = ?1)
               AND (?2 IS NULL OR project_id = ?2)
             ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(inventory_id)
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(deliveries)
    }

    pub async fn get_delivery(&self, id: i64) -> Result<Option<InventoryDelivery>, AppError> {
        let delivery = sqlx::query_as::<_, InventoryDelivery>(
            "SELECT * FROM inventory_deliveries WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(delivery)
    }

    pub async fn delete_delivery<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM inventory_deliveries WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
