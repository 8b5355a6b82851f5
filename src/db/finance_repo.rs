// src/db/finance_repo.rs

use chrono::{NaiveDate, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::finance::{Transaction, TransactionKind},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: SqlitePool,
}

impl FinanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        project_id: Option<i64>,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
             WHERE (?1 IS NULL OR project_id = ?1)
               AND (?2 IS NULL OR kind = ?2)
             ORDER BY transaction_date DESC, id DESC
            "#,
        )
        .bind(project_id)
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Transaction>, AppError> {
        let transaction =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(transaction)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        project_id: i64,
        kind: TransactionKind,
        description: &str,
        amount: f64,
        transaction_date: NaiveDate,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions
                (project_id, kind, description, amount, transaction_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(kind)
        .bind(description)
        .bind(amount)
        .bind(transaction_date)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(transaction)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        kind: TransactionKind,
        description: &str,
        amount: f64,
        transaction_date: NaiveDate,
    ) -> Result<Option<Transaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
               SET kind = ?2, description = ?3, amount = ?4, transaction_date = ?5
             WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(kind)
        .bind(description)
        .bind(amount)
        .bind(transaction_date)
        .fetch_optional(executor)
        .await?;
        Ok(transaction)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Somas de despesa/receita (e orçamento somado das obras alcançadas).
    pub async fn totals(&self, project_id: Option<i64>) -> Result<(f64, f64, f64), AppError> {
        let totals = sqlx::query_as::<_, (f64, f64, f64)>(
            r#"
            SELECT
                COALESCE((SELECT SUM(amount) FROM transactions
                           WHERE kind = 'expense' AND (?1 IS NULL OR project_id = ?1)), 0.0),
                COALESCE((SELECT SUM(amount) FROM transactions
                           WHERE kind = 'revenue' AND (?1 IS NULL OR project_id = ?1)), 0.0),
                COALESCE((SELECT SUM(budget) FROM projects
                           WHERE (?1 IS NULL OR id = ?1)), 0.0)
            "#,
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }
}
