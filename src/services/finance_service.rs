// src/services/finance_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Sqlite};

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::{
        audit::AuditAction,
        finance::{Transaction, TransactionKind, TransactionSummary},
    },
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
    audit: AuditService,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn list(
        &self,
        project_id: Option<i64>,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>, AppError> {
        self.repo.list(project_id, kind).await
    }

    pub async fn get(&self, id: i64) -> Result<Transaction, AppError> {
        self.repo.get(id).await?.ok_or(AppError::NotFound)
    }

    /// Orçamento x realizado. Sem project_id, soma o conjunto das obras.
    pub async fn summary(&self, project_id: Option<i64>) -> Result<TransactionSummary, AppError> {
        let (expense_total, revenue_total, budget) = self.repo.totals(project_id).await?;
        Ok(TransactionSummary {
            expense_total,
            revenue_total,
            budget,
            remaining_budget: budget - expense_total,
        })
    }

    pub async fn create<'e, A>(
        &self,
        db: A,
        project_id: i64,
        kind: TransactionKind,
        description: &str,
        amount: f64,
        transaction_date: NaiveDate,
    ) -> Result<Transaction, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let transaction = self
            .repo
            .insert(&mut *tx, project_id, kind, description, amount, transaction_date)
            .await?;

        self.audit
            .record(
                &mut tx,
                "transactions",
                transaction.id,
                AuditAction::Create,
                None,
                Some(&transaction),
            )
            .await;

        tx.commit().await?;
        Ok(transaction)
    }

    pub async fn update<'e, A>(
        &self,
        db: A,
        id: i64,
        kind: TransactionKind,
        description: &str,
        amount: f64,
        transaction_date: NaiveDate,
    ) -> Result<Transaction, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let transaction = self
            .repo
            .update(&mut *tx, id, kind, description, amount, transaction_date)
            .await?
            .ok_or(AppError::NotFound)?;

        self.audit
            .record(&mut tx, "transactions", id, AuditAction::Update, Some(&old), Some(&transaction))
            .await;

        tx.commit().await?;
        Ok(transaction)
    }

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
            .record(&mut tx, "transactions", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }
}
