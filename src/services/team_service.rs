// src/services/team_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Sqlite};

use crate::{
    common::error::AppError,
    db::TeamRepository,
    models::{
        audit::AuditAction,
        team::{PaymentType, ProjectTeamAssignment, TeamMember, TimeEntry},
    },
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct TeamService {
    repo: TeamRepository,
    audit: AuditService,
}

impl TeamService {
    pub fn new(repo: TeamRepository, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    // ---
    // Funcionários
    // ---

    pub async fn list_members(&self, project_id: Option<i64>) -> Result<Vec<TeamMember>, AppError> {
        self.repo.list_members(project_id).await
    }

    pub async fn get_member(&self, id: i64) -> Result<TeamMember, AppError> {
        self.repo.get_member(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn create_member<'e, A>(
        &self,
        db: A,
        name: &str,
        cpf: Option<&str>,
        role: Option<&str>,
        payment_type: PaymentType,
        payment_value: f64,
        daily_rate: f64,
        contract_value: f64,
        description: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        image_path: Option<&str>,
        project_id: Option<i64>,
    ) -> Result<TeamMember, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let member = self
            .repo
            .insert_member(
                &mut *tx,
                name,
                cpf,
                role,
                payment_type,
                payment_value,
                daily_rate,
                contract_value,
                description,
                address,
                phone,
                image_path,
                project_id,
            )
            .await?;

        self.audit
            .record(&mut tx, "team_members", member.id, AuditAction::Create, None, Some(&member))
            .await;

        tx.commit().await?;
        Ok(member)
    }

    pub async fn update_member<'e, A>(
        &self,
        db: A,
        id: i64,
        name: &str,
        cpf: Option<&str>,
        role: Option<&str>,
        payment_type: PaymentType,
        payment_value: f64,
        daily_rate: f64,
        contract_value: f64,
        description: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        image_path: Option<&str>,
        project_id: Option<i64>,
    ) -> Result<TeamMember, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_member(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let member = self
            .repo
            .update_member(
                &mut *tx,
                id,
                name,
                cpf,
                role,
                payment_type,
                payment_value,
                daily_rate,
                contract_value,
                description,
                address,
                phone,
                image_path,
                project_id,
            )
            .await?
            .ok_or(AppError::NotFound)?;

        self.audit
            .record(&mut tx, "team_members", id, AuditAction::Update, Some(&old), Some(&member))
            .await;

        tx.commit().await?;
        Ok(member)
    }

    pub async fn delete_member<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_member(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let rows = self.repo.delete_member(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }

        self.audit
            .record(&mut tx, "team_members", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Vínculos obra x funcionário
    // ---

    pub async fn list_assignments(
        &self,
        team_member_id: Option<i64>,
        project_id: Option<i64>,
    ) -> Result<Vec<ProjectTeamAssignment>, AppError> {
        self.repo.list_assignments(team_member_id, project_id).await
    }

    /// Um funcionário pode estar em várias obras, mas só uma vez em cada uma.
    pub async fn create_assignment<'e, A>(
        &self,
        db: A,
        team_member_id: i64,
        project_id: i64,
        payment_type: Option<PaymentType>,
        payment_value: Option<f64>,
        role: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<ProjectTeamAssignment, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let assignment = self
            .repo
            .insert_assignment(
                &mut *tx,
                team_member_id,
                project_id,
                payment_type,
                payment_value,
                role,
                start_date,
                end_date,
                notes,
            )
            .await?;

        self.audit
            .record(
                &mut tx,
                "project_team_assignments",
                assignment.id,
                AuditAction::Create,
                None,
                Some(&assignment),
            )
            .await;

        tx.commit().await?;
        Ok(assignment)
    }

    pub async fn update_assignment<'e, A>(
        &self,
        db: A,
        id: i64,
        payment_type: Option<PaymentType>,
        payment_value: Option<f64>,
        role: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<ProjectTeamAssignment, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_assignment(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let assignment = self
            .repo
            .update_assignment(&mut *tx, id, payment_type, payment_value, role, start_date, end_date, notes)
            .await?
            .ok_or(AppError::NotFound)?;

        self.audit
            .record(
                &mut tx,
                "project_team_assignments",
                id,
                AuditAction::Update,
                Some(&old),
                Some(&assignment),
            )
            .await;

        tx.commit().await?;
        Ok(assignment)
    }

    pub async fn delete_assignment<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_assignment(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let rows = self.repo.delete_assignment(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }

        self.audit
            .record(&mut tx, "project_team_assignments", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Apontamentos de horas
    // ---

    pub async fn list_time_entries(
        &self,
        team_member_id: Option<i64>,
        project_id: Option<i64>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<TimeEntry>, AppError> {
        self.repo.list_time_entries(team_member_id, project_id, from, to).await
    }

    pub async fn create_time_entry<'e, A>(
        &self,
        db: A,
        team_member_id: i64,
        project_id: i64,
        work_date: NaiveDate,
        hours_worked: f64,
        days_worked: f64,
        description: Option<&str>,
    ) -> Result<TimeEntry, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let entry = self
            .repo
            .insert_time_entry(
                &mut *tx,
                team_member_id,
                project_id,
                work_date,
                hours_worked,
                days_worked,
                description,
            )
            .await?;

        self.audit
            .record(&mut tx, "time_entries", entry.id, AuditAction::Create, None, Some(&entry))
            .await;

        tx.commit().await?;
        Ok(entry)
    }

    pub async fn update_time_entry<'e, A>(
        &self,
        db: A,
        id: i64,
        work_date: NaiveDate,
        hours_worked: f64,
        days_worked: f64,
        description: Option<&str>,
    ) -> Result<TimeEntry, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_time_entry(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let entry = self
            .repo
            .update_time_entry(&mut *tx, id, work_date, hours_worked, days_worked, description)
            .await?
            .ok_or(AppError::NotFound)?;

        self.audit
            .record(&mut tx, "time_entries", id, AuditAction::Update, Some(&old), Some(&entry))
            .await;

        tx.commit().await?;
        Ok(entry)
    }

    pub async fn delete_time_entry<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get_time_entry(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let rows = self.repo.delete_time_entry(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }

        self.audit
            .record(&mut tx, "time_entries", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }
}
