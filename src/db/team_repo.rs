// src/db/team_repo.rs

use chrono::{NaiveDate, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::team::{PaymentType, ProjectTeamAssignment, TeamMember, TimeEntry},
};

#[derive(Clone)]
pub struct TeamRepository {
    pool: SqlitePool,
}

impl TeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Funcionários
    // ---

    pub async fn list_members(&self, project_id: Option<i64>) -> Result<Vec<TeamMember>, AppError> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT * FROM team_members
             WHERE (?1 IS NULL OR project_id = ?1)
             ORDER BY name ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn get_member(&self, id: i64) -> Result<Option<TeamMember>, AppError> {
        let member = sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    pub async fn insert_member<'e, E>(
        &self,
        executor: E,
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
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members
                (name, cpf, role, payment_type, payment_value, daily_rate, contract_value,
                 description, address, phone, image_path, project_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(cpf)
        .bind(role)
        .bind(payment_type)
        .bind(payment_value)
        .bind(daily_rate)
        .bind(contract_value)
        .bind(description)
        .bind(address)
        .bind(phone)
        .bind(image_path)
        .bind(project_id)
        .bind(now)
        .fetch_one(executor)
        .await?;
        Ok(member)
    }

    pub async fn update_member<'e, E>(
        &self,
        executor: E,
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
    ) -> Result<Option<TeamMember>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            UPDATE team_members
               SET name = ?2, cpf = ?3, role = ?4, payment_type = ?5, payment_value = ?6,
                   daily_rate = ?7, contract_value = ?8, description = ?9, address = ?10,
                   phone = ?11, image_path = ?12, project_id = ?13, updated_at = ?14
             WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(cpf)
        .bind(role)
        .bind(payment_type)
        .bind(payment_value)
        .bind(daily_rate)
        .bind(contract_value)
        .bind(description)
        .bind(address)
        .bind(phone)
        .bind(image_path)
        .bind(project_id)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await?;
        Ok(member)
    }

    pub async fn delete_member<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM team_members WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Vínculos obra x funcionário
    // ---

    pub async fn list_assignments(
        &self,
        team_member_id: Option<i64>,
        project_id: Option<i64>,
    ) -> Result<Vec<ProjectTeamAssignment>, AppError> {
        let assignments = sqlx::query_as::<_, ProjectTeamAssignment>(
            r#"
            SELECT * FROM project_team_assignments
             WHERE (?1 IS NULL OR team_member_id = ?1)
               AND (?2 IS NULL OR project_id = ?2)
             ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(team_member_id)
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assignments)
    }

    pub async fn insert_assignment<'e, E>(
        &self,
        executor: E,
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
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, ProjectTeamAssignment>(
            r#"
            INSERT INTO project_team_assignments
                (team_member_id, project_id, payment_type, payment_value, role,
                 start_date, end_date, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING *
            "#,
        )
        .bind(team_member_id)
        .bind(project_id)
        .bind(payment_type)
        .bind(payment_value)
        .bind(role)
        .bind(start_date)
        .bind(end_date)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // O par (funcionário, obra) é UNIQUE: segunda tentativa não cria linha.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AssignmentAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn update_assignment<'e, E>(
        &self,
        executor: E,
        id: i64,
        payment_type: Option<PaymentType>,
        payment_value: Option<f64>,
        role: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Option<ProjectTeamAssignment>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let assignment = sqlx::query_as::<_, ProjectTeamAssignment>(
            r#"
            UPDATE project_team_assignments
               SET payment_type = ?2, payment_value = ?3, role = ?4,
                   start_date = ?5, end_date = ?6, notes = ?7
             WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_type)
        .bind(payment_value)
        .bind(role)
        .bind(start_date)
        .bind(end_date)
        .bind(notes)
        .fetch_optional(executor)
        .await?;
        Ok(assignment)
    }

    pub async fn delete_assignment<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM project_team_assignments WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn get_assignment(&self, id: i64) -> Result<Option<ProjectTeamAssignment>, AppError> {
        let assignment = sqlx::query_as::<_, ProjectTeamAssignment>(
            "SELECT * FROM project_team_assignments WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assignment)
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
        let entries = sqlx::query_as::<_, TimeEntry>(
            r#"
            SELECT * FROM time_entries
             WHERE (?1 IS NULL OR team_member_id = ?1)
               AND (?2 IS NULL OR project_id = ?2)
               AND (?3 IS NULL OR work_date >= ?3)
               AND (?4 IS NULL OR work_date <= ?4)
             ORDER BY work_date DESC, id DESC
            "#,
        )
        .bind(team_member_id)
        .bind(project_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn get_time_entry(&self, id: i64) -> Result<Option<TimeEntry>, AppError> {
        let entry = sqlx::query_as::<_, TimeEntry>("SELECT * FROM time_entries WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    pub async fn insert_time_entry<'e, E>(
        &self,
        executor: E,
        team_member_id: i64,
        project_id: i64,
        work_date: NaiveDate,
        hours_worked: f64,
        days_worked: f64,
        description: Option<&str>,
    ) -> Result<TimeEntry, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let entry = sqlx::query_as::<_, TimeEntry>(
            r#"
            INSERT INTO time_entries
                (team_member_id, project_id, work_date, hours_worked, days_worked, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(team_member_id)
        .bind(project_id)
        .bind(work_date)
        .bind(hours_worked)
        .bind(days_worked)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(entry)
    }

    pub async fn update_time_entry<'e, E>(
        &self,
        executor: E,
        id: i64,
        work_date: NaiveDate,
        hours_worked: f64,
        days_worked: f64,
        description: Option<&str>,
    ) -> Result<Option<TimeEntry>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let entry = sqlx::query_as::<_, TimeEntry>(
            r#"
            UPDATE time_entries
               SET work_date = ?2, hours_worked = ?3, days_worked = ?4, description = ?5
             WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(work_date)
        .bind(hours_worked)
        .bind(days_worked)
        .bind(description)
        .fetch_optional(executor)
        .await?;
        Ok(entry)
    }

    pub async fn delete_time_entry<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Totais por funcionário para o relatório de horas.
    pub async fn hours_per_member(
        &self,
    ) -> Result<Vec<(i64, String, PaymentType, f64, f64, f64)>, AppError> {
        let rows = sqlx::query_as::<_, (i64, String, PaymentType, f64, f64, f64)>(
            r#"
            SELECT m.id, m.name, m.payment_type,
                   COALESCE(SUM(te.hours_worked), 0.0),
                   COALESCE(SUM(te.days_worked), 0.0),
                   CASE m.payment_type
                        WHEN 'diaria' THEN m.daily_rate
                        WHEN 'empreita' THEN m.contract_value
                        ELSE 0.0
                   END
              FROM team_members m
              LEFT JOIN time_entries te ON te.team_member_id = m.id
             GROUP BY m.id, m.name, m.payment_type
             ORDER BY m.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
