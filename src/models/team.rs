// src/models/team.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Forma de pagamento ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Diaria,   // Diária: dias trabalhados x valor da diária
    Salario,  // Salário fixo mensal
    Empreita, // Valor fechado pelo serviço
    Hora,     // Por hora trabalhada
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamMember {
    pub id: i64,

    #[schema(example = "José Carlos da Silva")]
    pub name: String,

    #[schema(example = "123.456.789-00")]
    pub cpf: Option<String>,

    #[schema(example = "Pedreiro")]
    pub role: Option<String>,

    pub payment_type: PaymentType,
    pub payment_value: f64,
    pub daily_rate: f64,
    pub contract_value: f64,

    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_path: Option<String>,

    /// Obra principal do funcionário, se houver.
    pub project_id: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Vínculo funcionário x obra. Uma linha por par (team_member_id, project_id),
// com condições de pagamento e função que valem só naquela obra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProjectTeamAssignment {
    pub id: i64,
    pub team_member_id: i64,
    pub project_id: i64,
    pub payment_type: Option<PaymentType>,
    pub payment_value: Option<f64>,
    pub role: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub start_date: Option<NaiveDate>,

    #[schema(value_type = String, format = Date)]
    pub end_date: Option<NaiveDate>,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TimeEntry {
    pub id: i64,
    pub team_member_id: i64,
    pub project_id: i64,

    #[schema(value_type = String, format = Date)]
    pub work_date: NaiveDate,

    pub hours_worked: f64,
    pub days_worked: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
