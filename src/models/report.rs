// src/models/report.rs
//
// Estruturas prontas para renderização que o Report Composer devolve.
// A montagem de HTML/PDF é do lado do dashboard; aqui só sai dado agregado.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    attachment::Attachment,
    finance::Transaction,
    inventory::{InventoryItem, InventoryMovement},
    material::Material,
    project::Project,
    team::{PaymentType, ProjectTeamAssignment, TeamMember},
};

// --- Relatório: detalhe da obra ---

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectTotals {
    pub material_cost: f64,
    pub expense_total: f64,
    pub revenue_total: f64,
    /// budget - expense_total
    pub remaining_budget: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamEntry {
    pub assignment: ProjectTeamAssignment,
    pub member: TeamMember,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectDetailReport {
    pub project: Project,
    pub materials: Vec<Material>,
    pub transactions: Vec<Transaction>,
    pub team: Vec<TeamEntry>,
    pub photos: Vec<Attachment>,
    /// Entradas de estoque vinculadas à obra.
    pub inbound_movements: Vec<InventoryMovement>,
    pub totals: ProjectTotals,
}

// --- Relatório: materiais enviados do almoxarifado ---

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryMaterialRow {
    pub movement: InventoryMovement,
    pub item: InventoryItem,
    /// quantity da movimentação x unit_cost atual do item.
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryMaterialsReport {
    pub rows: Vec<InventoryMaterialRow>,
    pub grand_total: f64,
}

// --- Relatório: horas da equipe ---

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamHoursRow {
    pub team_member_id: i64,
    pub name: String,
    pub payment_type: PaymentType,
    pub total_hours: f64,
    pub total_days: f64,
    /// Calculado só para diária (dias x diária) e empreita (valor fechado).
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamHoursReport {
    pub rows: Vec<TeamHoursRow>,
}
