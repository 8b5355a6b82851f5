// src/services/report_service.rs

use crate::{
    common::error::AppError,
    db::{
        AttachmentRepository, FinanceRepository, InventoryRepository, MaterialRepository,
        ProjectRepository, TeamRepository,
    },
    models::{
        attachment::{AttachmentKind, OwnerTable},
        inventory::MovementType,
        report::{
            InventoryMaterialRow, InventoryMaterialsReport, ProjectDetailReport, ProjectTotals,
            TeamEntry, TeamHoursReport, TeamHoursRow,
        },
        team::PaymentType,
    },
};

// O Report Composer: só leitura e agregação. Devolve estruturas prontas para
// o dashboard renderizar/imprimir; nenhum HTML é montado aqui.
#[derive(Clone)]
pub struct ReportService {
    project_repo: ProjectRepository,
    material_repo: MaterialRepository,
    finance_repo: FinanceRepository,
    team_repo: TeamRepository,
    inventory_repo: InventoryRepository,
    attachment_repo: AttachmentRepository,
}

impl ReportService {
    pub fn new(
        project_repo: ProjectRepository,
        material_repo: MaterialRepository,
        finance_repo: FinanceRepository,
        team_repo: TeamRepository,
        inventory_repo: InventoryRepository,
        attachment_repo: AttachmentRepository,
    ) -> Self {
        Self {
            project_repo,
            material_repo,
            finance_repo,
            team_repo,
            inventory_repo,
            attachment_repo,
        }
    }

    /// Ficha completa da obra: materiais, lançamentos, equipe, fotos,
    /// entradas de estoque e os totais derivados.
    pub async fn project_detail(&self, project_id: i64) -> Result<ProjectDetailReport, AppError> {
        let project = self.project_repo.get(project_id).await?.ok_or(AppError::NotFound)?;

        let materials = self.material_repo.list_by_project(project_id).await?;
        let transactions = self.finance_repo.list(Some(project_id), None).await?;

        let assignments = self.team_repo.list_assignments(None, Some(project_id)).await?;
        let mut team = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            if let Some(member) = self.team_repo.get_member(assignment.team_member_id).await? {
                team.push(TeamEntry { assignment, member });
            }
        }

        let photos = self
            .attachment_repo
            .list(Some(OwnerTable::Projects), Some(project_id), Some(AttachmentKind::Image))
            .await?;

        let inbound_movements = self
            .inventory_repo
            .list_movements(None, Some(project_id), Some(MovementType::In))
            .await?;

        let material_cost = materials.iter().map(|m| m.cost).sum();
        let (expense_total, revenue_total, _) =
            self.finance_repo.totals(Some(project_id)).await?;

        let totals = ProjectTotals {
            material_cost,
            expense_total,
            revenue_total,
            remaining_budget: project.budget - expense_total,
        };

        Ok(ProjectDetailReport {
            project,
            materials,
            transactions,
            team,
            photos,
            inbound_movements,
            totals,
        })
    }

    /// Saídas do almoxarifado (opcionalmente de uma obra só) com o snapshot
    /// atual de cada item e o valor total movimentado.
    pub async fn inventory_materials(
        &self,
        project_id: Option<i64>,
    ) -> Result<InventoryMaterialsReport, AppError> {
        let movements = self
            .inventory_repo
            .list_movements(None, project_id, Some(MovementType::Out))
            .await?;

        let mut rows = Vec::with_capacity(movements.len());
        let mut grand_total = 0.0;
        for movement in movements {
            // Item pode ter sido apagado depois da movimentação; pula a linha.
            let Some(item) = self.inventory_repo.get_item(movement.inventory_id).await? else {
                continue;
            };
            let value = movement.quantity * item.unit_cost;
            grand_total += value;
            rows.push(InventoryMaterialRow { movement, item, value });
        }

        Ok(InventoryMaterialsReport { rows, grand_total })
    }

    /// Horas e dias por funcionário, com o valor a pagar onde a regra existe:
    /// diária (dias x valor) e empreita (valor fechado).
    pub async fn team_hours(&self) -> Result<TeamHoursReport, AppError> {
        let totals = self.team_repo.hours_per_member().await?;

        let rows = totals
            .into_iter()
            .map(|(team_member_id, name, payment_type, total_hours, total_days, rate)| {
                let amount = match payment_type {
                    PaymentType::Diaria => Some(total_days * rate),
                    PaymentType::Empreita => Some(rate),
                    _ => None,
                };
                TeamHoursRow { team_member_id, name, payment_type, total_hours, total_days, amount }
            })
            .collect();

        Ok(TeamHoursReport { rows })
    }
}
