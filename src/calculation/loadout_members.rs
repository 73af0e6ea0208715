//! Resolving loadout references against a snapshot of members.
//!
//! A loadout stores equipment and employee ids. Costing it means looking
//! each id up in one consistent snapshot, deriving the member's hourly cost,
//! and deciding what to do with ids that no longer resolve.

use serde::{Deserialize, Serialize};

use super::compensation::{EmployeeCompensation, compensate_employee};
use super::equipment_cost::{EquipmentCostResult, compute_equipment_costs};
use super::loadout_aggregation::{LoadoutCosts, MemberCost, aggregate_loadout};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, Employee, Equipment, EquipmentCostModel, Loadout, MissingMemberPolicy,
};

/// Warning code emitted for each excluded member.
pub const MISSING_MEMBER_WARNING: &str = "MISSING_LOADOUT_MEMBER";

/// Which kind of member a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// A piece of equipment.
    Equipment,
    /// An employee.
    Employee,
}

/// A loadout reference that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingMember {
    /// Kind of member referenced.
    pub kind: MemberKind,
    /// The unresolved id.
    pub id: String,
}

impl MissingMember {
    fn label(&self) -> String {
        match self.kind {
            MemberKind::Equipment => format!("equipment:{}", self.id),
            MemberKind::Employee => format!("employee:{}", self.id),
        }
    }
}

/// Members of a loadout resolved against a snapshot, with their costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMembers {
    /// Cost model applied to every member equipment.
    pub cost_model: EquipmentCostModel,
    /// Equipment costs keyed by id, in loadout order.
    pub equipment: Vec<(String, EquipmentCostResult)>,
    /// Employee compensation, in loadout order.
    pub employees: Vec<EmployeeCompensation>,
    /// References that were excluded.
    pub missing: Vec<MissingMember>,
    /// One warning per excluded reference.
    pub warnings: Vec<AuditWarning>,
}

impl ResolvedMembers {
    /// Equipment hourly totals for aggregation.
    pub fn equipment_costs(&self) -> Vec<MemberCost> {
        self.equipment
            .iter()
            .map(|(id, result)| MemberCost::new(id.clone(), result.total_cost_per_hour))
            .collect()
    }

    /// Employee true costs for aggregation.
    pub fn labor_costs(&self) -> Vec<MemberCost> {
        self.employees
            .iter()
            .map(|c| MemberCost::new(c.employee_id.clone(), c.true_cost_per_hour))
            .collect()
    }

    /// Audit steps of every member calculation in order.
    pub fn audit_steps(&self) -> Vec<AuditStep> {
        self.equipment
            .iter()
            .map(|(_, result)| result.audit_step.clone())
            .chain(self.employees.iter().flat_map(|c| c.audit_steps()))
            .collect()
    }
}

/// Resolves a loadout's references against one snapshot of equipment and
/// employees and costs every member found.
///
/// Equipment is costed with the loadout's own cost model when it has one,
/// otherwise with `default_model`. Audit steps are numbered from
/// `first_step`.
///
/// # Errors
///
/// - `InconsistentAggregation` listing every unresolved reference when
///   `policy` is [`MissingMemberPolicy::Fail`]
/// - any error from costing a member
pub fn resolve_loadout_members(
    loadout: &Loadout,
    equipment: &[Equipment],
    employees: &[Employee],
    default_model: EquipmentCostModel,
    policy: MissingMemberPolicy,
    first_step: u32,
) -> EngineResult<ResolvedMembers> {
    let cost_model = loadout.cost_model.unwrap_or(default_model);
    let mut step = first_step;
    let mut missing = Vec::new();

    let mut equipment_costs = Vec::with_capacity(loadout.equipment_ids.len());
    for id in &loadout.equipment_ids {
        match equipment.iter().find(|e| &e.id == id) {
            Some(item) => {
                let result = compute_equipment_costs(&item.inputs, cost_model, step)?;
                step += 1;
                equipment_costs.push((id.clone(), result));
            }
            None => missing.push(MissingMember {
                kind: MemberKind::Equipment,
                id: id.clone(),
            }),
        }
    }

    let mut compensations = Vec::with_capacity(loadout.employee_ids.len());
    for id in &loadout.employee_ids {
        match employees.iter().find(|e| &e.id == id) {
            Some(employee) => {
                let compensation = compensate_employee(employee, step)?;
                step += 2;
                compensations.push(compensation);
            }
            None => missing.push(MissingMember {
                kind: MemberKind::Employee,
                id: id.clone(),
            }),
        }
    }

    if !missing.is_empty() && policy == MissingMemberPolicy::Fail {
        return Err(EngineError::InconsistentAggregation {
            loadout_id: loadout.id.clone(),
            missing: missing.iter().map(MissingMember::label).collect(),
        });
    }

    let warnings = missing
        .iter()
        .map(|m| AuditWarning {
            code: MISSING_MEMBER_WARNING.to_string(),
            message: format!(
                "Loadout '{}' references {} which is not in the snapshot; excluded from totals",
                loadout.id,
                m.label()
            ),
            severity: "high".to_string(),
        })
        .collect();

    Ok(ResolvedMembers {
        cost_model,
        equipment: equipment_costs,
        employees: compensations,
        missing,
        warnings,
    })
}

/// A costed loadout: its resolved members and aggregate totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutCostReport {
    /// The loadout that was costed.
    pub loadout_id: String,
    /// Members with their individual costs.
    pub members: ResolvedMembers,
    /// Totals and billing rates.
    pub costs: LoadoutCosts,
}

impl LoadoutCostReport {
    /// Every audit step, members first.
    pub fn audit_steps(&self) -> Vec<AuditStep> {
        let mut steps = self.members.audit_steps();
        steps.extend(self.costs.audit_steps.iter().cloned());
        steps
    }
}

/// Resolves a loadout's members and aggregates them in one pass.
///
/// Totals are always rebuilt from the snapshot; nothing from a previous
/// aggregation is reused.
pub fn cost_loadout(
    loadout: &Loadout,
    equipment: &[Equipment],
    employees: &[Employee],
    default_model: EquipmentCostModel,
    policy: MissingMemberPolicy,
) -> EngineResult<LoadoutCostReport> {
    let members = resolve_loadout_members(loadout, equipment, employees, default_model, policy, 1)?;
    let next_step = members.audit_steps().len() as u32 + 1;
    let costs = aggregate_loadout(
        &members.equipment_costs(),
        &members.labor_costs(),
        loadout.overhead_cost,
        next_step,
    )?;

    Ok(LoadoutCostReport {
        loadout_id: loadout.id.clone(),
        members,
        costs,
    })
}
