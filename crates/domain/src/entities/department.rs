//! Department entity - owned by exactly one company

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{CompanyId, DepartmentId};

/// A department record
///
/// The owning company is referenced by identifier only; ownership checks
/// go through explicit id lookups, never object-graph navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier, assigned by the store on insert
    pub id: DepartmentId,
    /// Department name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Annual budget, positive, at most 19 integer and 2 fraction digits
    pub annual_budget: Decimal,
    /// Identifier of the owning company
    pub company_id: CompanyId,
}

/// Payload for creating a department or fully replacing its mutable fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    /// Department name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Annual budget
    pub annual_budget: Decimal,
}

/// Partial-update payload; absent fields are left untouched on merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentPatch {
    /// New department name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New annual budget
    pub annual_budget: Option<Decimal>,
}

impl DepartmentPatch {
    /// Check whether the patch carries at least one field
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.annual_budget.is_none()
    }
}
