//! Company entity - the root of the ownership hierarchy
//!
//! A company owns departments, which own employees. The
//! `number_of_employees` counter is denormalized: it is maintained
//! exclusively by employee lifecycle events and never set by callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::CompanyId;

/// A company record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier, assigned by the store on insert
    pub id: CompanyId,
    /// Company name, unique across all companies
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Date the company was founded
    pub date_of_creation: NaiveDate,
    /// Count of employees transitively owned through departments.
    /// Maintained only by employee create/delete events.
    pub number_of_employees: u64,
}

/// Payload for creating a company or fully replacing its mutable fields.
///
/// Carries exactly the mutable field list; identity and the employee
/// counter are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    /// Company name, unique across all companies
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Date the company was founded
    pub date_of_creation: NaiveDate,
}

/// Partial-update payload; absent fields are left untouched on merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPatch {
    /// New company name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New founding date
    pub date_of_creation: Option<NaiveDate>,
}

impl CompanyPatch {
    /// Check whether the patch carries at least one field
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.date_of_creation.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_reports_empty() {
        assert!(CompanyPatch::default().is_empty());
    }

    #[test]
    fn patch_with_one_field_is_not_empty() {
        let patch = CompanyPatch {
            name: Some("Acme".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
