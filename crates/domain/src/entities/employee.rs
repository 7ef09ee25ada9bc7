//! Employee entity - owned by exactly one department

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{DepartmentId, EmailAddress, EmployeeId};

/// An employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier, assigned by the store on insert
    pub id: EmployeeId,
    /// First name
    pub firstname: String,
    /// Last name
    pub lastname: String,
    /// Job position
    pub position: String,
    /// Age in years, positive
    pub age: u32,
    /// Email address, unique across all employees
    pub email: EmailAddress,
    /// Date of employment
    pub date_of_employment: NaiveDate,
    /// Monthly salary, at most 19 integer and 2 fraction digits
    pub salary_per_month: Decimal,
    /// Identifier of the owning department
    pub department_id: DepartmentId,
}

/// Payload for creating an employee or fully replacing its mutable fields.
///
/// The department reference is not part of the payload: it is fixed at
/// creation time from the ancestor path and never overwritten by updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// First name
    pub firstname: String,
    /// Last name
    pub lastname: String,
    /// Job position
    pub position: String,
    /// Age in years
    pub age: u32,
    /// Email address
    pub email: EmailAddress,
    /// Date of employment
    pub date_of_employment: NaiveDate,
    /// Monthly salary
    pub salary_per_month: Decimal,
}

/// Partial-update payload; absent fields are left untouched on merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    /// New first name
    pub firstname: Option<String>,
    /// New last name
    pub lastname: Option<String>,
    /// New position
    pub position: Option<String>,
    /// New age
    pub age: Option<u32>,
    /// New email address
    pub email: Option<EmailAddress>,
    /// New date of employment
    pub date_of_employment: Option<NaiveDate>,
    /// New monthly salary
    pub salary_per_month: Option<Decimal>,
}

impl EmployeePatch {
    /// Check whether the patch carries at least one field
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.position.is_none()
            && self.age.is_none()
            && self.email.is_none()
            && self.date_of_employment.is_none()
            && self.salary_per_month.is_none()
    }
}
