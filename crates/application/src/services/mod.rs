//! Aggregate services - one per entity kind
//!
//! Each service owns the validation and mutation logic for its entity and
//! the invariants that reach across the ownership hierarchy. Checks run in
//! a fixed order: ancestor existence, then sibling uniqueness, then target
//! existence, short-circuiting at the first failure.

mod company_service;
mod department_service;
mod employee_service;

pub use company_service::CompanyService;
pub use department_service::DepartmentService;
pub use employee_service::EmployeeService;
