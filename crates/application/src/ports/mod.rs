//! Port definitions for the application layer
//!
//! Ports are the interfaces through which the aggregates reach external
//! systems. Adapters in the infrastructure layer implement them.

mod company_store;
mod department_store;
mod employee_store;
mod message_source;
mod paging;
mod store_error;

pub use company_store::CompanyStore;
#[cfg(test)]
pub use company_store::MockCompanyStore;
pub use department_store::DepartmentStore;
#[cfg(test)]
pub use department_store::MockDepartmentStore;
pub use employee_store::EmployeeStore;
#[cfg(test)]
pub use employee_store::MockEmployeeStore;
#[cfg(test)]
pub use message_source::MockMessageSource;
pub use message_source::{MessageKey, MessageSource, MessageSourceExt};
pub use paging::{CompanySort, CompanySortKey, PageRequest, SortDirection};
pub use store_error::StoreError;
