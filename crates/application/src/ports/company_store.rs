//! Company persistence port

use async_trait::async_trait;
use domain::entities::{Company, NewCompany};
use domain::value_objects::CompanyId;
#[cfg(test)]
use mockall::automock;

use super::paging::{CompanySort, PageRequest};
use super::store_error::StoreError;

/// Port for company persistence operations.
///
/// `insert` assigns the identifier and initializes the employee counter to
/// zero. Deleting a company cascades to its departments and their
/// employees.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Fetch one page of companies, optionally sorted
    async fn find_page(
        &self,
        page: PageRequest,
        sort: Option<CompanySort>,
    ) -> Result<Vec<Company>, StoreError>;

    /// Fetch a company by id
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, StoreError>;

    /// Check whether a company with the given id exists
    async fn exists_by_id(&self, id: &CompanyId) -> Result<bool, StoreError>;

    /// Check whether a company with the given name exists
    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError>;

    /// Insert a new company, assigning its id and zeroing the counter
    async fn insert(&self, new: &NewCompany) -> Result<Company, StoreError>;

    /// Persist the mutable fields of an existing company
    async fn update(&self, company: &Company) -> Result<(), StoreError>;

    /// Delete a company and, by cascade, its departments and employees
    async fn delete(&self, id: &CompanyId) -> Result<(), StoreError>;

    /// Apply a relative adjustment to the denormalized employee counter
    async fn adjust_employee_count(&self, id: &CompanyId, delta: i64) -> Result<(), StoreError>;
}
