//! Department persistence port

use async_trait::async_trait;
use domain::entities::{Department, NewDepartment};
use domain::value_objects::{CompanyId, DepartmentId};
#[cfg(test)]
use mockall::automock;

use super::paging::PageRequest;
use super::store_error::StoreError;

/// Port for department persistence operations.
///
/// Lookups are scoped to the owning company so a department is unreachable
/// through a path naming the wrong company.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// Fetch one page of a company's departments, in insertion order
    async fn find_page_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> Result<Vec<Department>, StoreError>;

    /// Fetch a department by id, scoped to the owning company
    async fn find_by_company_and_id(
        &self,
        company_id: &CompanyId,
        id: &DepartmentId,
    ) -> Result<Option<Department>, StoreError>;

    /// Insert a new department under the given company, assigning its id
    async fn insert(
        &self,
        new: &NewDepartment,
        company_id: &CompanyId,
    ) -> Result<Department, StoreError>;

    /// Persist the mutable fields of an existing department
    async fn update(&self, department: &Department) -> Result<(), StoreError>;

    /// Delete a department and, by cascade, its employees.
    ///
    /// Returns the number of employees removed by the cascade so the caller
    /// can keep the company counter in sync.
    async fn delete(&self, id: &DepartmentId) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn DepartmentStore>();
    }
}
