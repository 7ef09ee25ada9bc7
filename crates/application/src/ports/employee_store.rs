//! Employee persistence port

use async_trait::async_trait;
use domain::entities::{Employee, NewEmployee};
use domain::value_objects::{DepartmentId, EmailAddress, EmployeeId};
#[cfg(test)]
use mockall::automock;

use super::paging::PageRequest;
use super::store_error::StoreError;

/// Port for employee persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Fetch one page of a department's employees, in insertion order
    async fn find_page_by_department(
        &self,
        department_id: &DepartmentId,
        page: PageRequest,
    ) -> Result<Vec<Employee>, StoreError>;

    /// Fetch an employee by id, scoped to the owning department
    async fn find_by_department_and_id(
        &self,
        department_id: &DepartmentId,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, StoreError>;

    /// Check whether any employee uses the given email address
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, StoreError>;

    /// Count the employees of a department
    async fn count_by_department(&self, department_id: &DepartmentId) -> Result<u64, StoreError>;

    /// Insert a new employee under the given department, assigning its id
    async fn insert(
        &self,
        new: &NewEmployee,
        department_id: &DepartmentId,
    ) -> Result<Employee, StoreError>;

    /// Persist the mutable fields of an existing employee
    async fn update(&self, employee: &Employee) -> Result<(), StoreError>;

    /// Delete an employee
    async fn delete(&self, id: &EmployeeId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn EmployeeStore>();
    }
}
