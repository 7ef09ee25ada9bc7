//! Application state shared across handlers

use std::sync::Arc;

use application::ports::{CompanyStore, DepartmentStore, EmployeeStore, MessageSource};
use application::{CompanyService, DepartmentService, EmployeeService};
use infrastructure::{
    ConnectionPool, SqliteCompanyStore, SqliteDepartmentStore, SqliteEmployeeStore, StaticMessages,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Company aggregate service
    pub companies: Arc<CompanyService>,
    /// Department aggregate service
    pub departments: Arc<DepartmentService>,
    /// Employee aggregate service
    pub employees: Arc<EmployeeService>,
}

impl AppState {
    /// Wire the aggregate services over the SQLite adapters
    #[must_use]
    pub fn from_pool(pool: Arc<ConnectionPool>) -> Self {
        let company_store: Arc<dyn CompanyStore> =
            Arc::new(SqliteCompanyStore::new(Arc::clone(&pool)));
        let department_store: Arc<dyn DepartmentStore> =
            Arc::new(SqliteDepartmentStore::new(Arc::clone(&pool)));
        let employee_store: Arc<dyn EmployeeStore> =
            Arc::new(SqliteEmployeeStore::new(Arc::clone(&pool)));
        let messages: Arc<dyn MessageSource> = Arc::new(StaticMessages);

        let companies = Arc::new(CompanyService::new(
            Arc::clone(&company_store),
            Arc::clone(&messages),
        ));
        let departments = Arc::new(DepartmentService::new(
            department_store,
            Arc::clone(&companies),
            Arc::clone(&company_store),
            Arc::clone(&messages),
        ));
        let employees = Arc::new(EmployeeService::new(
            employee_store,
            company_store,
            Arc::clone(&departments),
            messages,
        ));

        Self {
            companies,
            departments,
            employees,
        }
    }
}
