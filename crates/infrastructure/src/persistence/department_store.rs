//! SQLite-based department persistence

use std::sync::Arc;

use application::ports::{DepartmentStore, PageRequest, StoreError};
use async_trait::async_trait;
use domain::entities::{Department, NewDepartment};
use domain::value_objects::{CompanyId, DepartmentId};
use rusqlite::{OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tokio::task;
use tracing::{debug, instrument};

use super::company_store::{conversion_error, parse_company_id};
use super::connection::ConnectionPool;

const DEPARTMENT_COLUMNS: &str = "id, name, description, annual_budget, company_id";

/// SQLite-based department store
#[derive(Debug, Clone)]
pub struct SqliteDepartmentStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteDepartmentStore {
    /// Create a new SQLite department store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentStore for SqliteDepartmentStore {
    #[instrument(skip(self), fields(company_id = %company_id))]
    async fn find_page_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> Result<Vec<Department>, StoreError> {
        let pool = Arc::clone(&self.pool);
        let company_str = company_id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {DEPARTMENT_COLUMNS} FROM departments
                     WHERE company_id = ?1
                     ORDER BY rowid ASC LIMIT ?2 OFFSET ?3"
                ))
                .map_err(StoreError::backend)?;

            let departments = stmt
                .query_map(
                    params![
                        company_str,
                        i64::from(page.size),
                        i64::try_from(page.offset()).unwrap_or(i64::MAX),
                    ],
                    row_to_department,
                )
                .map_err(StoreError::backend)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(StoreError::backend)?;

            debug!(count = departments.len(), "Fetched department page");
            Ok(departments)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(company_id = %company_id, department_id = %id))]
    async fn find_by_company_and_id(
        &self,
        company_id: &CompanyId,
        id: &DepartmentId,
    ) -> Result<Option<Department>, StoreError> {
        let pool = Arc::clone(&self.pool);
        let company_str = company_id.to_string();
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.query_row(
                &format!(
                    "SELECT {DEPARTMENT_COLUMNS} FROM departments
                     WHERE company_id = ?1 AND id = ?2"
                ),
                params![company_str, id_str],
                row_to_department,
            )
            .optional()
            .map_err(StoreError::backend)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self, new), fields(name = %new.name, company_id = %company_id))]
    async fn insert(
        &self,
        new: &NewDepartment,
        company_id: &CompanyId,
    ) -> Result<Department, StoreError> {
        let pool = Arc::clone(&self.pool);
        let new = new.clone();
        let company_id = *company_id;

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let department = Department {
                id: DepartmentId::new(),
                name: new.name,
                description: new.description,
                annual_budget: new.annual_budget,
                company_id,
            };

            conn.execute(
                "INSERT INTO departments (id, name, description, annual_budget, company_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    department.id.to_string(),
                    department.name,
                    department.description,
                    department.annual_budget.to_string(),
                    department.company_id.to_string(),
                ],
            )
            .map_err(StoreError::backend)?;

            debug!(id = %department.id, "Inserted department");
            Ok(department)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self, department), fields(department_id = %department.id))]
    async fn update(&self, department: &Department) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let department = department.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.execute(
                "UPDATE departments
                 SET name = ?1, description = ?2, annual_budget = ?3
                 WHERE id = ?4",
                params![
                    department.name,
                    department.description,
                    department.annual_budget.to_string(),
                    department.id.to_string(),
                ],
            )
            .map_err(StoreError::backend)?;

            debug!("Updated department");
            Ok(())
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(department_id = %id))]
    async fn delete(&self, id: &DepartmentId) -> Result<u64, StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(StoreError::backend)?;

            // Count and delete in one transaction so the reported cascade
            // size matches the rows actually removed.
            let tx = conn.transaction().map_err(StoreError::backend)?;
            let employees: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM employees WHERE department_id = ?1",
                    [&id_str],
                    |row| row.get(0),
                )
                .map_err(StoreError::backend)?;
            tx.execute("DELETE FROM departments WHERE id = ?1", [&id_str])
                .map_err(StoreError::backend)?;
            tx.commit().map_err(StoreError::backend)?;

            debug!(cascaded_employees = employees, "Deleted department");
            Ok(u64::try_from(employees).unwrap_or(0))
        })
        .await
        .map_err(StoreError::backend)?
    }
}

/// Convert a database row to a Department domain entity
fn row_to_department(row: &Row<'_>) -> rusqlite::Result<Department> {
    let id_str: String = row.get(0)?;
    let budget_str: String = row.get(3)?;
    let company_str: String = row.get(4)?;

    Ok(Department {
        id: parse_department_id(0, &id_str)?,
        name: row.get(1)?,
        description: row.get(2)?,
        annual_budget: parse_decimal(3, &budget_str)?,
        company_id: parse_company_id(4, &company_str)?,
    })
}

pub(crate) fn parse_department_id(idx: usize, value: &str) -> rusqlite::Result<DepartmentId> {
    DepartmentId::parse(value).map_err(|e| conversion_error(idx, e))
}

pub(crate) fn parse_decimal(idx: usize, value: &str) -> rusqlite::Result<Decimal> {
    value.parse().map_err(|e| conversion_error(idx, e))
}
