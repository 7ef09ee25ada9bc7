//! SQLite-based employee persistence

use std::sync::Arc;

use application::ports::{EmployeeStore, PageRequest, StoreError};
use async_trait::async_trait;
use domain::entities::{Employee, NewEmployee};
use domain::value_objects::{DepartmentId, EmailAddress, EmployeeId};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::company_store::{conversion_error, parse_date};
use super::connection::ConnectionPool;
use super::department_store::{parse_decimal, parse_department_id};

const EMPLOYEE_COLUMNS: &str = "id, firstname, lastname, position, age, email, \
     date_of_employment, salary_per_month, department_id";

/// SQLite-based employee store
#[derive(Debug, Clone)]
pub struct SqliteEmployeeStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteEmployeeStore {
    /// Create a new SQLite employee store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for SqliteEmployeeStore {
    #[instrument(skip(self), fields(department_id = %department_id))]
    async fn find_page_by_department(
        &self,
        department_id: &DepartmentId,
        page: PageRequest,
    ) -> Result<Vec<Employee>, StoreError> {
        let pool = Arc::clone(&self.pool);
        let department_str = department_id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {EMPLOYEE_COLUMNS} FROM employees
                     WHERE department_id = ?1
                     ORDER BY rowid ASC LIMIT ?2 OFFSET ?3"
                ))
                .map_err(StoreError::backend)?;

            let employees = stmt
                .query_map(
                    params![
                        department_str,
                        i64::from(page.size),
                        i64::try_from(page.offset()).unwrap_or(i64::MAX),
                    ],
                    row_to_employee,
                )
                .map_err(StoreError::backend)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(StoreError::backend)?;

            debug!(count = employees.len(), "Fetched employee page");
            Ok(employees)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(department_id = %department_id, employee_id = %id))]
    async fn find_by_department_and_id(
        &self,
        department_id: &DepartmentId,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, StoreError> {
        let pool = Arc::clone(&self.pool);
        let department_str = department_id.to_string();
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.query_row(
                &format!(
                    "SELECT {EMPLOYEE_COLUMNS} FROM employees
                     WHERE department_id = ?1 AND id = ?2"
                ),
                params![department_str, id_str],
                row_to_employee,
            )
            .optional()
            .map_err(StoreError::backend)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self, email))]
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        let pool = Arc::clone(&self.pool);
        let email = email.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let exists: i64 = conn
                .query_row(
                    "SELECT EXISTS (SELECT 1 FROM employees WHERE email = ?1)",
                    [&email],
                    |row| row.get(0),
                )
                .map_err(StoreError::backend)?;
            Ok(exists != 0)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(department_id = %department_id))]
    async fn count_by_department(&self, department_id: &DepartmentId) -> Result<u64, StoreError> {
        let pool = Arc::clone(&self.pool);
        let department_str = department_id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM employees WHERE department_id = ?1",
                    [&department_str],
                    |row| row.get(0),
                )
                .map_err(StoreError::backend)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self, new), fields(email = %new.email, department_id = %department_id))]
    async fn insert(
        &self,
        new: &NewEmployee,
        department_id: &DepartmentId,
    ) -> Result<Employee, StoreError> {
        let pool = Arc::clone(&self.pool);
        let new = new.clone();
        let department_id = *department_id;

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let employee = Employee {
                id: EmployeeId::new(),
                firstname: new.firstname,
                lastname: new.lastname,
                position: new.position,
                age: new.age,
                email: new.email,
                date_of_employment: new.date_of_employment,
                salary_per_month: new.salary_per_month,
                department_id,
            };

            conn.execute(
                "INSERT INTO employees
                 (id, firstname, lastname, position, age, email,
                  date_of_employment, salary_per_month, department_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    employee.id.to_string(),
                    employee.firstname,
                    employee.lastname,
                    employee.position,
                    employee.age,
                    employee.email.as_str(),
                    employee.date_of_employment.to_string(),
                    employee.salary_per_month.to_string(),
                    employee.department_id.to_string(),
                ],
            )
            .map_err(StoreError::backend)?;

            debug!(id = %employee.id, "Inserted employee");
            Ok(employee)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self, employee), fields(employee_id = %employee.id))]
    async fn update(&self, employee: &Employee) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let employee = employee.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.execute(
                "UPDATE employees
                 SET firstname = ?1, lastname = ?2, position = ?3, age = ?4,
                     email = ?5, date_of_employment = ?6, salary_per_month = ?7
                 WHERE id = ?8",
                params![
                    employee.firstname,
                    employee.lastname,
                    employee.position,
                    employee.age,
                    employee.email.as_str(),
                    employee.date_of_employment.to_string(),
                    employee.salary_per_month.to_string(),
                    employee.id.to_string(),
                ],
            )
            .map_err(StoreError::backend)?;

            debug!("Updated employee");
            Ok(())
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(employee_id = %id))]
    async fn delete(&self, id: &EmployeeId) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.execute("DELETE FROM employees WHERE id = ?1", [&id_str])
                .map_err(StoreError::backend)?;

            debug!("Deleted employee");
            Ok(())
        })
        .await
        .map_err(StoreError::backend)?
    }
}

/// Convert a database row to an Employee domain entity
fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    let id_str: String = row.get(0)?;
    let age: i64 = row.get(4)?;
    let email_str: String = row.get(5)?;
    let date_str: String = row.get(6)?;
    let salary_str: String = row.get(7)?;
    let department_str: String = row.get(8)?;

    Ok(Employee {
        id: EmployeeId::parse(&id_str).map_err(|e| conversion_error(0, e))?,
        firstname: row.get(1)?,
        lastname: row.get(2)?,
        position: row.get(3)?,
        age: u32::try_from(age).map_err(|e| conversion_error(4, e))?,
        email: EmailAddress::new(email_str).map_err(|e| conversion_error(5, e))?,
        date_of_employment: parse_date(6, &date_str)?,
        salary_per_month: parse_decimal(7, &salary_str)?,
        department_id: parse_department_id(8, &department_str)?,
    })
}
