//! SQLite-based company persistence

use std::sync::Arc;

use application::ports::{
    CompanySort, CompanySortKey, CompanyStore, PageRequest, SortDirection, StoreError,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::{Company, NewCompany};
use domain::value_objects::CompanyId;
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const COMPANY_COLUMNS: &str = "id, name, description, date_of_creation, number_of_employees";

/// SQLite-based company store.
///
/// Assigns UUIDv4 identifiers on insert and initializes the employee
/// counter to zero. The counter is only ever written through
/// `adjust_employee_count`; `update` deliberately leaves it out.
#[derive(Debug, Clone)]
pub struct SqliteCompanyStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteCompanyStore {
    /// Create a new SQLite company store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for SqliteCompanyStore {
    #[instrument(skip(self))]
    async fn find_page(
        &self,
        page: PageRequest,
        sort: Option<CompanySort>,
    ) -> Result<Vec<Company>, StoreError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let sql = format!(
                "SELECT {COMPANY_COLUMNS} FROM companies
                 ORDER BY {} LIMIT ?1 OFFSET ?2",
                order_clause(sort)
            );
            let mut stmt = conn.prepare(&sql).map_err(StoreError::backend)?;

            let companies = stmt
                .query_map(
                    params![i64::from(page.size), offset_param(page)],
                    row_to_company,
                )
                .map_err(StoreError::backend)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(StoreError::backend)?;

            debug!(count = companies.len(), "Fetched company page");
            Ok(companies)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(company_id = %id))]
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.query_row(
                &format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ?1"),
                [&id_str],
                row_to_company,
            )
            .optional()
            .map_err(StoreError::backend)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(company_id = %id))]
    async fn exists_by_id(&self, id: &CompanyId) -> Result<bool, StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let exists: i64 = conn
                .query_row(
                    "SELECT EXISTS (SELECT 1 FROM companies WHERE id = ?1)",
                    [&id_str],
                    |row| row.get(0),
                )
                .map_err(StoreError::backend)?;
            Ok(exists != 0)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let pool = Arc::clone(&self.pool);
        let name = name.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let exists: i64 = conn
                .query_row(
                    "SELECT EXISTS (SELECT 1 FROM companies WHERE name = ?1)",
                    [&name],
                    |row| row.get(0),
                )
                .map_err(StoreError::backend)?;
            Ok(exists != 0)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn insert(&self, new: &NewCompany) -> Result<Company, StoreError> {
        let pool = Arc::clone(&self.pool);
        let new = new.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            let company = Company {
                id: CompanyId::new(),
                name: new.name,
                description: new.description,
                date_of_creation: new.date_of_creation,
                number_of_employees: 0,
            };

            conn.execute(
                "INSERT INTO companies (id, name, description, date_of_creation, number_of_employees)
                 VALUES (?1, ?2, ?3, ?4, 0)",
                params![
                    company.id.to_string(),
                    company.name,
                    company.description,
                    company.date_of_creation.to_string(),
                ],
            )
            .map_err(StoreError::backend)?;

            debug!(id = %company.id, "Inserted company");
            Ok(company)
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self, company), fields(company_id = %company.id))]
    async fn update(&self, company: &Company) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let company = company.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.execute(
                "UPDATE companies
                 SET name = ?1, description = ?2, date_of_creation = ?3
                 WHERE id = ?4",
                params![
                    company.name,
                    company.description,
                    company.date_of_creation.to_string(),
                    company.id.to_string(),
                ],
            )
            .map_err(StoreError::backend)?;

            debug!("Updated company");
            Ok(())
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(company_id = %id))]
    async fn delete(&self, id: &CompanyId) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            conn.execute("DELETE FROM companies WHERE id = ?1", [&id_str])
                .map_err(StoreError::backend)?;

            debug!("Deleted company");
            Ok(())
        })
        .await
        .map_err(StoreError::backend)?
    }

    #[instrument(skip(self), fields(company_id = %id))]
    async fn adjust_employee_count(&self, id: &CompanyId, delta: i64) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::backend)?;

            // Relative update: concurrent adjustments cannot lose increments.
            conn.execute(
                "UPDATE companies
                 SET number_of_employees = number_of_employees + ?1
                 WHERE id = ?2",
                params![delta, id_str],
            )
            .map_err(StoreError::backend)?;

            debug!(delta, "Adjusted employee counter");
            Ok(())
        })
        .await
        .map_err(StoreError::backend)?
    }
}

/// ORDER BY clause for a company page; unsorted pages keep insertion order
const fn order_clause(sort: Option<CompanySort>) -> &'static str {
    match sort {
        None => "rowid ASC",
        Some(CompanySort { key, direction }) => match (key, direction) {
            (CompanySortKey::Name, SortDirection::Ascending) => "name ASC",
            (CompanySortKey::Name, SortDirection::Descending) => "name DESC",
            (CompanySortKey::DateOfCreation, SortDirection::Ascending) => "date_of_creation ASC",
            (CompanySortKey::DateOfCreation, SortDirection::Descending) => "date_of_creation DESC",
            (CompanySortKey::NumberOfEmployees, SortDirection::Ascending) => {
                "number_of_employees ASC"
            },
            (CompanySortKey::NumberOfEmployees, SortDirection::Descending) => {
                "number_of_employees DESC"
            },
        },
    }
}

fn offset_param(page: PageRequest) -> i64 {
    i64::try_from(page.offset()).unwrap_or(i64::MAX)
}

/// Convert a database row to a Company domain entity
fn row_to_company(row: &Row<'_>) -> rusqlite::Result<Company> {
    let id_str: String = row.get(0)?;
    let date_str: String = row.get(3)?;
    let count: i64 = row.get(4)?;

    Ok(Company {
        id: parse_company_id(0, &id_str)?,
        name: row.get(1)?,
        description: row.get(2)?,
        date_of_creation: parse_date(3, &date_str)?,
        number_of_employees: u64::try_from(count).unwrap_or(0),
    })
}

pub(crate) fn parse_company_id(idx: usize, value: &str) -> rusqlite::Result<CompanyId> {
    CompanyId::parse(value).map_err(|e| conversion_error(idx, e))
}

pub(crate) fn parse_date(idx: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    value.parse().map_err(|e| conversion_error(idx, e))
}

pub(crate) fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

#[cfg(test)]
mod tests {
    use crate::config::DatabaseConfig;
    use crate::persistence::connection::create_pool;

    use super::*;

    fn create_test_store() -> SqliteCompanyStore {
        let pool = create_pool(&DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
        })
        .unwrap();
        SqliteCompanyStore::new(Arc::new(pool))
    }

    fn draft(name: &str) -> NewCompany {
        NewCompany {
            name: name.to_string(),
            description: "desc".to_string(),
            date_of_creation: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_zeroes_the_counter() {
        let store = create_test_store();

        let company = store.insert(&draft("Acme")).await.unwrap();

        assert_eq!(company.number_of_employees, 0);
        let found = store.find_by_id(&company.id).await.unwrap().unwrap();
        assert_eq!(found, company);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let store = create_test_store();
        assert!(store.find_by_id(&CompanyId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exists_by_name_sees_inserted_rows() {
        let store = create_test_store();
        store.insert(&draft("Acme")).await.unwrap();

        assert!(store.exists_by_name("Acme").await.unwrap());
        assert!(!store.exists_by_name("Globex").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_name_violates_the_unique_constraint() {
        let store = create_test_store();
        store.insert(&draft("Acme")).await.unwrap();

        let result = store.insert(&draft("Acme")).await;

        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn update_writes_mutable_fields_but_not_the_counter() {
        let store = create_test_store();
        let mut company = store.insert(&draft("Acme")).await.unwrap();
        store.adjust_employee_count(&company.id, 4).await.unwrap();

        company.name = "Globex".to_string();
        company.number_of_employees = 999; // must be ignored by update
        store.update(&company).await.unwrap();

        let found = store.find_by_id(&company.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Globex");
        assert_eq!(found.number_of_employees, 4);
    }

    #[tokio::test]
    async fn adjust_employee_count_is_relative() {
        let store = create_test_store();
        let company = store.insert(&draft("Acme")).await.unwrap();

        store.adjust_employee_count(&company.id, 2).await.unwrap();
        store.adjust_employee_count(&company.id, -1).await.unwrap();

        let found = store.find_by_id(&company.id).await.unwrap().unwrap();
        assert_eq!(found.number_of_employees, 1);
    }

    #[tokio::test]
    async fn unsorted_page_keeps_insertion_order() {
        let store = create_test_store();
        store.insert(&draft("Zeta")).await.unwrap();
        store.insert(&draft("Alpha")).await.unwrap();

        let page = store
            .find_page(PageRequest::new(0, 10), None)
            .await
            .unwrap();

        let names: Vec<&str> = page.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn sorted_page_orders_by_name() {
        let store = create_test_store();
        store.insert(&draft("Zeta")).await.unwrap();
        store.insert(&draft("Alpha")).await.unwrap();
        store.insert(&draft("Mu")).await.unwrap();

        let sort = CompanySort {
            key: CompanySortKey::Name,
            direction: SortDirection::Descending,
        };
        let page = store
            .find_page(PageRequest::new(0, 10), Some(sort))
            .await
            .unwrap();

        let names: Vec<&str> = page.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Mu", "Alpha"]);
    }

    #[tokio::test]
    async fn pagination_respects_page_boundaries() {
        let store = create_test_store();
        for i in 0..5 {
            store.insert(&draft(&format!("Company {i}"))).await.unwrap();
        }

        let first = store.find_page(PageRequest::new(0, 2), None).await.unwrap();
        let third = store.find_page(PageRequest::new(2, 2), None).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].name, "Company 4");
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = create_test_store();
        let company = store.insert(&draft("Acme")).await.unwrap();

        store.delete(&company.id).await.unwrap();

        assert!(store.find_by_id(&company.id).await.unwrap().is_none());
    }
}
