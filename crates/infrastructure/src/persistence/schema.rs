//! Embedded database schema
//!
//! The schema is bootstrapped idempotently at pool creation. Ownership is
//! modeled with foreign keys and `ON DELETE CASCADE`: removing a company
//! removes its departments and, transitively, their employees.

use rusqlite::Connection;
use tracing::debug;

use super::connection::DatabaseError;

/// Create all tables and indexes if they do not exist yet
pub fn ensure_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS companies (
            id                  TEXT PRIMARY KEY,
            name                TEXT NOT NULL UNIQUE,
            description         TEXT NOT NULL,
            date_of_creation    TEXT NOT NULL,
            number_of_employees INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS departments (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            description   TEXT NOT NULL,
            annual_budget TEXT NOT NULL,
            company_id    TEXT NOT NULL
                          REFERENCES companies (id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS employees (
            id                 TEXT PRIMARY KEY,
            firstname          TEXT NOT NULL,
            lastname           TEXT NOT NULL,
            position           TEXT NOT NULL,
            age                INTEGER NOT NULL,
            email              TEXT NOT NULL UNIQUE,
            date_of_employment TEXT NOT NULL,
            salary_per_month   TEXT NOT NULL,
            department_id      TEXT NOT NULL
                               REFERENCES departments (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_departments_company ON departments (company_id);
        CREATE INDEX IF NOT EXISTS idx_employees_department ON employees (department_id);
        ",
    )?;

    debug!("Database schema ensured");
    Ok(())
}
