//! OpenAPI documentation

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::{companies, departments, employees, health};

/// OpenAPI document for the company management API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Company Management API",
        description = "Hierarchical CRUD API for companies, departments, and employees"
    ),
    paths(
        health::health_check,
        health::readiness_check,
        companies::list_companies,
        companies::get_company,
        companies::create_company,
        companies::replace_company,
        companies::merge_company,
        companies::delete_company,
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::replace_department,
        departments::merge_department,
        departments::delete_department,
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::replace_employee,
        employees::merge_employee,
        employees::delete_employee,
    ),
    components(schemas(
        ErrorResponse,
        health::HealthResponse,
        companies::CompanyResponse,
        companies::CompanyRequest,
        companies::CompanyPatchRequest,
        departments::DepartmentResponse,
        departments::DepartmentRequest,
        departments::DepartmentPatchRequest,
        employees::EmployeeResponse,
        employees::EmployeeRequest,
        employees::EmployeePatchRequest,
    )),
    tags(
        (name = "companies", description = "Operations for working with companies"),
        (name = "departments", description = "Operations for departments within a company"),
        (name = "employees", description = "Operations for employees within a department"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;
