//! Employee resource handlers
//!
//! Employees are addressed through the full ancestor path:
//! `/v1/companies/{company_id}/departments/{department_id}/employees/...`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use domain::entities::{Employee, EmployeePatch, NewEmployee};
use domain::value_objects::{CompanyId, DepartmentId, EmailAddress, EmployeeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::ApiError,
    handlers::common::{PageQuery, validate_money_digits},
    state::AppState,
};

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Employee representation returned by the API
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "f47ac10b-58cc-4372-a567-0e02b2c3d479",
    "firstname": "John",
    "lastname": "Doe",
    "position": "Manager",
    "age": 30,
    "email": "john.doe@example.com",
    "dateOfEmployment": "2022-01-01",
    "salaryPerMonth": "5000.00",
    "departmentId": "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
}))]
pub struct EmployeeResponse {
    /// Employee ID
    pub id: Uuid,
    /// First name
    pub firstname: String,
    /// Last name
    pub lastname: String,
    /// Position
    pub position: String,
    /// Age in years
    pub age: u32,
    /// Email address
    pub email: String,
    /// Date of employment
    pub date_of_employment: NaiveDate,
    /// Monthly salary
    pub salary_per_month: Decimal,
    /// Owning department ID
    pub department_id: Uuid,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.as_uuid(),
            firstname: employee.firstname,
            lastname: employee.lastname,
            position: employee.position,
            age: employee.age,
            email: employee.email.into_string(),
            date_of_employment: employee.date_of_employment,
            salary_per_month: employee.salary_per_month,
            department_id: employee.department_id.as_uuid(),
        }
    }
}

/// Create/replace payload; all fields are required
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "firstname": "John",
    "lastname": "Doe",
    "position": "Manager",
    "age": 30,
    "email": "john.doe@example.com",
    "dateOfEmployment": "2022-01-01",
    "salaryPerMonth": "5000.00"
}))]
pub struct EmployeeRequest {
    /// First name
    #[validate(length(min = 1))]
    pub firstname: String,
    /// Last name
    #[validate(length(min = 1))]
    pub lastname: String,
    /// Position
    #[validate(length(min = 1))]
    pub position: String,
    /// Age in years; positive
    #[validate(range(min = 1))]
    pub age: u32,
    /// Email address
    #[validate(email)]
    pub email: String,
    /// Date of employment
    pub date_of_employment: NaiveDate,
    /// Monthly salary; at most 19 integer and 2 fraction digits
    #[validate(custom(function = validate_money_digits))]
    pub salary_per_month: Decimal,
}

impl TryFrom<EmployeeRequest> for NewEmployee {
    type Error = ApiError;

    fn try_from(body: EmployeeRequest) -> Result<Self, Self::Error> {
        let email =
            EmailAddress::new(body.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(Self {
            firstname: body.firstname,
            lastname: body.lastname,
            position: body.position,
            age: body.age,
            email,
            date_of_employment: body.date_of_employment,
            salary_per_month: body.salary_per_month,
        })
    }
}

/// Partial update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatchRequest {
    /// New first name
    #[validate(length(min = 1))]
    pub firstname: Option<String>,
    /// New last name
    #[validate(length(min = 1))]
    pub lastname: Option<String>,
    /// New position
    #[validate(length(min = 1))]
    pub position: Option<String>,
    /// New age
    #[validate(range(min = 1))]
    pub age: Option<u32>,
    /// New email address
    #[validate(email)]
    pub email: Option<String>,
    /// New date of employment
    pub date_of_employment: Option<NaiveDate>,
    /// New monthly salary
    #[validate(custom(function = validate_money_digits))]
    pub salary_per_month: Option<Decimal>,
}

impl TryFrom<EmployeePatchRequest> for EmployeePatch {
    type Error = ApiError;

    fn try_from(body: EmployeePatchRequest) -> Result<Self, Self::Error> {
        let email = body
            .email
            .map(EmailAddress::new)
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(Self {
            firstname: body.firstname,
            lastname: body.lastname,
            position: body.position,
            age: body.age,
            email,
            date_of_employment: body.date_of_employment,
            salary_per_month: body.salary_per_month,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// List a department's employees
///
/// GET /v1/companies/:company_id/departments/:department_id/employees
#[utoipa::path(
    get,
    path = "/v1/companies/{company_id}/departments/{department_id}/employees",
    tag = "employees",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of employees", body = Vec<EmployeeResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn list_employees(
    State(state): State<AppState>,
    Path((company_id, department_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let employees = state
        .employees
        .list_by_company_and_department(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
            query.page_request(),
        )
        .await?;
    let response: Vec<EmployeeResponse> = employees.into_iter().map(Into::into).collect();

    debug!(count = response.len(), "Listed employees");
    Ok(Json(response))
}

/// Get an employee along the full ancestor path
///
/// GET /v1/companies/:company_id/departments/:department_id/employees/:employee_id
#[utoipa::path(
    get,
    path = "/v1/companies/{company_id}/departments/{department_id}/employees/{employee_id}",
    tag = "employees",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID"),
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "The employee", body = EmployeeResponse),
        (status = 404, description = "Company or employee not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    Path((company_id, department_id, employee_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = state
        .employees
        .get_by_company_department_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
            EmployeeId::from_uuid(employee_id),
        )
        .await?;
    Ok(Json(employee.into()))
}

/// Create an employee under a company and department
///
/// POST /v1/companies/:company_id/departments/:department_id/employees
#[utoipa::path(
    post,
    path = "/v1/companies/{company_id}/departments/{department_id}/employees",
    tag = "employees",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID")
    ),
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid payload or email already taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Company or department not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_employee(
    State(state): State<AppState>,
    Path((company_id, department_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<EmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    body.validate()?;

    let employee = state
        .employees
        .create(
            body.try_into()?,
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
        )
        .await?;

    debug!(id = %employee.id, "Created employee");
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// Replace an employee's mutable fields
///
/// PUT /v1/companies/:company_id/departments/:department_id/employees/:employee_id
#[utoipa::path(
    put,
    path = "/v1/companies/{company_id}/departments/{department_id}/employees/{employee_id}",
    tag = "employees",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID"),
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    request_body = EmployeeRequest,
    responses(
        (status = 204, description = "Employee updated"),
        (status = 400, description = "Invalid payload or email already taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Company or employee not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn replace_employee(
    State(state): State<AppState>,
    Path((company_id, department_id, employee_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(body): Json<EmployeeRequest>,
) -> Result<StatusCode, ApiError> {
    body.validate()?;

    state
        .employees
        .replace_by_company_department_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
            EmployeeId::from_uuid(employee_id),
            body.try_into()?,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Partially update an employee
///
/// PATCH /v1/companies/:company_id/departments/:department_id/employees/:employee_id
#[utoipa::path(
    patch,
    path = "/v1/companies/{company_id}/departments/{department_id}/employees/{employee_id}",
    tag = "employees",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID"),
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    request_body = EmployeePatchRequest,
    responses(
        (status = 204, description = "Employee updated"),
        (status = 400, description = "Invalid payload or email already taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Company or employee not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn merge_employee(
    State(state): State<AppState>,
    Path((company_id, department_id, employee_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(body): Json<EmployeePatchRequest>,
) -> Result<StatusCode, ApiError> {
    body.validate()?;

    state
        .employees
        .merge_by_company_department_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
            EmployeeId::from_uuid(employee_id),
            body.try_into()?,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an employee
///
/// DELETE /v1/companies/:company_id/departments/:department_id/employees/:employee_id
#[utoipa::path(
    delete,
    path = "/v1/companies/{company_id}/departments/{department_id}/employees/{employee_id}",
    tag = "employees",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID"),
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Company or employee not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path((company_id, department_id, employee_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .employees
        .delete_by_company_department_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
            EmployeeId::from_uuid(employee_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
