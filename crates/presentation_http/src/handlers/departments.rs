//! Department resource handlers
//!
//! Departments are addressed through their owning company:
//! `/v1/companies/{company_id}/departments/...`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use domain::entities::{Department, DepartmentPatch, NewDepartment};
use domain::value_objects::{CompanyId, DepartmentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::ApiError,
    handlers::common::{PageQuery, validate_positive_money},
    state::AppState,
};

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Department representation returned by the API
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
    "name": "Sales",
    "description": "Field and inside sales",
    "annualBudget": "100000.00",
    "companyId": "550e8400-e29b-41d4-a716-446655440000"
}))]
pub struct DepartmentResponse {
    /// Department ID
    pub id: Uuid,
    /// Department name
    pub name: String,
    /// Description
    pub description: String,
    /// Annual budget
    pub annual_budget: Decimal,
    /// Owning company ID
    pub company_id: Uuid,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id.as_uuid(),
            name: department.name,
            description: department.description,
            annual_budget: department.annual_budget,
            company_id: department.company_id.as_uuid(),
        }
    }
}

/// Create/replace payload; all fields are required
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Sales",
    "description": "Field and inside sales",
    "annualBudget": "100000.00"
}))]
pub struct DepartmentRequest {
    /// Department name
    #[validate(length(min = 1))]
    pub name: String,
    /// Description
    #[validate(length(min = 1))]
    pub description: String,
    /// Annual budget; positive, at most 19 integer and 2 fraction digits
    #[validate(custom(function = validate_positive_money))]
    pub annual_budget: Decimal,
}

impl From<DepartmentRequest> for NewDepartment {
    fn from(body: DepartmentRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            annual_budget: body.annual_budget,
        }
    }
}

/// Partial update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentPatchRequest {
    /// New department name
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// New description
    #[validate(length(min = 1))]
    pub description: Option<String>,
    /// New annual budget
    #[validate(custom(function = validate_positive_money))]
    pub annual_budget: Option<Decimal>,
}

impl From<DepartmentPatchRequest> for DepartmentPatch {
    fn from(body: DepartmentPatchRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            annual_budget: body.annual_budget,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// List a company's departments
///
/// GET /v1/companies/:company_id/departments
#[utoipa::path(
    get,
    path = "/v1/companies/{company_id}/departments",
    tag = "departments",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of departments", body = Vec<DepartmentResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn list_departments(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let departments = state
        .departments
        .list_by_company(CompanyId::from_uuid(company_id), query.page_request())
        .await?;
    let response: Vec<DepartmentResponse> = departments.into_iter().map(Into::into).collect();

    debug!(count = response.len(), "Listed departments");
    Ok(Json(response))
}

/// Get a department by ID within a company
///
/// GET /v1/companies/:company_id/departments/:department_id
#[utoipa::path(
    get,
    path = "/v1/companies/{company_id}/departments/{department_id}",
    tag = "departments",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "The department", body = DepartmentResponse),
        (status = 404, description = "Department not found under that company", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_department(
    State(state): State<AppState>,
    Path((company_id, department_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let department = state
        .departments
        .get_by_company_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
        )
        .await?;
    Ok(Json(department.into()))
}

/// Create a department under a company
///
/// POST /v1/companies/:company_id/departments
#[utoipa::path(
    post,
    path = "/v1/companies/{company_id}/departments",
    tag = "departments",
    params(
        ("company_id" = Uuid, Path, description = "Company ID")
    ),
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_department(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(body): Json<DepartmentRequest>,
) -> Result<(StatusCode, Json<DepartmentResponse>), ApiError> {
    body.validate()?;

    let department = state
        .departments
        .create(body.into(), CompanyId::from_uuid(company_id))
        .await?;

    debug!(id = %department.id, "Created department");
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// Replace a department's mutable fields
///
/// PUT /v1/companies/:company_id/departments/:department_id
#[utoipa::path(
    put,
    path = "/v1/companies/{company_id}/departments/{department_id}",
    tag = "departments",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID")
    ),
    request_body = DepartmentRequest,
    responses(
        (status = 204, description = "Department updated"),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Department not found under that company", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn replace_department(
    State(state): State<AppState>,
    Path((company_id, department_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<DepartmentRequest>,
) -> Result<StatusCode, ApiError> {
    body.validate()?;

    state
        .departments
        .replace_by_company_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
            body.into(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a department
///
/// PATCH /v1/companies/:company_id/departments/:department_id
#[utoipa::path(
    patch,
    path = "/v1/companies/{company_id}/departments/{department_id}",
    tag = "departments",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID")
    ),
    request_body = DepartmentPatchRequest,
    responses(
        (status = 204, description = "Department updated"),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Department not found under that company", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn merge_department(
    State(state): State<AppState>,
    Path((company_id, department_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<DepartmentPatchRequest>,
) -> Result<StatusCode, ApiError> {
    body.validate()?;

    state
        .departments
        .merge_by_company_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
            body.into(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a department and its employees
///
/// DELETE /v1/companies/:company_id/departments/:department_id
#[utoipa::path(
    delete,
    path = "/v1/companies/{company_id}/departments/{department_id}",
    tag = "departments",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("department_id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found under that company", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_department(
    State(state): State<AppState>,
    Path((company_id, department_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .departments
        .delete_by_company_and_id(
            CompanyId::from_uuid(company_id),
            DepartmentId::from_uuid(department_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
