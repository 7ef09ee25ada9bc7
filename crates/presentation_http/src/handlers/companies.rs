//! Company resource handlers
//!
//! REST endpoints for the company collection. The wire format keeps the
//! camelCase field names of the public API contract.

use application::ports::CompanySort;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use domain::entities::{Company, CompanyPatch, NewCompany};
use domain::value_objects::CompanyId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{error::ApiError, state::AppState};

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Company representation returned by the API
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "550e8400-e29b-41d4-a716-446655440000",
    "name": "Acme Corporation",
    "description": "A multinational conglomerate",
    "dateOfCreation": "2000-01-01",
    "numberOfEmployees": 42
}))]
pub struct CompanyResponse {
    /// Company ID
    pub id: Uuid,
    /// Company name
    pub name: String,
    /// Description
    pub description: String,
    /// Founding date
    pub date_of_creation: NaiveDate,
    /// Employees transitively owned through departments (read-only)
    pub number_of_employees: u64,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.as_uuid(),
            name: company.name,
            description: company.description,
            date_of_creation: company.date_of_creation,
            number_of_employees: company.number_of_employees,
        }
    }
}

/// Create/replace payload; all fields are required
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Acme Corporation",
    "description": "A multinational conglomerate",
    "dateOfCreation": "2000-01-01"
}))]
pub struct CompanyRequest {
    /// Company name
    #[validate(length(min = 1))]
    pub name: String,
    /// Description
    #[validate(length(min = 1))]
    pub description: String,
    /// Founding date
    pub date_of_creation: NaiveDate,
}

impl From<CompanyRequest> for NewCompany {
    fn from(body: CompanyRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            date_of_creation: body.date_of_creation,
        }
    }
}

/// Partial update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyPatchRequest {
    /// New company name
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// New description
    #[validate(length(min = 1))]
    pub description: Option<String>,
    /// New founding date
    pub date_of_creation: Option<NaiveDate>,
}

impl From<CompanyPatchRequest> for CompanyPatch {
    fn from(body: CompanyPatchRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            date_of_creation: body.date_of_creation,
        }
    }
}

/// Company listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCompaniesQuery {
    /// Zero-based page index (default 0)
    pub page: Option<u32>,
    /// Results per page (default 10)
    pub size: Option<u32>,
    /// Sort criteria as `property,direction`, e.g. `name,desc`
    pub sort: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// List companies with pagination and optional sorting
///
/// GET /v1/companies
#[utoipa::path(
    get,
    path = "/v1/companies",
    tag = "companies",
    params(ListCompaniesQuery),
    responses(
        (status = 200, description = "One page of companies", body = Vec<CompanyResponse>),
        (status = 400, description = "Invalid sort criteria", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<Json<Vec<CompanyResponse>>, ApiError> {
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<CompanySort>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let page = application::ports::PageRequest::new(
        query.page.unwrap_or(0),
        query
            .size
            .unwrap_or(application::ports::PageRequest::DEFAULT_SIZE),
    );

    let companies = state.companies.list_page(page, sort).await?;
    let response: Vec<CompanyResponse> = companies.into_iter().map(Into::into).collect();

    debug!(count = response.len(), "Listed companies");
    Ok(Json(response))
}

/// Get a company by ID
///
/// GET /v1/companies/:company_id
#[utoipa::path(
    get,
    path = "/v1/companies/{company_id}",
    tag = "companies",
    params(
        ("company_id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "The company", body = CompanyResponse),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let company = state
        .companies
        .get_by_id(CompanyId::from_uuid(company_id))
        .await?;
    Ok(Json(company.into()))
}

/// Create a new company
///
/// POST /v1/companies
#[utoipa::path(
    post,
    path = "/v1/companies",
    tag = "companies",
    request_body = CompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid payload or name already taken", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_company(
    State(state): State<AppState>,
    Json(body): Json<CompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    body.validate()?;

    let company = state.companies.create(body.into()).await?;

    debug!(id = %company.id, "Created company");
    Ok((StatusCode::CREATED, Json(company.into())))
}

/// Replace a company's mutable fields
///
/// PUT /v1/companies/:company_id
#[utoipa::path(
    put,
    path = "/v1/companies/{company_id}",
    tag = "companies",
    params(
        ("company_id" = Uuid, Path, description = "Company ID")
    ),
    request_body = CompanyRequest,
    responses(
        (status = 204, description = "Company updated"),
        (status = 400, description = "Invalid payload or name already taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn replace_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(body): Json<CompanyRequest>,
) -> Result<StatusCode, ApiError> {
    body.validate()?;

    state
        .companies
        .replace_by_id(CompanyId::from_uuid(company_id), body.into())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a company
///
/// PATCH /v1/companies/:company_id
#[utoipa::path(
    patch,
    path = "/v1/companies/{company_id}",
    tag = "companies",
    params(
        ("company_id" = Uuid, Path, description = "Company ID")
    ),
    request_body = CompanyPatchRequest,
    responses(
        (status = 204, description = "Company updated"),
        (status = 400, description = "Invalid payload or name already taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn merge_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(body): Json<CompanyPatchRequest>,
) -> Result<StatusCode, ApiError> {
    body.validate()?;

    state
        .companies
        .merge_by_id(CompanyId::from_uuid(company_id), body.into())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a company and everything it owns
///
/// DELETE /v1/companies/:company_id
#[utoipa::path(
    delete,
    path = "/v1/companies/{company_id}",
    tag = "companies",
    params(
        ("company_id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .companies
        .delete_by_id(CompanyId::from_uuid(company_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
