//! Route definitions

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, openapi::ApiDoc, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Companies
        .route(
            "/v1/companies",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/v1/companies/{company_id}",
            get(handlers::companies::get_company)
                .put(handlers::companies::replace_company)
                .patch(handlers::companies::merge_company)
                .delete(handlers::companies::delete_company),
        )
        // Departments, scoped to their company
        .route(
            "/v1/companies/{company_id}/departments",
            get(handlers::departments::list_departments)
                .post(handlers::departments::create_department),
        )
        .route(
            "/v1/companies/{company_id}/departments/{department_id}",
            get(handlers::departments::get_department)
                .put(handlers::departments::replace_department)
                .patch(handlers::departments::merge_department)
                .delete(handlers::departments::delete_department),
        )
        // Employees, scoped to the full ancestor path
        .route(
            "/v1/companies/{company_id}/departments/{department_id}/employees",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/v1/companies/{company_id}/departments/{department_id}/employees/{employee_id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::replace_employee)
                .patch(handlers::employees::merge_employee)
                .delete(handlers::employees::delete_employee),
        )
        // API documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
