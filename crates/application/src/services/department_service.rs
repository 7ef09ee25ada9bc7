//! Department aggregate service
//!
//! Validation and mutation logic for departments, scoped to an owning
//! company. Every mutation path resolves the ancestor company through the
//! company aggregate; list operations stay validation-free.

use std::{fmt, sync::Arc};

use domain::entities::{Department, DepartmentPatch, NewDepartment};
use domain::value_objects::{CompanyId, DepartmentId};
use tracing::{debug, info, instrument};

use crate::{
    error::{ApplicationError, EntityKind},
    mappers::{copy_department_fields, merge_department_fields},
    ports::{CompanyStore, DepartmentStore, MessageKey, MessageSource, MessageSourceExt,
        PageRequest},
    services::CompanyService,
};

/// Service for managing departments within a company
pub struct DepartmentService {
    department_store: Arc<dyn DepartmentStore>,
    company_service: Arc<CompanyService>,
    company_store: Arc<dyn CompanyStore>,
    messages: Arc<dyn MessageSource>,
}

impl fmt::Debug for DepartmentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepartmentService").finish_non_exhaustive()
    }
}

impl DepartmentService {
    /// Create a new department service
    #[must_use]
    pub fn new(
        department_store: Arc<dyn DepartmentStore>,
        company_service: Arc<CompanyService>,
        company_store: Arc<dyn CompanyStore>,
        messages: Arc<dyn MessageSource>,
    ) -> Self {
        Self {
            department_store,
            company_service,
            company_store,
            messages,
        }
    }

    /// Fetch one page of a company's departments.
    ///
    /// An unknown company and a company without departments both yield an
    /// empty page; list operations perform no ancestor checks.
    #[instrument(skip(self))]
    pub async fn list_by_company(
        &self,
        company_id: CompanyId,
        page: PageRequest,
    ) -> Result<Vec<Department>, ApplicationError> {
        let departments = self
            .department_store
            .find_page_by_company(&company_id, page)
            .await?;
        debug!(count = departments.len(), "Listed departments");
        Ok(departments)
    }

    /// Fetch a department by id, scoped to the owning company
    #[instrument(skip(self))]
    pub async fn get_by_company_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
    ) -> Result<Department, ApplicationError> {
        self.department_store
            .find_by_company_and_id(&company_id, &department_id)
            .await?
            .ok_or_else(|| self.not_found(department_id))
    }

    /// Create a department under a company.
    ///
    /// The company is resolved through the company aggregate first, so a
    /// missing company surfaces as its `NotFound`.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(
        &self,
        new: NewDepartment,
        company_id: CompanyId,
    ) -> Result<Department, ApplicationError> {
        let company = self.company_service.get_by_id(company_id).await?;

        let department = self.department_store.insert(&new, &company.id).await?;
        info!(id = %department.id, company_id = %company.id, "Department created");
        Ok(department)
    }

    /// Overwrite all mutable fields of a department from a complete payload
    #[instrument(skip(self, update))]
    pub async fn replace_by_company_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
        update: NewDepartment,
    ) -> Result<(), ApplicationError> {
        let mut department = self.get_by_company_and_id(company_id, department_id).await?;
        copy_department_fields(&mut department, &update);
        self.department_store.update(&department).await?;

        info!(id = %department_id, "Department replaced");
        Ok(())
    }

    /// Copy only the fields present in the patch onto a department
    #[instrument(skip(self, patch))]
    pub async fn merge_by_company_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
        patch: DepartmentPatch,
    ) -> Result<(), ApplicationError> {
        let mut department = self.get_by_company_and_id(company_id, department_id).await?;
        merge_department_fields(&mut department, &patch);
        self.department_store.update(&department).await?;

        info!(id = %department_id, "Department merged");
        Ok(())
    }

    /// Delete a department and its employees.
    ///
    /// The cascaded employee deletions are employee lifecycle events, so
    /// the owning company's counter drops by the number of removed rows.
    #[instrument(skip(self))]
    pub async fn delete_by_company_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
    ) -> Result<(), ApplicationError> {
        let department = self.get_by_company_and_id(company_id, department_id).await?;

        let removed = self.department_store.delete(&department.id).await?;
        if removed > 0 {
            let delta = i64::try_from(removed).unwrap_or(i64::MAX);
            self.company_store
                .adjust_employee_count(&company_id, -delta)
                .await?;
        }

        info!(id = %department_id, removed_employees = removed, "Department deleted");
        Ok(())
    }

    fn not_found(&self, department_id: DepartmentId) -> ApplicationError {
        let id = department_id.to_string();
        ApplicationError::NotFound {
            kind: EntityKind::Department,
            message: self
                .messages
                .format(MessageKey::DepartmentNotFoundById, &[&id]),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::ports::{
        MockCompanyStore, MockDepartmentStore, MockMessageSource,
    };

    fn raw_code_messages() -> Arc<MockMessageSource> {
        let mut messages = MockMessageSource::new();
        messages.expect_template().returning(|_| None);
        Arc::new(messages)
    }

    fn service(
        department_store: MockDepartmentStore,
        company_store: MockCompanyStore,
    ) -> DepartmentService {
        let company_store: Arc<dyn CompanyStore> = Arc::new(company_store);
        let messages = raw_code_messages();
        let company_service = Arc::new(CompanyService::new(
            Arc::clone(&company_store),
            messages.clone(),
        ));
        DepartmentService::new(
            Arc::new(department_store),
            company_service,
            company_store,
            messages,
        )
    }

    fn sales(id: DepartmentId, company_id: CompanyId) -> Department {
        Department {
            id,
            name: "Sales".to_string(),
            description: "Sells things".to_string(),
            annual_budget: Decimal::new(10_000_000, 2),
            company_id,
        }
    }

    fn sales_draft() -> NewDepartment {
        NewDepartment {
            name: "Sales".to_string(),
            description: "Sells things".to_string(),
            annual_budget: Decimal::new(10_000_000, 2),
        }
    }

    fn existing_company(store: &mut MockCompanyStore) -> CompanyId {
        let company_id = CompanyId::new();
        store.expect_find_by_id().returning(move |id| {
            Ok(Some(domain::entities::Company {
                id: *id,
                name: "Acme".to_string(),
                description: "desc".to_string(),
                date_of_creation: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                number_of_employees: 0,
            }))
        });
        company_id
    }

    #[tokio::test]
    async fn list_by_company_returns_empty_for_unknown_company() {
        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_page_by_company()
            .times(1)
            .returning(|_, _| Ok(vec![]));
        // no company lookup: list operations perform no ancestor checks
        let company_store = MockCompanyStore::new();

        let departments = service(department_store, company_store)
            .list_by_company(CompanyId::new(), PageRequest::default())
            .await
            .unwrap();

        assert!(departments.is_empty());
    }

    #[tokio::test]
    async fn get_scoped_to_the_wrong_company_is_not_found() {
        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let department_id = DepartmentId::new();
        let err = service(department_store, MockCompanyStore::new())
            .get_by_company_and_id(CompanyId::new(), department_id)
            .await
            .unwrap_err();

        match err {
            ApplicationError::NotFound { kind, id, .. } => {
                assert_eq!(kind, EntityKind::Department);
                assert_eq!(id, department_id.to_string());
            },
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_attaches_the_resolved_company() {
        let mut company_store = MockCompanyStore::new();
        let company_id = existing_company(&mut company_store);

        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_insert()
            .withf(move |_, owner| *owner == company_id)
            .times(1)
            .returning(|new, owner| {
                Ok(Department {
                    id: DepartmentId::new(),
                    name: new.name.clone(),
                    description: new.description.clone(),
                    annual_budget: new.annual_budget,
                    company_id: *owner,
                })
            });

        let department = service(department_store, company_store)
            .create(sales_draft(), company_id)
            .await
            .unwrap();

        assert_eq!(department.company_id, company_id);
    }

    #[tokio::test]
    async fn create_under_missing_company_propagates_not_found() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        // no insert expectation: the ancestor check must short-circuit
        let department_store = MockDepartmentStore::new();

        let err = service(department_store, company_store)
            .create(sales_draft(), CompanyId::new())
            .await
            .unwrap_err();

        match err {
            ApplicationError::NotFound { kind, .. } => assert_eq!(kind, EntityKind::Company),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn replace_overwrites_but_keeps_the_company_reference() {
        let company_id = CompanyId::new();
        let department_id = DepartmentId::new();

        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(move |owner, id| Ok(Some(sales(*id, *owner))));
        department_store
            .expect_update()
            .withf(move |dept| {
                dept.id == department_id
                    && dept.company_id == company_id
                    && dept.name == "Marketing"
            })
            .times(1)
            .returning(|_| Ok(()));

        let update = NewDepartment {
            name: "Marketing".to_string(),
            description: "Spends things".to_string(),
            annual_budget: Decimal::new(5_000_000, 2),
        };
        service(department_store, MockCompanyStore::new())
            .replace_by_company_and_id(company_id, department_id, update)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn merge_with_partial_patch_keeps_other_fields() {
        let company_id = CompanyId::new();
        let department_id = DepartmentId::new();

        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(move |owner, id| Ok(Some(sales(*id, *owner))));
        department_store
            .expect_update()
            .withf(|dept| dept.name == "Sales" && dept.annual_budget == Decimal::new(42, 0))
            .times(1)
            .returning(|_| Ok(()));

        let patch = DepartmentPatch {
            annual_budget: Some(Decimal::new(42, 0)),
            ..Default::default()
        };
        service(department_store, MockCompanyStore::new())
            .merge_by_company_and_id(company_id, department_id, patch)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_decrements_the_counter_by_the_cascaded_employees() {
        let company_id = CompanyId::new();
        let department_id = DepartmentId::new();

        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(move |owner, id| Ok(Some(sales(*id, *owner))));
        department_store
            .expect_delete()
            .times(1)
            .returning(|_| Ok(3));

        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_adjust_employee_count()
            .withf(move |id, delta| *id == company_id && *delta == -3)
            .times(1)
            .returning(|_, _| Ok(()));

        service(department_store, company_store)
            .delete_by_company_and_id(company_id, department_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_of_empty_department_skips_the_counter_adjustment() {
        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(move |owner, id| Ok(Some(sales(*id, *owner))));
        department_store
            .expect_delete()
            .times(1)
            .returning(|_| Ok(0));
        // no adjust_employee_count expectation
        let company_store = MockCompanyStore::new();

        service(department_store, company_store)
            .delete_by_company_and_id(CompanyId::new(), DepartmentId::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_of_missing_department_is_not_found() {
        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let err = service(department_store, MockCompanyStore::new())
            .delete_by_company_and_id(CompanyId::new(), DepartmentId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
