//! Employee aggregate service
//!
//! Validation and mutation logic for employees, scoped to an owning
//! company and department. Owns the two invariants that reach furthest:
//! global email uniqueness and the denormalized employee counter on the
//! ancestor company, which is adjusted as a paired side effect of every
//! employee insert and delete.

use std::{fmt, sync::Arc};

use domain::entities::{Employee, EmployeePatch, NewEmployee};
use domain::value_objects::{CompanyId, DepartmentId, EmailAddress, EmployeeId};
use tracing::{debug, info, instrument};

use crate::{
    error::{ApplicationError, EntityKind},
    mappers::{copy_employee_fields, merge_employee_fields},
    ports::{CompanyStore, EmployeeStore, MessageKey, MessageSource, MessageSourceExt,
        PageRequest},
    services::DepartmentService,
};

/// Service for managing employees within a department
pub struct EmployeeService {
    employee_store: Arc<dyn EmployeeStore>,
    company_store: Arc<dyn CompanyStore>,
    department_service: Arc<DepartmentService>,
    messages: Arc<dyn MessageSource>,
}

impl fmt::Debug for EmployeeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeService").finish_non_exhaustive()
    }
}

impl EmployeeService {
    /// Create a new employee service
    #[must_use]
    pub fn new(
        employee_store: Arc<dyn EmployeeStore>,
        company_store: Arc<dyn CompanyStore>,
        department_service: Arc<DepartmentService>,
        messages: Arc<dyn MessageSource>,
    ) -> Self {
        Self {
            employee_store,
            company_store,
            department_service,
            messages,
        }
    }

    /// Fetch one page of a department's employees.
    ///
    /// As with department listing, unknown ancestors yield an empty page.
    #[instrument(skip(self))]
    pub async fn list_by_company_and_department(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
        page: PageRequest,
    ) -> Result<Vec<Employee>, ApplicationError> {
        let employees = self
            .employee_store
            .find_page_by_department(&department_id, page)
            .await?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Fetch an employee along the full ancestor path
    #[instrument(skip(self))]
    pub async fn get_by_company_department_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
        employee_id: EmployeeId,
    ) -> Result<Employee, ApplicationError> {
        self.ensure_company_exists(company_id).await?;

        self.employee_store
            .find_by_department_and_id(&department_id, &employee_id)
            .await?
            .ok_or_else(|| self.not_found(employee_id))
    }

    /// Create an employee under a company and department.
    ///
    /// Checks run in order: company existence, email uniqueness, department
    /// resolution. The company counter is incremented as a paired side
    /// effect of the insert, inside the same unit of work.
    #[instrument(skip(self, new), fields(email = %new.email))]
    pub async fn create(
        &self,
        new: NewEmployee,
        company_id: CompanyId,
        department_id: DepartmentId,
    ) -> Result<Employee, ApplicationError> {
        self.ensure_company_exists(company_id).await?;

        if self.employee_store.exists_by_email(&new.email).await? {
            return Err(self.email_conflict(&new.email));
        }

        let department = self
            .department_service
            .get_by_company_and_id(company_id, department_id)
            .await?;

        let employee = self.employee_store.insert(&new, &department.id).await?;
        self.company_store
            .adjust_employee_count(&company_id, 1)
            .await?;

        info!(id = %employee.id, department_id = %department.id, "Employee created");
        Ok(employee)
    }

    /// Overwrite all mutable fields of an employee from a complete payload
    #[instrument(skip(self, update))]
    pub async fn replace_by_company_department_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
        employee_id: EmployeeId,
        update: NewEmployee,
    ) -> Result<(), ApplicationError> {
        self.ensure_company_exists(company_id).await?;

        if self.employee_store.exists_by_email(&update.email).await? {
            return Err(self.email_conflict(&update.email));
        }

        let mut employee = self
            .employee_store
            .find_by_department_and_id(&department_id, &employee_id)
            .await?
            .ok_or_else(|| self.not_found(employee_id))?;

        copy_employee_fields(&mut employee, &update);
        self.employee_store.update(&employee).await?;

        info!(id = %employee_id, "Employee replaced");
        Ok(())
    }

    /// Copy only the fields present in the patch onto an employee.
    ///
    /// Email uniqueness is checked only when the patch carries an email.
    #[instrument(skip(self, patch))]
    pub async fn merge_by_company_department_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
        employee_id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<(), ApplicationError> {
        self.ensure_company_exists(company_id).await?;

        if let Some(email) = &patch.email {
            if self.employee_store.exists_by_email(email).await? {
                return Err(self.email_conflict(email));
            }
        }

        let mut employee = self
            .employee_store
            .find_by_department_and_id(&department_id, &employee_id)
            .await?
            .ok_or_else(|| self.not_found(employee_id))?;

        merge_employee_fields(&mut employee, &patch);
        self.employee_store.update(&employee).await?;

        info!(id = %employee_id, "Employee merged");
        Ok(())
    }

    /// Delete an employee.
    ///
    /// The company counter is decremented as a paired side effect of the
    /// delete, inside the same unit of work.
    #[instrument(skip(self))]
    pub async fn delete_by_company_department_and_id(
        &self,
        company_id: CompanyId,
        department_id: DepartmentId,
        employee_id: EmployeeId,
    ) -> Result<(), ApplicationError> {
        self.ensure_company_exists(company_id).await?;

        let employee = self
            .employee_store
            .find_by_department_and_id(&department_id, &employee_id)
            .await?
            .ok_or_else(|| self.not_found(employee_id))?;

        self.employee_store.delete(&employee.id).await?;
        self.company_store
            .adjust_employee_count(&company_id, -1)
            .await?;

        info!(id = %employee_id, "Employee deleted");
        Ok(())
    }

    async fn ensure_company_exists(&self, company_id: CompanyId) -> Result<(), ApplicationError> {
        if self.company_store.exists_by_id(&company_id).await? {
            Ok(())
        } else {
            let id = company_id.to_string();
            Err(ApplicationError::NotFound {
                kind: EntityKind::Company,
                message: self
                    .messages
                    .format(MessageKey::CompanyNotFoundById, &[&id]),
                id,
            })
        }
    }

    fn not_found(&self, employee_id: EmployeeId) -> ApplicationError {
        let id = employee_id.to_string();
        ApplicationError::NotFound {
            kind: EntityKind::Employee,
            message: self
                .messages
                .format(MessageKey::EmployeeNotFoundById, &[&id]),
            id,
        }
    }

    fn email_conflict(&self, email: &EmailAddress) -> ApplicationError {
        ApplicationError::Conflict {
            kind: EntityKind::Employee,
            key: email.to_string(),
            message: self
                .messages
                .format(MessageKey::EmployeeAlreadyExistsByEmail, &[email.as_str()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::entities::Department;
    use rust_decimal::Decimal;

    use super::*;
    use crate::ports::{
        DepartmentStore, MockCompanyStore, MockDepartmentStore, MockEmployeeStore,
        MockMessageSource,
    };
    use crate::services::CompanyService;

    fn raw_code_messages() -> Arc<MockMessageSource> {
        let mut messages = MockMessageSource::new();
        messages.expect_template().returning(|_| None);
        Arc::new(messages)
    }

    fn service(
        employee_store: MockEmployeeStore,
        company_store: MockCompanyStore,
        department_store: MockDepartmentStore,
    ) -> EmployeeService {
        let company_store: Arc<dyn CompanyStore> = Arc::new(company_store);
        let department_store: Arc<dyn DepartmentStore> = Arc::new(department_store);
        let messages = raw_code_messages();
        let company_service = Arc::new(CompanyService::new(
            Arc::clone(&company_store),
            messages.clone(),
        ));
        let department_service = Arc::new(DepartmentService::new(
            department_store,
            company_service,
            Arc::clone(&company_store),
            messages.clone(),
        ));
        EmployeeService::new(
            Arc::new(employee_store),
            company_store,
            department_service,
            messages,
        )
    }

    fn john(id: EmployeeId, department_id: DepartmentId) -> Employee {
        Employee {
            id,
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            position: "Manager".to_string(),
            age: 30,
            email: EmailAddress::new("john.doe@acme.com").unwrap(),
            date_of_employment: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            salary_per_month: Decimal::new(500_000, 2),
            department_id,
        }
    }

    fn john_draft() -> NewEmployee {
        NewEmployee {
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            position: "Manager".to_string(),
            age: 30,
            email: EmailAddress::new("john.doe@acme.com").unwrap(),
            date_of_employment: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            salary_per_month: Decimal::new(500_000, 2),
        }
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

    #[tokio::test]
    async fn create_increments_the_company_counter() {
        let company_id = CompanyId::new();
        let department_id = DepartmentId::new();

        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));
        company_store
            .expect_adjust_employee_count()
            .withf(move |id, delta| *id == company_id && *delta == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(move |owner, id| Ok(Some(sales(*id, *owner))));

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));
        employee_store
            .expect_insert()
            .withf(move |_, owner| *owner == department_id)
            .times(1)
            .returning(|new, owner| {
                Ok(Employee {
                    id: EmployeeId::new(),
                    firstname: new.firstname.clone(),
                    lastname: new.lastname.clone(),
                    position: new.position.clone(),
                    age: new.age,
                    email: new.email.clone(),
                    date_of_employment: new.date_of_employment,
                    salary_per_month: new.salary_per_month,
                    department_id: *owner,
                })
            });

        let employee = service(employee_store, company_store, department_store)
            .create(john_draft(), company_id, department_id)
            .await
            .unwrap();

        assert_eq!(employee.department_id, department_id);
    }

    #[tokio::test]
    async fn create_under_missing_company_short_circuits() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(false));
        // no email, department, insert, or counter expectations: the
        // ancestor check must fire before anything else
        let employee_store = MockEmployeeStore::new();
        let department_store = MockDepartmentStore::new();

        let err = service(employee_store, company_store, department_store)
            .create(john_draft(), CompanyId::new(), DepartmentId::new())
            .await
            .unwrap_err();

        match err {
            ApplicationError::NotFound { kind, .. } => assert_eq!(kind, EntityKind::Company),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_with_taken_email_is_a_conflict_and_leaves_the_counter_alone() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));
        // no adjust_employee_count expectation

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(true));

        let err = service(employee_store, company_store, MockDepartmentStore::new())
            .create(john_draft(), CompanyId::new(), DepartmentId::new())
            .await
            .unwrap_err();

        match err {
            ApplicationError::Conflict { kind, key, .. } => {
                assert_eq!(kind, EntityKind::Employee);
                assert_eq!(key, "john.doe@acme.com");
            },
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_under_missing_department_propagates_not_found() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));

        let mut department_store = MockDepartmentStore::new();
        department_store
            .expect_find_by_company_and_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let err = service(employee_store, company_store, department_store)
            .create(john_draft(), CompanyId::new(), DepartmentId::new())
            .await
            .unwrap_err();

        match err {
            ApplicationError::NotFound { kind, .. } => assert_eq!(kind, EntityKind::Department),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_verifies_the_company_before_the_employee_lookup() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(false));
        // no find_by_department_and_id expectation
        let employee_store = MockEmployeeStore::new();

        let err = service(employee_store, company_store, MockDepartmentStore::new())
            .get_by_company_department_and_id(
                CompanyId::new(),
                DepartmentId::new(),
                EmployeeId::new(),
            )
            .await
            .unwrap_err();

        match err {
            ApplicationError::NotFound { kind, .. } => assert_eq!(kind, EntityKind::Company),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_returns_the_scoped_employee() {
        let department_id = DepartmentId::new();
        let employee_id = EmployeeId::new();

        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_find_by_department_and_id()
            .withf(move |dept, id| *dept == department_id && *id == employee_id)
            .times(1)
            .returning(move |dept, id| Ok(Some(john(*id, *dept))));

        let employee = service(employee_store, company_store, MockDepartmentStore::new())
            .get_by_company_department_and_id(CompanyId::new(), department_id, employee_id)
            .await
            .unwrap();

        assert_eq!(employee.id, employee_id);
    }

    #[tokio::test]
    async fn replace_checks_company_then_email_then_target() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));
        employee_store
            .expect_find_by_department_and_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let err = service(employee_store, company_store, MockDepartmentStore::new())
            .replace_by_company_department_and_id(
                CompanyId::new(),
                DepartmentId::new(),
                EmployeeId::new(),
                john_draft(),
            )
            .await
            .unwrap_err();

        match err {
            ApplicationError::NotFound { kind, .. } => assert_eq!(kind, EntityKind::Employee),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn replace_keeps_id_and_department_reference() {
        let department_id = DepartmentId::new();
        let employee_id = EmployeeId::new();

        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));
        employee_store
            .expect_find_by_department_and_id()
            .times(1)
            .returning(move |dept, id| Ok(Some(john(*id, *dept))));
        employee_store
            .expect_update()
            .withf(move |employee| {
                employee.id == employee_id
                    && employee.department_id == department_id
                    && employee.firstname == "Jane"
            })
            .times(1)
            .returning(|_| Ok(()));

        let update = NewEmployee {
            firstname: "Jane".to_string(),
            lastname: "Roe".to_string(),
            position: "Engineer".to_string(),
            age: 28,
            email: EmailAddress::new("jane.roe@acme.com").unwrap(),
            date_of_employment: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            salary_per_month: Decimal::new(620_050, 2),
        };
        service(employee_store, company_store, MockDepartmentStore::new())
            .replace_by_company_department_and_id(
                CompanyId::new(),
                department_id,
                employee_id,
                update,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn merge_without_email_skips_the_uniqueness_check() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let mut employee_store = MockEmployeeStore::new();
        // no exists_by_email expectation
        employee_store
            .expect_find_by_department_and_id()
            .times(1)
            .returning(move |dept, id| Ok(Some(john(*id, *dept))));
        employee_store
            .expect_update()
            .withf(|employee| employee.firstname == "Jonathan" && employee.lastname == "Doe")
            .times(1)
            .returning(|_| Ok(()));

        let patch = EmployeePatch {
            firstname: Some("Jonathan".to_string()),
            ..Default::default()
        };
        service(employee_store, company_store, MockDepartmentStore::new())
            .merge_by_company_department_and_id(
                CompanyId::new(),
                DepartmentId::new(),
                EmployeeId::new(),
                patch,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn merge_with_taken_email_is_a_conflict() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(true));

        let patch = EmployeePatch {
            email: Some(EmailAddress::new("taken@acme.com").unwrap()),
            ..Default::default()
        };
        let err = service(employee_store, company_store, MockDepartmentStore::new())
            .merge_by_company_department_and_id(
                CompanyId::new(),
                DepartmentId::new(),
                EmployeeId::new(),
                patch,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Conflict { .. }));
    }

    #[tokio::test]
    async fn delete_decrements_the_company_counter() {
        let company_id = CompanyId::new();
        let employee_id = EmployeeId::new();

        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));
        company_store
            .expect_adjust_employee_count()
            .withf(move |id, delta| *id == company_id && *delta == -1)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_find_by_department_and_id()
            .times(1)
            .returning(move |dept, id| Ok(Some(john(*id, *dept))));
        employee_store
            .expect_delete()
            .withf(move |id| *id == employee_id)
            .times(1)
            .returning(|_| Ok(()));

        service(employee_store, company_store, MockDepartmentStore::new())
            .delete_by_company_department_and_id(company_id, DepartmentId::new(), employee_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_of_missing_employee_leaves_the_counter_alone() {
        let mut company_store = MockCompanyStore::new();
        company_store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(true));
        // no adjust_employee_count expectation

        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_find_by_department_and_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let err = service(employee_store, company_store, MockDepartmentStore::new())
            .delete_by_company_department_and_id(
                CompanyId::new(),
                DepartmentId::new(),
                EmployeeId::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_performs_no_ancestor_checks() {
        let mut employee_store = MockEmployeeStore::new();
        employee_store
            .expect_find_page_by_department()
            .times(1)
            .returning(|_, _| Ok(vec![]));
        // no company or department expectations
        let company_store = MockCompanyStore::new();
        let department_store = MockDepartmentStore::new();

        let employees = service(employee_store, company_store, department_store)
            .list_by_company_and_department(
                CompanyId::new(),
                DepartmentId::new(),
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert!(employees.is_empty());
    }
}
