//! Company aggregate service
//!
//! Validation and mutation logic for companies: uniqueness of the company
//! name and custody of the denormalized employee counter, which only
//! employee lifecycle events may change.

use std::{fmt, sync::Arc};

use domain::entities::{Company, CompanyPatch, NewCompany};
use domain::value_objects::CompanyId;
use tracing::{debug, info, instrument};

use crate::{
    error::{ApplicationError, EntityKind},
    mappers::{copy_company_fields, merge_company_fields},
    ports::{CompanySort, CompanyStore, MessageKey, MessageSource, MessageSourceExt, PageRequest},
};

/// Service for managing companies
pub struct CompanyService {
    company_store: Arc<dyn CompanyStore>,
    messages: Arc<dyn MessageSource>,
}

impl fmt::Debug for CompanyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompanyService").finish_non_exhaustive()
    }
}

impl CompanyService {
    /// Create a new company service
    #[must_use]
    pub fn new(company_store: Arc<dyn CompanyStore>, messages: Arc<dyn MessageSource>) -> Self {
        Self {
            company_store,
            messages,
        }
    }

    /// Fetch one page of companies; performs no validation
    #[instrument(skip(self))]
    pub async fn list_page(
        &self,
        page: PageRequest,
        sort: Option<CompanySort>,
    ) -> Result<Vec<Company>, ApplicationError> {
        let companies = self.company_store.find_page(page, sort).await?;
        debug!(count = companies.len(), "Listed companies");
        Ok(companies)
    }

    /// Fetch a company by id
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, company_id: CompanyId) -> Result<Company, ApplicationError> {
        self.company_store
            .find_by_id(&company_id)
            .await?
            .ok_or_else(|| self.not_found(company_id))
    }

    /// Create a new company; its employee counter starts at zero
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(&self, new: NewCompany) -> Result<Company, ApplicationError> {
        if self.company_store.exists_by_name(&new.name).await? {
            return Err(self.name_conflict(&new.name));
        }

        let company = self.company_store.insert(&new).await?;
        info!(id = %company.id, name = %company.name, "Company created");
        Ok(company)
    }

    /// Overwrite all mutable fields of a company from a complete payload.
    ///
    /// The name uniqueness check runs before the target lookup.
    #[instrument(skip(self, update))]
    pub async fn replace_by_id(
        &self,
        company_id: CompanyId,
        update: NewCompany,
    ) -> Result<(), ApplicationError> {
        if self.company_store.exists_by_name(&update.name).await? {
            return Err(self.name_conflict(&update.name));
        }

        let mut company = self.get_by_id(company_id).await?;
        copy_company_fields(&mut company, &update);
        self.company_store.update(&company).await?;

        info!(id = %company_id, "Company replaced");
        Ok(())
    }

    /// Copy only the fields present in the patch onto a company.
    ///
    /// Name uniqueness is checked only when the patch carries a name.
    #[instrument(skip(self, patch))]
    pub async fn merge_by_id(
        &self,
        company_id: CompanyId,
        patch: CompanyPatch,
    ) -> Result<(), ApplicationError> {
        if let Some(name) = &patch.name {
            if self.company_store.exists_by_name(name).await? {
                return Err(self.name_conflict(name));
            }
        }

        let mut company = self.get_by_id(company_id).await?;
        merge_company_fields(&mut company, &patch);
        self.company_store.update(&company).await?;

        info!(id = %company_id, "Company merged");
        Ok(())
    }

    /// Delete a company; the store cascades to departments and employees
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, company_id: CompanyId) -> Result<(), ApplicationError> {
        let company = self.get_by_id(company_id).await?;
        self.company_store.delete(&company.id).await?;

        info!(id = %company_id, "Company deleted");
        Ok(())
    }

    fn not_found(&self, company_id: CompanyId) -> ApplicationError {
        let id = company_id.to_string();
        ApplicationError::NotFound {
            kind: EntityKind::Company,
            message: self
                .messages
                .format(MessageKey::CompanyNotFoundById, &[&id]),
            id,
        }
    }

    fn name_conflict(&self, name: &str) -> ApplicationError {
        ApplicationError::Conflict {
            kind: EntityKind::Company,
            key: name.to_string(),
            message: self
                .messages
                .format(MessageKey::CompanyAlreadyExistsByName, &[name]),
        }
    }
}
