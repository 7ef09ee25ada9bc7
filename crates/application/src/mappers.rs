//! Mechanical field copying between payloads and persisted records
//!
//! One explicit function per entity and payload kind. The fixed field
//! lists exclude identity, ownership references, and the employee counter
//! by construction: the payload types do not carry them. Replace payloads
//! (`New*`) overwrite the whole list; merge payloads (`*Patch`) copy only
//! the fields they carry.

use domain::entities::{
    Company, CompanyPatch, Department, DepartmentPatch, Employee, EmployeePatch, NewCompany,
    NewDepartment, NewEmployee,
};

/// Overwrite all mutable company fields from a complete payload
pub fn copy_company_fields(target: &mut Company, source: &NewCompany) {
    target.name.clone_from(&source.name);
    target.description.clone_from(&source.description);
    target.date_of_creation = source.date_of_creation;
}

/// Copy only the company fields present in the patch
pub fn merge_company_fields(target: &mut Company, patch: &CompanyPatch) {
    if let Some(name) = &patch.name {
        target.name.clone_from(name);
    }
    if let Some(description) = &patch.description {
        target.description.clone_from(description);
    }
    if let Some(date_of_creation) = patch.date_of_creation {
        target.date_of_creation = date_of_creation;
    }
}

/// Overwrite all mutable department fields from a complete payload
pub fn copy_department_fields(target: &mut Department, source: &NewDepartment) {
    target.name.clone_from(&source.name);
    target.description.clone_from(&source.description);
    target.annual_budget = source.annual_budget;
}

/// Copy only the department fields present in the patch
pub fn merge_department_fields(target: &mut Department, patch: &DepartmentPatch) {
    if let Some(name) = &patch.name {
        target.name.clone_from(name);
    }
    if let Some(description) = &patch.description {
        target.description.clone_from(description);
    }
    if let Some(annual_budget) = patch.annual_budget {
        target.annual_budget = annual_budget;
    }
}

/// Overwrite all mutable employee fields from a complete payload
pub fn copy_employee_fields(target: &mut Employee, source: &NewEmployee) {
    target.firstname.clone_from(&source.firstname);
    target.lastname.clone_from(&source.lastname);
    target.position.clone_from(&source.position);
    target.age = source.age;
    target.email.clone_from(&source.email);
    target.date_of_employment = source.date_of_employment;
    target.salary_per_month = source.salary_per_month;
}

/// Copy only the employee fields present in the patch
pub fn merge_employee_fields(target: &mut Employee, patch: &EmployeePatch) {
    if let Some(firstname) = &patch.firstname {
        target.firstname.clone_from(firstname);
    }
    if let Some(lastname) = &patch.lastname {
        target.lastname.clone_from(lastname);
    }
    if let Some(position) = &patch.position {
        target.position.clone_from(position);
    }
    if let Some(age) = patch.age {
        target.age = age;
    }
    if let Some(email) = &patch.email {
        target.email.clone_from(email);
    }
    if let Some(date_of_employment) = patch.date_of_employment {
        target.date_of_employment = date_of_employment;
    }
    if let Some(salary_per_month) = patch.salary_per_month {
        target.salary_per_month = salary_per_month;
    }
}
