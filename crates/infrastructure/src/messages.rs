//! Built-in English message catalog
//!
//! Implements the `MessageSource` port with a static template table, the
//! counterpart of the original property-file catalog. Templates use
//! positional `{0}` placeholders.

use application::ports::{MessageKey, MessageSource};

/// Static, in-binary message catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMessages;

impl MessageSource for StaticMessages {
    fn template(&self, key: MessageKey) -> Option<String> {
        let template = match key {
            MessageKey::CompanyNotFoundById => "Company with id {0} was not found",
            MessageKey::CompanyAlreadyExistsByName => "Company with name {0} already exists",
            MessageKey::DepartmentNotFoundById => "Department with id {0} was not found",
            MessageKey::EmployeeNotFoundById => "Employee with id {0} was not found",
            MessageKey::EmployeeAlreadyExistsByEmail => "Employee with email {0} already exists",
        };
        Some(template.to_string())
    }
}
