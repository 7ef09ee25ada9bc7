//! Message catalog port
//!
//! Resolves error codes to human-readable message templates. The catalog
//! is an opaque collaborator: when a key cannot be resolved, formatting
//! falls back to the raw code string so the aggregate operation is never
//! blocked by a missing message.

#[cfg(test)]
use mockall::automock;

/// Keys into the message catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    CompanyNotFoundById,
    CompanyAlreadyExistsByName,
    DepartmentNotFoundById,
    EmployeeNotFoundById,
    EmployeeAlreadyExistsByEmail,
}

impl MessageKey {
    /// The catalog code for this key
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CompanyNotFoundById => "company.not-found.by-id",
            Self::CompanyAlreadyExistsByName => "company.already-exists.by-name",
            Self::DepartmentNotFoundById => "department.not-found.by-id",
            Self::EmployeeNotFoundById => "employee.not-found.by-id",
            Self::EmployeeAlreadyExistsByEmail => "employee.already-exists.by-email",
        }
    }
}

/// Port for message template resolution
#[cfg_attr(test, automock)]
pub trait MessageSource: Send + Sync {
    /// Look up the message template for a key.
    ///
    /// Templates use positional `{0}`, `{1}`, … placeholders. Returns
    /// `None` when the catalog has no entry for the key.
    fn template(&self, key: MessageKey) -> Option<String>;
}

/// Formatting helpers layered over any [`MessageSource`]
pub trait MessageSourceExt: MessageSource {
    /// Format the message for `key`, interpolating `args` into the
    /// template's positional placeholders. Falls back to the raw code
    /// string when the key does not resolve.
    fn format(&self, key: MessageKey, args: &[&str]) -> String {
        self.template(key).map_or_else(
            || key.code().to_string(),
            |template| {
                let mut out = template;
                for (i, arg) in args.iter().enumerate() {
                    out = out.replace(&format!("{{{i}}}"), arg);
                }
                out
            },
        )
    }
}

impl<T: MessageSource + ?Sized> MessageSourceExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct SingleEntry;

    impl MessageSource for SingleEntry {
        fn template(&self, key: MessageKey) -> Option<String> {
            match key {
                MessageKey::CompanyNotFoundById => {
                    Some("Company with id {0} was not found".to_string())
                },
                _ => None,
            }
        }
    }

    #[test]
    fn format_interpolates_positional_args() {
        let formatted = SingleEntry.format(MessageKey::CompanyNotFoundById, &["42"]);
        assert_eq!(formatted, "Company with id 42 was not found");
    }

    #[test]
    fn format_falls_back_to_raw_code() {
        let formatted = SingleEntry.format(MessageKey::EmployeeNotFoundById, &["7"]);
        assert_eq!(formatted, "employee.not-found.by-id");
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            MessageKey::CompanyAlreadyExistsByName.code(),
            "company.already-exists.by-name"
        );
        assert_eq!(
            MessageKey::EmployeeAlreadyExistsByEmail.code(),
            "employee.already-exists.by-email"
        );
    }
}
