//! Pagination and sorting request types

use std::str::FromStr;

/// A zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Number of results per page
    pub size: u32,
}

impl PageRequest {
    /// Default page size when the caller does not supply one
    pub const DEFAULT_SIZE: u32 = 10;

    /// Create a page request
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Row offset of the first item on this page
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// Sortable company fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySortKey {
    Name,
    DateOfCreation,
    NumberOfEmployees,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort criteria for company listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanySort {
    pub key: CompanySortKey,
    pub direction: SortDirection,
}

impl FromStr for CompanySort {
    type Err = String;

    /// Parse the `property,direction` query format, e.g. `name,desc`.
    /// The direction defaults to ascending when omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let key = match parts.next().map(str::trim) {
            Some("name") => CompanySortKey::Name,
            Some("dateOfCreation") => CompanySortKey::DateOfCreation,
            Some("numberOfEmployees") => CompanySortKey::NumberOfEmployees,
            other => return Err(format!("unknown sort property: {}", other.unwrap_or(""))),
        };
        let direction = match parts.next().map(str::trim) {
            None | Some("asc") => SortDirection::Ascending,
            Some("desc") => SortDirection::Descending,
            Some(other) => return Err(format!("unknown sort direction: {other}")),
        };
        Ok(Self { key, direction })
    }
}
