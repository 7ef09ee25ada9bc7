//! Shared request types and field validators

use application::ports::PageRequest;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::ValidationError;

/// Pagination query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Zero-based page index (default 0)
    pub page: Option<u32>,
    /// Results per page (default 10)
    pub size: Option<u32>,
}

impl PageQuery {
    /// Resolve the query into a page request with defaults applied
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

/// At most 19 integer digits and 2 fraction digits
pub fn validate_money_digits(value: &Decimal) -> Result<(), ValidationError> {
    if value.scale() > 2 {
        return Err(ValidationError::new("money_fraction_digits"));
    }
    let limit = Decimal::from_i128_with_scale(10_i128.pow(19), 0);
    if value.abs() >= limit {
        return Err(ValidationError::new("money_integer_digits"));
    }
    Ok(())
}

/// Positive amount with at most 19 integer and 2 fraction digits
pub fn validate_positive_money(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("money_not_positive"));
    }
    validate_money_digits(value)
}
