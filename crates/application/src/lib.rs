//! Application layer - aggregate services and port definitions
//!
//! The three aggregate services own the cascading-ownership validation,
//! the uniqueness invariants, and the employee-counter maintenance. Ports
//! define how the services reach persistence and the message catalog;
//! adapters in the infrastructure layer implement them.

pub mod error;
pub mod mappers;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, EntityKind};
pub use ports::*;
pub use services::*;
