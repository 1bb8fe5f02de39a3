pub mod engine;
pub mod errors;
pub mod services;

pub use engine::BillingEngine;
pub use errors::{BillingError, CliError, Result};
pub use services::{BillSplit, BillingService, RoomService};
