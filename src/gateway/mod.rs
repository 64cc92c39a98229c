//! Data gateway
//!
//! External collaborators the intent handlers call through narrow traits:
//! - `DataGateway` - insert/query health records (`GraphQlGateway`)
//! - `Mailer` - transactional email (`HttpMailer`)
//! - `report` - email bodies

mod data;
mod error;
mod mail;
pub mod report;

pub use data::{DataGateway, GraphQlGateway, HealthRecord, RecordEntry};
pub use error::{GatewayError, GatewayResult};
pub use mail::{HttpMailer, Mailer, OutboundEmail};
