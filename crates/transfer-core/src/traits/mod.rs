//! Core traits for the transfer job lifecycle
//!
//! - [`TransferJobsClient`]: Storage Transfer API calls the controller makes
//! - [`SqlAdminClient`]: Cloud SQL Admin call behind the CA-certs lookup
//! - [`StateStore`]: Local record of managed jobs

pub mod remote;
pub mod state_store;

pub use remote::{SqlAdminClient, TransferJobsClient};
pub use state_store::{StateRecord, StateStore};
