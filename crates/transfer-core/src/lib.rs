// # transfer-core
//
// Core library for the storage transfer job resource and the SQL CA-certs
// data source.
//
// ## Architecture Overview
//
// - **model**: the remote API's JSON objects (TransferJob, TransferSpec, SslCert, ...)
// - **resource**: the declarative records, one typed struct per configuration block
// - **convert**: field converters between records and model objects
// - **spec**: assembles and disassembles the full TransferSpec
// - **TransferJobController**: create / read / update / delete / import of a job
// - **CaCertsLookup**: read-only listing of a Cloud SQL instance's server CAs
// - **TransferJobsClient / SqlAdminClient**: seams to the remote APIs
// - **StateStore**: local persistence of resource state, keyed by job id
//
// ## Design Principles
//
// 1. **Typed records**: every configuration block is a struct, never an untyped map
// 2. **Injected collaborators**: remote clients and retry policies are passed in
// 3. **Re-read after write**: create always finishes with a full read
// 4. **No caching**: every read re-fetches and overwrites local state

pub mod config;
pub mod controller;
pub mod convert;
pub mod data_source;
pub mod error;
pub mod identity;
pub mod model;
pub mod resource;
pub mod retry;
pub mod schema;
pub mod spec;
pub mod state;
pub mod traits;

// Re-export core types for convenience
pub use config::{ProviderConfig, RetryConfig};
pub use controller::{ReadOutcome, TransferJobController, UpdatePlan};
pub use data_source::CaCertsLookup;
pub use error::{Error, Result};
pub use resource::{SqlCaCertsDataSource, TransferJobResource};
pub use retry::{RetryOn, RetryPolicy};
pub use state::{FileStateStore, MemoryStateStore};
pub use traits::{SqlAdminClient, StateStore, TransferJobsClient};
