// # Declarative Records
//
// Strongly typed configuration/state records, populated by deserializing the
// declarative configuration. Each block of the configuration tree is its own
// struct; optional single blocks are `Option<Block>`.

pub mod ca_certs;
pub mod singleton;
pub mod transfer_job;

pub use ca_certs::{CaCertBlock, SQL_CA_CERTS_DATA_SOURCE, SqlCaCertsDataSource};
pub use transfer_job::{
    AwsAccessKeyBlock, AwsS3DataBlock, DateBlock, GcsDataBlock, HttpDataBlock,
    ObjectConditionsBlock, ScheduleBlock, TRANSFER_JOB_RESOURCE, TimeOfDayBlock,
    TransferJobResource, TransferOptionsBlock, TransferSpecBlock,
};
