// # Remote API Model
//
// The JSON objects exchanged with the Storage Transfer v1 and Cloud SQL
// Admin v1beta4 APIs.
//
// Field names follow the APIs' camelCase JSON. Zero values (empty strings,
// `false`, empty lists, `None`) are omitted on the wire, so a partial-update
// payload carries only what its field mask names.

pub mod sql;
pub mod transfer;

pub use sql::{ListServerCasResponse, SslCert};
pub use transfer::{
    AwsAccessKey, AwsS3Data, Date, GcsData, HttpData, ObjectConditions, Schedule, TimeOfDay,
    TransferJob, TransferJobStatus, TransferOptions, TransferSpec, UpdateTransferJobRequest,
};

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
