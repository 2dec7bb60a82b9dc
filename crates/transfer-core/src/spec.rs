//! Transfer spec assembler
//!
//! Builds the API's [`TransferSpec`] from a [`TransferSpecBlock`] and back.
//!
//! The sink is always set. At most one data source is carried across, picked
//! in the fixed order GCS, AWS S3, HTTP. The declarative schema already makes
//! the three source blocks mutually exclusive; the order only decides the
//! winner when that constraint was bypassed (e.g. a record built in code).
//! Both directions use the same order.

use crate::Result;
use crate::convert::{FieldConverter, expand_block, expand_required, flatten_block};
use crate::model::{AwsS3Data, GcsData, HttpData, TransferSpec};
use crate::resource::{AwsS3DataBlock, GcsDataBlock, HttpDataBlock, TransferSpecBlock};

/// The single data source a spec carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource<'a, G, A, H> {
    Gcs(&'a G),
    AwsS3(&'a A),
    Http(&'a H),
}

/// Pick the first present source in GCS → AWS S3 → HTTP order
pub fn select_source<'a, G, A, H>(
    gcs: Option<&'a G>,
    aws_s3: Option<&'a A>,
    http: Option<&'a H>,
) -> Option<DataSource<'a, G, A, H>> {
    if let Some(gcs) = gcs {
        Some(DataSource::Gcs(gcs))
    } else if let Some(aws_s3) = aws_s3 {
        Some(DataSource::AwsS3(aws_s3))
    } else {
        http.map(DataSource::Http)
    }
}

/// Declarative block → API spec
pub fn assemble_spec(block: &TransferSpecBlock) -> Result<TransferSpec> {
    let mut spec = TransferSpec {
        gcs_data_sink: Some(expand_required(
            block.gcs_data_sink.as_ref(),
            "transfer_spec.gcs_data_sink",
        )?),
        object_conditions: expand_block(block.object_conditions.as_ref())?,
        transfer_options: expand_block(block.transfer_options.as_ref())?,
        ..Default::default()
    };

    match select_source(
        block.gcs_data_source.as_ref(),
        block.aws_s3_data_source.as_ref(),
        block.http_data_source.as_ref(),
    ) {
        Some(DataSource::Gcs(gcs)) => spec.gcs_data_source = Some(gcs.expand()?),
        Some(DataSource::AwsS3(s3)) => spec.aws_s3_data_source = Some(s3.expand()?),
        Some(DataSource::Http(http)) => spec.http_data_source = Some(http.expand()?),
        None => {}
    }

    Ok(spec)
}

/// API spec → declarative block
pub fn disassemble_spec(spec: &TransferSpec) -> TransferSpecBlock {
    let mut block = TransferSpecBlock {
        gcs_data_sink: flatten_block(spec.gcs_data_sink.as_ref()),
        object_conditions: flatten_block(spec.object_conditions.as_ref()),
        transfer_options: flatten_block(spec.transfer_options.as_ref()),
        ..Default::default()
    };

    match select_source::<GcsData, AwsS3Data, HttpData>(
        spec.gcs_data_source.as_ref(),
        spec.aws_s3_data_source.as_ref(),
        spec.http_data_source.as_ref(),
    ) {
        Some(DataSource::Gcs(gcs)) => block.gcs_data_source = Some(GcsDataBlock::flatten(gcs)),
        Some(DataSource::AwsS3(s3)) => {
            block.aws_s3_data_source = Some(AwsS3DataBlock::flatten(s3))
        }
        Some(DataSource::Http(http)) => {
            block.http_data_source = Some(HttpDataBlock::flatten(http))
        }
        None => {}
    }

    block
}
