// # Field Converters
//
// Pure conversions between declarative records (`crate::resource`) and the
// remote API objects (`crate::model`).
//
// ## Rules
//
// - Absent blocks map to `None` in both directions ([`expand_block`], [`flatten_block`])
// - A missing block that the schema marks as required is a configuration error
// - No cross-field validation: ranges, lengths, enum membership and conflicts
//   belong to `crate::schema`
//
// ## Usage
//
// ```rust
// use transfer_core::convert::FieldConverter;
// use transfer_core::model::Date;
// use transfer_core::resource::DateBlock;
//
// let block = DateBlock { year: 2024, month: 2, day: 30 };
// let date = block.expand().unwrap();
// assert_eq!(DateBlock::flatten(&date), block);
// ```

mod ca_certs;
mod conditions;
mod data;
mod schedule;

use crate::Result;

/// Conversion pair between a declarative record and its API object
pub trait FieldConverter: Sized {
    /// The API-side type
    type Domain;

    /// Record → API object
    ///
    /// Fails only when a nested block that the schema requires is missing.
    fn expand(&self) -> Result<Self::Domain>;

    /// API object → record
    fn flatten(domain: &Self::Domain) -> Self;
}

/// Expand an optional singleton block
pub fn expand_block<B: FieldConverter>(block: Option<&B>) -> Result<Option<B::Domain>> {
    block.map(B::expand).transpose()
}

/// Flatten an optional API object into an optional singleton block
pub fn flatten_block<B: FieldConverter>(domain: Option<&B::Domain>) -> Option<B> {
    domain.map(B::flatten)
}

/// Expand a block the schema marks as required
pub fn expand_required<B: FieldConverter>(block: Option<&B>, field: &str) -> Result<B::Domain> {
    match block {
        Some(block) => block.expand(),
        None => Err(crate::Error::config(format!(
            "{}: required block is not set",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GcsData;
    use crate::resource::GcsDataBlock;

    #[test]
    fn test_absent_block_is_none_both_ways() {
        assert_eq!(expand_block::<GcsDataBlock>(None).unwrap(), None);
        assert_eq!(flatten_block::<GcsDataBlock>(None), None);
    }

    #[test]
    fn test_present_block_round_trips() {
        let block = GcsDataBlock {
            bucket_name: "bucket".to_string(),
        };
        let expanded = expand_block(Some(&block)).unwrap();
        assert_eq!(
            expanded,
            Some(GcsData {
                bucket_name: "bucket".to_string()
            })
        );
        assert_eq!(flatten_block::<GcsDataBlock>(expanded.as_ref()), Some(block));
    }

    #[test]
    fn test_missing_required_block_names_field() {
        let err = expand_required::<GcsDataBlock>(None, "transfer_spec.gcs_data_sink")
            .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        assert!(err.to_string().contains("transfer_spec.gcs_data_sink"));
    }
}
