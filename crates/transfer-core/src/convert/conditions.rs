//! ObjectConditions and TransferOptions converters

use super::FieldConverter;
use crate::Result;
use crate::model::{ObjectConditions, TransferOptions};
use crate::resource::{ObjectConditionsBlock, TransferOptionsBlock};

impl FieldConverter for ObjectConditionsBlock {
    type Domain = ObjectConditions;

    fn expand(&self) -> Result<ObjectConditions> {
        Ok(ObjectConditions {
            min_time_elapsed_since_last_modification: self
                .min_time_elapsed_since_last_modification
                .clone(),
            max_time_elapsed_since_last_modification: self
                .max_time_elapsed_since_last_modification
                .clone(),
            include_prefixes: self.include_prefixes.clone(),
            exclude_prefixes: self.exclude_prefixes.clone(),
        })
    }

    fn flatten(conditions: &ObjectConditions) -> Self {
        Self {
            min_time_elapsed_since_last_modification: conditions
                .min_time_elapsed_since_last_modification
                .clone(),
            max_time_elapsed_since_last_modification: conditions
                .max_time_elapsed_since_last_modification
                .clone(),
            include_prefixes: conditions.include_prefixes.clone(),
            exclude_prefixes: conditions.exclude_prefixes.clone(),
        }
    }
}

impl FieldConverter for TransferOptionsBlock {
    type Domain = TransferOptions;

    fn expand(&self) -> Result<TransferOptions> {
        Ok(TransferOptions {
            overwrite_objects_already_existing_in_sink: self
                .overwrite_objects_already_existing_in_sink,
            delete_objects_unique_in_sink: self.delete_objects_unique_in_sink,
            delete_objects_from_source_after_transfer: self
                .delete_objects_from_source_after_transfer,
        })
    }

    fn flatten(options: &TransferOptions) -> Self {
        Self {
            overwrite_objects_already_existing_in_sink: options
                .overwrite_objects_already_existing_in_sink,
            delete_objects_unique_in_sink: options.delete_objects_unique_in_sink,
            delete_objects_from_source_after_transfer: options
                .delete_objects_from_source_after_transfer,
        }
    }
}
