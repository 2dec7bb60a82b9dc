//! Data location converters: GCS, AWS S3 and HTTP

use super::{FieldConverter, expand_required, flatten_block};
use crate::Result;
use crate::model::{AwsAccessKey, AwsS3Data, GcsData, HttpData};
use crate::resource::{AwsAccessKeyBlock, AwsS3DataBlock, GcsDataBlock, HttpDataBlock};

impl FieldConverter for GcsDataBlock {
    type Domain = GcsData;

    fn expand(&self) -> Result<GcsData> {
        Ok(GcsData {
            bucket_name: self.bucket_name.clone(),
        })
    }

    fn flatten(data: &GcsData) -> Self {
        Self {
            bucket_name: data.bucket_name.clone(),
        }
    }
}

impl FieldConverter for AwsAccessKeyBlock {
    type Domain = AwsAccessKey;

    fn expand(&self) -> Result<AwsAccessKey> {
        Ok(AwsAccessKey {
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
        })
    }

    fn flatten(key: &AwsAccessKey) -> Self {
        Self {
            access_key_id: key.access_key_id.clone(),
            secret_access_key: key.secret_access_key.clone(),
        }
    }
}

impl FieldConverter for AwsS3DataBlock {
    type Domain = AwsS3Data;

    fn expand(&self) -> Result<AwsS3Data> {
        Ok(AwsS3Data {
            bucket_name: self.bucket_name.clone(),
            aws_access_key: Some(expand_required(
                self.aws_access_key.as_ref(),
                "transfer_spec.aws_s3_data_source.aws_access_key",
            )?),
        })
    }

    // The service does not echo the key pair back; an absent key stays absent
    // here and is reconciled against prior state by the controller.
    fn flatten(data: &AwsS3Data) -> Self {
        Self {
            bucket_name: data.bucket_name.clone(),
            aws_access_key: flatten_block(data.aws_access_key.as_ref()),
        }
    }
}

impl FieldConverter for HttpDataBlock {
    type Domain = HttpData;

    fn expand(&self) -> Result<HttpData> {
        Ok(HttpData {
            list_url: self.list_url.clone(),
        })
    }

    fn flatten(data: &HttpData) -> Self {
        Self {
            list_url: data.list_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_block() -> AwsS3DataBlock {
        AwsS3DataBlock {
            bucket_name: "s3-bucket".to_string(),
            aws_access_key: Some(AwsAccessKeyBlock {
                access_key_id: "AKIA".to_string(),
                secret_access_key: "secret".to_string(),
            }),
        }
    }

    #[test]
    fn test_s3_round_trip_keeps_nested_key() {
        let block = s3_block();
        let data = block.expand().unwrap();
        assert_eq!(data.aws_access_key.as_ref().unwrap().access_key_id, "AKIA");
        assert_eq!(AwsS3DataBlock::flatten(&data), block);
    }

    #[test]
    fn test_s3_without_key_fails() {
        let block = AwsS3DataBlock {
            bucket_name: "s3-bucket".to_string(),
            aws_access_key: None,
        };
        assert!(block.expand().is_err());
    }

    #[test]
    fn test_s3_response_without_key_flattens_to_none() {
        let data = AwsS3Data {
            bucket_name: "s3-bucket".to_string(),
            aws_access_key: None,
        };
        assert_eq!(AwsS3DataBlock::flatten(&data).aws_access_key, None);
    }

    #[test]
    fn test_http_round_trip() {
        let block = HttpDataBlock {
            list_url: "https://example.com/urls.tsv".to_string(),
        };
        assert_eq!(HttpDataBlock::flatten(&block.expand().unwrap()), block);
    }
}
