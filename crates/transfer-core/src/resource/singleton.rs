//! Serde adapter for optional singleton blocks
//!
//! A block declared with at most one item is written as a list of zero or one
//! element, but held in memory as an `Option<T>`. A list with more than one
//! element is rejected when decoding.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Outer {
//!     #[serde(default, with = "transfer_core::resource::singleton")]
//!     inner: Option<u32>,
//! }
//!
//! let outer: Outer = serde_json::from_str(r#"{ "inner": [7] }"#).unwrap();
//! assert_eq!(outer.inner, Some(7));
//! assert_eq!(serde_json::to_string(&Outer { inner: None }).unwrap(), r#"{"inner":[]}"#);
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(value.iter())
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default();
    if items.len() > 1 {
        return Err(D::Error::invalid_length(items.len(), &"at most one block"));
    }
    Ok(items.into_iter().next())
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, with = "crate::resource::singleton")]
        block: Option<String>,
    }

    #[test]
    fn test_absent_null_and_empty_are_none() {
        for body in [r#"{}"#, r#"{"block":null}"#, r#"{"block":[]}"#] {
            let holder: Holder = serde_json::from_str(body).unwrap();
            assert_eq!(holder.block, None, "body: {}", body);
        }
    }

    #[test]
    fn test_two_items_rejected() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"block":["a","b"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_present_value_written_as_single_item_list() {
        let holder = Holder {
            block: Some("a".to_string()),
        };
        assert_eq!(serde_json::to_string(&holder).unwrap(), r#"{"block":["a"]}"#);
    }
}
