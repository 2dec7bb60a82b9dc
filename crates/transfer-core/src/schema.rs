//! Static schema constraints
//!
//! Numeric ranges, string lengths, list sizes, required blocks and
//! `ConflictsWith` pairs declared by the resource schema. These checks run
//! before a record reaches the controller; converters and the assembler
//! assume they hold.
//!
//! All violations are collected so one pass reports every problem.

use crate::Error;
use crate::resource::{
    AwsS3DataBlock, DateBlock, ObjectConditionsBlock, ScheduleBlock, TimeOfDayBlock,
    TransferJobResource, TransferOptionsBlock, TransferSpecBlock,
};

const MAX_DESCRIPTION_LEN: usize = 1024;
const MAX_PREFIXES: usize = 1000;

/// Static constraint check for a declarative record
pub trait Validate {
    /// Append every violation under `path` to `errors`
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>);

    /// Check the record, failing with all violations joined
    fn validate(&self) -> Result<(), Error> {
        let mut errors = Vec::new();
        self.collect_violations("", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::config(errors.join("; ")))
        }
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

fn check_range(errors: &mut Vec<String>, path: &str, field: &str, value: i32, min: i32, max: i32) {
    if !(min..=max).contains(&value) {
        errors.push(format!(
            "expected {} to be in the range ({} - {}), got {}",
            join(path, field),
            min,
            max,
            value
        ));
    }
}

fn require<T>(errors: &mut Vec<String>, path: &str, field: &str, value: &Option<T>) {
    if value.is_none() {
        errors.push(format!("{}: required block is not set", join(path, field)));
    }
}

fn check_conflict(errors: &mut Vec<String>, path: &str, set: &[(&str, bool)]) {
    let present: Vec<&str> = set
        .iter()
        .filter(|(_, is_set)| *is_set)
        .map(|(name, _)| *name)
        .collect();
    if present.len() > 1 {
        let names: Vec<String> = present.iter().map(|name| join(path, name)).collect();
        errors.push(format!(
            "conflicting configuration arguments: {}",
            names.join(", ")
        ));
    }
}

impl Validate for TransferJobResource {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            errors.push(format!(
                "expected length of {} to be in the range (0 - {}), got {}",
                join(path, "description"),
                MAX_DESCRIPTION_LEN,
                len
            ));
        }

        require(errors, path, "schedule", &self.schedule);
        if let Some(schedule) = &self.schedule {
            schedule.collect_violations(&join(path, "schedule"), errors);
        }

        require(errors, path, "transfer_spec", &self.transfer_spec);
        if let Some(spec) = &self.transfer_spec {
            spec.collect_violations(&join(path, "transfer_spec"), errors);
        }
    }
}

impl Validate for ScheduleBlock {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        require(errors, path, "schedule_start_date", &self.schedule_start_date);
        if let Some(date) = &self.schedule_start_date {
            date.collect_violations(&join(path, "schedule_start_date"), errors);
        }
        if let Some(date) = &self.schedule_end_date {
            date.collect_violations(&join(path, "schedule_end_date"), errors);
        }
        if let Some(time) = &self.start_time_of_day {
            time.collect_violations(&join(path, "start_time_of_day"), errors);
        }
    }
}

impl Validate for DateBlock {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        check_range(errors, path, "year", self.year, 0, 9999);
        check_range(errors, path, "month", self.month, 1, 12);
        check_range(errors, path, "day", self.day, 0, 31);
    }
}

impl Validate for TimeOfDayBlock {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        check_range(errors, path, "hours", self.hours, 0, 24);
        check_range(errors, path, "minutes", self.minutes, 0, 59);
        check_range(errors, path, "seconds", self.seconds, 0, 60);
        check_range(errors, path, "nanos", self.nanos, 0, 999_999_999);
    }
}

impl Validate for TransferSpecBlock {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        require(errors, path, "gcs_data_sink", &self.gcs_data_sink);
        check_conflict(
            errors,
            path,
            &[
                ("gcs_data_source", self.gcs_data_source.is_some()),
                ("aws_s3_data_source", self.aws_s3_data_source.is_some()),
                ("http_data_source", self.http_data_source.is_some()),
            ],
        );

        if let Some(s3) = &self.aws_s3_data_source {
            s3.collect_violations(&join(path, "aws_s3_data_source"), errors);
        }
        if let Some(conditions) = &self.object_conditions {
            conditions.collect_violations(&join(path, "object_conditions"), errors);
        }
        if let Some(options) = &self.transfer_options {
            options.collect_violations(&join(path, "transfer_options"), errors);
        }
    }
}

impl Validate for AwsS3DataBlock {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        require(errors, path, "aws_access_key", &self.aws_access_key);
        if let Some(key) = &self.aws_access_key
            && (key.access_key_id.is_empty() || key.secret_access_key.is_empty())
        {
            errors.push(format!(
                "{}: access_key_id and secret_access_key are both required",
                join(path, "aws_access_key")
            ));
        }
    }
}

impl Validate for ObjectConditionsBlock {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        for (field, prefixes) in [
            ("include_prefixes", &self.include_prefixes),
            ("exclude_prefixes", &self.exclude_prefixes),
        ] {
            if prefixes.len() > MAX_PREFIXES {
                errors.push(format!(
                    "{}: at most {} entries allowed, got {}",
                    join(path, field),
                    MAX_PREFIXES,
                    prefixes.len()
                ));
            }
        }

        for (field, value) in [
            (
                "min_time_elapsed_since_last_modification",
                &self.min_time_elapsed_since_last_modification,
            ),
            (
                "max_time_elapsed_since_last_modification",
                &self.max_time_elapsed_since_last_modification,
            ),
        ] {
            if let Some(duration) = value
                && !is_duration(duration)
            {
                errors.push(format!(
                    "{}: {:?} is not a valid duration",
                    join(path, field),
                    duration
                ));
            }
        }
    }
}

impl Validate for TransferOptionsBlock {
    fn collect_violations(&self, path: &str, errors: &mut Vec<String>) {
        check_conflict(
            errors,
            path,
            &[
                (
                    "delete_objects_unique_in_sink",
                    self.delete_objects_unique_in_sink,
                ),
                (
                    "delete_objects_from_source_after_transfer",
                    self.delete_objects_from_source_after_transfer,
                ),
            ],
        );
    }
}

/// Whether `value` is a duration string: a sequence of decimal numbers, each
/// with a unit suffix (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`), e.g. `"3600s"`
/// or `"1h30m"`.
pub fn is_duration(value: &str) -> bool {
    let mut rest = value.strip_prefix(['+', '-']).unwrap_or(value);
    if rest == "0" {
        return true;
    }
    if rest.is_empty() {
        return false;
    }

    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..digits];
        if number.is_empty() || number == "." || number.matches('.').count() > 1 {
            return false;
        }
        rest = &rest[digits..];

        let unit = ["ns", "us", "µs", "ms", "s", "m", "h"]
            .into_iter()
            .filter(|unit| rest.starts_with(unit))
            .max_by_key(|unit| unit.len());
        match unit {
            Some(unit) => rest = &rest[unit.len()..],
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{AwsAccessKeyBlock, GcsDataBlock, HttpDataBlock};

    fn valid_resource() -> TransferJobResource {
        TransferJobResource {
            description: "nightly".to_string(),
            schedule: Some(ScheduleBlock {
                schedule_start_date: Some(DateBlock {
                    year: 2024,
                    month: 1,
                    day: 1,
                }),
                ..Default::default()
            }),
            transfer_spec: Some(TransferSpecBlock {
                gcs_data_sink: Some(GcsDataBlock {
                    bucket_name: "sink".to_string(),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_resource_passes() {
        assert!(valid_resource().validate().is_ok());
    }

    #[test]
    fn test_description_length_limit() {
        let mut resource = valid_resource();
        resource.description = "x".repeat(1024);
        assert!(resource.validate().is_ok());
        resource.description = "x".repeat(1025);
        assert!(resource.validate().is_err());
    }

    #[test]
    fn test_date_and_time_ranges() {
        let mut resource = valid_resource();
        let schedule = resource.schedule.as_mut().unwrap();
        schedule.schedule_start_date = Some(DateBlock {
            year: 10000,
            month: 0,
            day: 32,
        });
        schedule.start_time_of_day = Some(TimeOfDayBlock {
            hours: 25,
            minutes: 0,
            seconds: 61,
            nanos: 0,
        });

        let msg = resource.validate().unwrap_err().to_string();
        assert!(msg.contains("schedule.schedule_start_date.year"));
        assert!(msg.contains("schedule.schedule_start_date.month"));
        assert!(msg.contains("schedule.schedule_start_date.day"));
        assert!(msg.contains("schedule.start_time_of_day.hours"));
        assert!(msg.contains("schedule.start_time_of_day.seconds"));
        assert!(!msg.contains("minutes"));
    }

    #[test]
    fn test_source_conflict_reported() {
        let mut resource = valid_resource();
        let spec = resource.transfer_spec.as_mut().unwrap();
        spec.gcs_data_source = Some(GcsDataBlock {
            bucket_name: "src".to_string(),
        });
        spec.http_data_source = Some(HttpDataBlock {
            list_url: "https://example.com".to_string(),
        });

        let msg = resource.validate().unwrap_err().to_string();
        assert!(msg.contains("transfer_spec.gcs_data_source"));
        assert!(msg.contains("transfer_spec.http_data_source"));
    }

    #[test]
    fn test_delete_options_conflict() {
        let options = TransferOptionsBlock {
            delete_objects_unique_in_sink: true,
            delete_objects_from_source_after_transfer: true,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = TransferOptionsBlock {
            overwrite_objects_already_existing_in_sink: true,
            delete_objects_unique_in_sink: true,
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_aws_key_pair_required_together() {
        let block = AwsS3DataBlock {
            bucket_name: "b".to_string(),
            aws_access_key: Some(AwsAccessKeyBlock {
                access_key_id: "id".to_string(),
                secret_access_key: String::new(),
            }),
        };
        assert!(block.validate().is_err());
    }

    #[test]
    fn test_prefix_limit_and_durations() {
        let conditions = ObjectConditionsBlock {
            include_prefixes: vec!["p".to_string(); 1001],
            min_time_elapsed_since_last_modification: Some("10 minutes".to_string()),
            ..Default::default()
        };
        let msg = conditions.validate().unwrap_err().to_string();
        assert!(msg.contains("include_prefixes"));
        assert!(msg.contains("min_time_elapsed_since_last_modification"));
    }

    #[test]
    fn test_is_duration() {
        for ok in ["3600s", "1h30m", "1.5h", "0", "300ms", "-2s"] {
            assert!(is_duration(ok), "{}", ok);
        }
        for bad in ["", "s", "10", "1d", "1..5s", "abc"] {
            assert!(!is_duration(bad), "{}", bad);
        }
    }
}
