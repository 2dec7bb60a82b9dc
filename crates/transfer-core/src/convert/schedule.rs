//! Date, TimeOfDay and Schedule converters

use super::{FieldConverter, expand_block, expand_required, flatten_block};
use crate::Result;
use crate::model::{Date, Schedule, TimeOfDay};
use crate::resource::{DateBlock, ScheduleBlock, TimeOfDayBlock};

impl FieldConverter for DateBlock {
    type Domain = Date;

    fn expand(&self) -> Result<Date> {
        Ok(Date {
            year: self.year,
            month: self.month,
            day: self.day,
        })
    }

    fn flatten(date: &Date) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}

impl FieldConverter for TimeOfDayBlock {
    type Domain = TimeOfDay;

    fn expand(&self) -> Result<TimeOfDay> {
        Ok(TimeOfDay {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            nanos: self.nanos,
        })
    }

    fn flatten(time: &TimeOfDay) -> Self {
        Self {
            hours: time.hours,
            minutes: time.minutes,
            seconds: time.seconds,
            nanos: time.nanos,
        }
    }
}

impl FieldConverter for ScheduleBlock {
    type Domain = Schedule;

    fn expand(&self) -> Result<Schedule> {
        Ok(Schedule {
            schedule_start_date: Some(expand_required(
                self.schedule_start_date.as_ref(),
                "schedule.schedule_start_date",
            )?),
            schedule_end_date: expand_block(self.schedule_end_date.as_ref())?,
            start_time_of_day: expand_block(self.start_time_of_day.as_ref())?,
        })
    }

    fn flatten(schedule: &Schedule) -> Self {
        Self {
            schedule_start_date: flatten_block(schedule.schedule_start_date.as_ref()),
            schedule_end_date: flatten_block(schedule.schedule_end_date.as_ref()),
            start_time_of_day: flatten_block(schedule.start_time_of_day.as_ref()),
        }
    }
}
