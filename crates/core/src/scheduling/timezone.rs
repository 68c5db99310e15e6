//! UTC to site-local time conversion.
//!
//! A named timezone id is preferred since it absorbs DST transitions; the
//! static UTC-offset path is legacy compatibility and can drift across DST
//! boundaries.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use dueline_domain::Location;
use tracing::warn;

const SECONDS_PER_HOUR: i32 = 3_600;

/// Local wall-clock time at a location, falling back to UTC when the
/// location carries no usable timezone information.
pub fn local_time(timestamp: DateTime<Utc>, location: Option<&Location>) -> NaiveDateTime {
    let Some(location) = location else {
        return timestamp.naive_utc();
    };

    if let Some(tz_id) = &location.timezone_id {
        match tz_id.parse::<Tz>() {
            Ok(tz) => return timestamp.with_timezone(&tz).naive_local(),
            Err(_) => {
                warn!(location_id = %location.id, timezone_id = %tz_id, "unknown timezone id; trying static offset");
            }
        }
    }

    if let Some(offset_hours) = location.utc_offset_hours {
        if let Some(offset) = FixedOffset::east_opt(offset_hours * SECONDS_PER_HOUR) {
            return timestamp.with_timezone(&offset).naive_local();
        }
        warn!(location_id = %location.id, offset_hours, "UTC offset out of range; falling back to UTC");
    }

    timestamp.naive_utc()
}
