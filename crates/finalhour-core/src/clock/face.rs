//! Derived values for drawing the clock face: period of the day, day label
//! and the minute-hand arc.

use serde::{Deserialize, Serialize};

use super::time::{ClockTime, MAX_DAY, MIN_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Dawn,
    Morning,
    Afternoon,
    Twilight,
    Night,
}

impl DayPeriod {
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            4..=6 => DayPeriod::Dawn,
            7..=12 => DayPeriod::Morning,
            13..=17 => DayPeriod::Afternoon,
            18..=20 => DayPeriod::Twilight,
            _ => DayPeriod::Night,
        }
    }
}

/// Index into the day labels; 0 is the fallback label for out-of-range days.
pub fn day_label_index(day: u8) -> usize {
    if (MIN_DAY..=MAX_DAY).contains(&day) {
        usize::from(day)
    } else {
        0
    }
}

/// Extent in degrees of the arc tracing the minutes, negative to run clockwise.
///
/// At the very origin of the countdown the arc is empty; at the start of
/// any other hour it is drawn almost full so the previous hour stays visible.
pub fn minute_arc_extent(time: ClockTime, origin: ClockTime) -> i32 {
    if time.minute() == 0 {
        if time.day() == origin.day() && time.hour() == origin.hour() {
            return 0;
        }
        return -359;
    }
    -6 * i32::from(time.minute())
}
