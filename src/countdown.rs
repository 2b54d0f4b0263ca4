/// Countdown derivation
///
/// Pure time arithmetic: the application samples the clock once per second
/// and calls [`remaining`] with the freshly read time, so there is a single
/// source of time truth and everything here is testable with fixed inputs.
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// The exact accepted target format, interpreted in the viewer's local zone
const TARGET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Breakdown of the time left until the target
///
/// Recomputed every tick, never stored. When `reached` is true all numeric
/// fields are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub reached: bool,
}

impl TimeRemaining {
    /// The all-zero, already-reached breakdown
    pub fn reached() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            reached: true,
        }
    }
}

/// Parse a `YYYY-MM-DDTHH:mm:ss` string as a local timestamp.
///
/// Returns `None` for anything that does not match the pattern exactly, and
/// for local times that do not resolve unambiguously (DST gaps/overlaps).
pub fn parse_target(target_iso: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(target_iso.trim(), TARGET_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

/// Derive the remaining-time breakdown for `target` as seen at `now`.
///
/// A target at or before `now` yields the reached state immediately; there
/// is no grace tick.
pub fn remaining(target: DateTime<Local>, now: DateTime<Local>) -> TimeRemaining {
    let diff_ms = (target - now).num_milliseconds().max(0);
    if diff_ms == 0 {
        return TimeRemaining::reached();
    }

    let days = diff_ms / MS_PER_DAY;
    let rest = diff_ms % MS_PER_DAY;
    let hours = rest / MS_PER_HOUR;
    let rest = rest % MS_PER_HOUR;
    let minutes = rest / MS_PER_MINUTE;
    let seconds = (rest % MS_PER_MINUTE) / MS_PER_SECOND;

    TimeRemaining {
        days: days as u64,
        hours: hours as u64,
        minutes: minutes as u64,
        seconds: seconds as u64,
        reached: false,
    }
}

/// Derive the breakdown straight from the stored target string.
///
/// An unparseable target is treated as already reached: announcing the day
/// has arrived is harmless, an error state on a gift page is not. This is a
/// deliberate fail-safe default, not silent data loss.
pub fn remaining_for(target_iso: &str, now: DateTime<Local>) -> TimeRemaining {
    match parse_target(target_iso) {
        Some(target) => remaining(target, now),
        None => TimeRemaining::reached(),
    }
}
