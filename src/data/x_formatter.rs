//! X-axis value formatting for numeric and epoch-time axes.
//!
//! Time values are seconds since the UNIX epoch and are shown in UTC. The
//! amount of detail follows the visible span: dates are only shown when the
//! span reaches a day, sub-second digits only when it is below a minute.

use chrono::{DateTime, Utc};

/// Resolution picked for time labels, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeResolution {
    Days,
    Minutes,
    Seconds,
    Milliseconds,
}

const SECS_PER_DAY: f64 = 86_400.0;

/// Pick a label resolution from the visible span (seconds).
pub fn determine_resolution(span_secs: f64) -> TimeResolution {
    let span = span_secs.abs();
    if span >= 7.0 * SECS_PER_DAY {
        TimeResolution::Days
    } else if span >= 3_600.0 {
        TimeResolution::Minutes
    } else if span >= 60.0 {
        TimeResolution::Seconds
    } else {
        TimeResolution::Milliseconds
    }
}

/// Format an epoch-seconds value for an axis spanning `span_secs`.
pub fn format_time(secs: f64, span_secs: f64) -> String {
    let Some(dt) = to_datetime(secs) else {
        return format!("{secs:.3}");
    };
    let show_date = span_secs.abs() >= SECS_PER_DAY;
    let fmt = match (determine_resolution(span_secs), show_date) {
        (TimeResolution::Days, _) => "%Y-%m-%d",
        (TimeResolution::Minutes, true) => "%m-%d %H:%M",
        (TimeResolution::Minutes, false) => "%H:%M",
        (TimeResolution::Seconds, _) => "%H:%M:%S",
        (TimeResolution::Milliseconds, _) => "%H:%M:%S%.3f",
    };
    dt.format(fmt).to_string()
}

/// Full-precision timestamp used in hover readouts and exports.
pub fn format_time_full(secs: f64) -> String {
    match to_datetime(secs) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => format!("{secs:.3}"),
    }
}

/// Format a plain number, using `step` (tick spacing) to choose the digits.
pub fn format_number(value: f64, step: f64) -> String {
    let step = step.abs();
    if value != 0.0 && (value.abs() >= 1e7 || value.abs() < 1e-4) {
        return format!("{value:.3e}");
    }
    if step >= 1.0 || step == 0.0 {
        if value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        }
    } else {
        let dec = (-step.log10()).ceil().clamp(0.0, 9.0) as usize;
        format!("{value:.dec$}")
    }
}

/// Format an X value for either axis kind.
pub fn format_x(value: f64, is_time: bool, span_or_step: f64) -> String {
    if is_time {
        format_time(value, span_or_step)
    } else {
        format_number(value, span_or_step)
    }
}

/// Format an X value at full precision, for hover readouts.
pub fn format_x_full(value: f64, is_time: bool) -> String {
    if is_time {
        format_time_full(value)
    } else {
        format!("{value}")
    }
}

fn to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos)
}
