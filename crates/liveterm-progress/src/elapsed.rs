//! Elapsed-time rounding and compact formatting.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Round `d` to the nearest multiple of `granularity`, halves rounding up.
///
/// A zero granularity returns `d` unchanged.
#[must_use]
pub fn round_duration(d: Duration, granularity: Duration) -> Duration {
    let unit = granularity.as_nanos();
    if unit == 0 {
        return d;
    }
    let nanos = d.as_nanos();
    let remainder = nanos % unit;
    let rounded = if remainder * 2 < unit {
        nanos - remainder
    } else {
        nanos + (unit - remainder)
    };
    from_nanos(rounded)
}

#[allow(clippy::cast_possible_truncation)]
fn from_nanos(nanos: u128) -> Duration {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}

/// Format a duration compactly, e.g. `"0s"`, `"250ms"`, `"1.5s"`, `"2m5s"`,
/// `"1h0m3s"`.
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", with_fraction(nanos, 1_000));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", with_fraction(nanos, 1_000_000));
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = u128::from(total_secs % 60) * NANOS_PER_SEC + u128::from(d.subsec_nanos());
    let seconds = format!("{}s", with_fraction(seconds, NANOS_PER_SEC));

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}")
    } else {
        seconds
    }
}

/// `value / unit` as a decimal without trailing zeros.
fn with_fraction(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = unit.ilog10() as usize;
    let fraction = format!("{fraction:0digits$}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
