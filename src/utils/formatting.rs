//! Formatting utilities used for CLI output.

use crate::ui::messages::{FG_GREEN, FG_RED, RESET};

/// Signed minutes as hours/minutes, e.g. `+02h 25m`, `-01:10`.
pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Balance value: readable form plus raw minutes, green when >= 0, red otherwise.
pub fn colored_balance(mins: i64) -> String {
    let color = if mins >= 0 { FG_GREEN } else { FG_RED };
    format!(
        "{}{}{} ({} min)",
        color,
        mins2readable(mins, true, false),
        RESET,
        mins
    )
}
