use chrono::{DateTime, Local};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_2_MIN: i64 = Self::MS_IN_MIN * 2;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_MIN * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_MIN * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_90_MIN: i64 = Self::MS_IN_MIN * 90;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_5_D: i64 = Self::MS_IN_D * 5;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const MS_IN_1_M: i64 = Self::MS_IN_D * 30;
    pub const MS_IN_3_M: i64 = Self::MS_IN_1_M * 3;
    pub const MS_IN_Y: i64 = Self::MS_IN_D * 365;

    /// Clock format used for the "updated at" line of a status page.
    pub const DISPLAY_CLOCK_FORMAT: &str = "%H:%M:%S";

    /// Convert a bar interval in milliseconds to the data vendor's shorthand (e.g. `60m`, `1d`).
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_MIN => "1m",
            Self::MS_IN_2_MIN => "2m",
            Self::MS_IN_5_MIN => "5m",
            Self::MS_IN_15_MIN => "15m",
            Self::MS_IN_30_MIN => "30m",
            Self::MS_IN_H => "60m",
            Self::MS_IN_90_MIN => "90m",
            Self::MS_IN_D => "1d",
            Self::MS_IN_5_D => "5d",
            Self::MS_IN_W => "1wk",
            Self::MS_IN_1_M => "1mo",
            Self::MS_IN_3_M => "3mo",
            _ => "unknown",
        }
    }

    /// Parse a vendor-style duration shorthand (`60m`, `1h`, `5d`, `1wk`, `1mo`, `1y`) into milliseconds.
    /// Used for both the lookback window and the bar interval.
    pub fn parse_shorthand(text: &str) -> Result<i64, String> {
        let text = text.trim();
        let split_at = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("Missing unit in duration '{}'", text))?;
        let (amount, unit) = text.split_at(split_at);
        let amount: i64 = amount
            .parse()
            .map_err(|_| format!("Missing amount in duration '{}'", text))?;

        let unit_ms = match unit {
            "m" => Self::MS_IN_MIN,
            "h" => Self::MS_IN_H,
            "d" => Self::MS_IN_D,
            "wk" => Self::MS_IN_W,
            "mo" => Self::MS_IN_1_M,
            "y" => Self::MS_IN_Y,
            _ => return Err(format!("Unsupported unit '{}' in duration '{}'", unit, text)),
        };
        amount
            .checked_mul(unit_ms)
            .ok_or_else(|| format!("Duration '{}' is out of range", text))
    }
}

pub fn display_clock(at: &DateTime<Local>) -> String {
    at.format(TimeUtils::DISPLAY_CLOCK_FORMAT).to_string()
}
