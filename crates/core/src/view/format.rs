use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

pub const MISSING: &str = "—";

/// Half away from zero, so `0.125` becomes `0.13`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `{:.2}` alone rounds exact binary ties to even; go through [`round2`] first.
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", round2(value))
}

pub fn money(value: f64) -> String {
    format!("${}", fixed2(value))
}

pub fn money_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => money(v),
        _ => format!("${MISSING}"),
    }
}

/// Two decimals with an explicit `+` only for strictly positive values.
pub fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", fixed2(value))
    } else {
        fixed2(value)
    }
}

pub fn percent_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", fixed2(v)),
        _ => format!("{MISSING}%"),
    }
}

pub fn clock_minutes<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%H:%M").to_string()
}

pub fn clock_seconds<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%H:%M:%S").to_string()
}
