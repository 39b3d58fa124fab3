use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

// `/latest` sends naive ISO-8601 with microseconds, `/history` sends "YYYY-MM-DD HH:MM:SS".
// Both are UTC wall-clock values.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    anyhow::bail!("unrecognized timestamp: {raw:?}")
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_rfc3339_with_offset() {
        let ts = parse_timestamp("2026-03-02T18:30:00+09:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap());
    }

    #[test]
    fn accepts_naive_iso_with_fraction_as_utc() {
        let ts = parse_timestamp("2026-03-02T14:03:11.250000").unwrap();
        assert_eq!(
            ts,
            Utc.with_ymd_and_hms(2026, 3, 2, 14, 3, 11).unwrap()
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn accepts_space_separated_history_format() {
        let ts = parse_timestamp("2026-03-02 15:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 2, 15, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("").is_err());
    }
}
