//! Lenient deserializers for records written by older dashboard versions.
//!
//! Older data stored unset optional fields as empty strings and keyed
//! habit completions by strings such as `"Fri Oct 16 2026"`.

use crate::constants::MAX_PROGRESS;
use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

const ISO_DAY: &str = "%Y-%m-%d";
const LEGACY_DAY: &str = "%a %b %d %Y";

pub(crate) fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, ISO_DAY)
        .or_else(|_| NaiveDate::parse_from_str(s, LEGACY_DAY))
        .ok()
}

/// `Option<String>` where `""` and `null` both mean absent.
pub(crate) fn blank_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// `Option<NaiveDate>` where `""` and `null` both mean absent.
pub(crate) fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_day(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date '{s}'"))),
    }
}

/// Progress stored as any integer, clamped into 0..=100.
pub(crate) fn clamped_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    let clamped = raw.clamp(0, i64::from(MAX_PROGRESS));
    u8::try_from(clamped).map_err(D::Error::custom)
}

/// Completion days in ISO or legacy form. Duplicates collapse.
pub(crate) fn day_set<'de, D>(deserializer: D) -> Result<BTreeSet<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    raw.iter()
        .map(|s| parse_day(s).ok_or_else(|| D::Error::custom(format!("invalid day key '{s}'"))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_accepts_iso_and_legacy() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 16);
        assert_eq!(parse_day("2026-10-16"), expected);
        assert_eq!(parse_day("Fri Oct 16 2026"), expected);
        assert_eq!(parse_day("16/10/2026"), None);
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "blank_string")]
        image: Option<String>,
        #[serde(default, deserialize_with = "blank_date")]
        deadline: Option<NaiveDate>,
        #[serde(default, deserialize_with = "clamped_progress")]
        progress: u8,
        #[serde(default, deserialize_with = "day_set")]
        days: BTreeSet<NaiveDate>,
    }

    #[test]
    fn test_blank_fields_read_as_absent() {
        let probe: Probe = serde_json::from_str(r#"{"image":"","deadline":""}"#).unwrap();
        assert!(probe.image.is_none());
        assert!(probe.deadline.is_none());
        assert_eq!(probe.progress, 0);
        assert!(probe.days.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        let high: Probe = serde_json::from_str(r#"{"progress":250}"#).unwrap();
        let low: Probe = serde_json::from_str(r#"{"progress":-3}"#).unwrap();
        assert_eq!(high.progress, 100);
        assert_eq!(low.progress, 0);
    }

    #[test]
    fn test_day_set_deduplicates_mixed_formats() {
        let probe: Probe =
            serde_json::from_str(r#"{"days":["2026-10-16","Fri Oct 16 2026","2026-10-15"]}"#)
                .unwrap();
        assert_eq!(probe.days.len(), 2);
    }

    #[test]
    fn test_invalid_day_is_an_error() {
        let result: Result<Probe, _> = serde_json::from_str(r#"{"days":["yesterday"]}"#);
        assert!(result.is_err());
    }
}
