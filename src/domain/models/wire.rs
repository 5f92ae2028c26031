//! Lenient decoding for the gateway's JSON payloads. Ids arrive as strings or
//! numbers, and timestamps with or without a UTC offset.

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts a JSON string or number. `null` decodes to an empty string, which is how
/// locally synthesized messages carry a missing thread id.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => return Ok("".to_string()),
        Value::String(val) => return Ok(val),
        Value::Number(val) => return Ok(val.to_string()),
        other => {
            return Err(de::Error::custom(format!(
                "expected a string or a number, got {other}"
            )));
        }
    }
}

/// Parses RFC 3339 timestamps, falling back to naive ISO-8601 date-times which are
/// taken to be in local time.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                return Ok(local.with_timezone(&Utc));
            }
        }
    }

    bail!(format!("Unrecognised timestamp: {raw}"));
}

pub mod timestamp {
    use chrono::DateTime;
    use chrono::SecondsFormat;
    use chrono::Utc;
    use serde::de;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        return serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        return super::parse_timestamp(&raw).map_err(de::Error::custom);
    }
}
