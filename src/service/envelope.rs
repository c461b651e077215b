// * Response envelope wrapped around the refinery output

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::refinery::record::ShipRecord;
use crate::refinery::tables::RawRow;

/// Query toggles accepted by `/ships`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseOptions {
    pub pretty: bool,
    pub include_raw: bool,
}

impl ResponseOptions {
    /// Parses `pretty=1` and `raw=1` style toggles; unknown keys are ignored
    pub fn from_query(query: Option<&str>) -> Self {
        let mut options = Self::default();
        let Some(query) = query else {
            return options;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let enabled = is_truthy(&value);
            match key.as_ref() {
                "pretty" => options.pretty = enabled,
                "raw" => options.include_raw = enabled,
                _ => {}
            }
        }
        options
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "1" | "true" | "yes" | "on"
    )
}

/// A record as rendered in the response, optionally with its source cells
#[derive(Debug, Serialize)]
pub struct ShipRecordView<'a> {
    #[serde(flatten)]
    pub record: &'a ShipRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<&'a RawRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipsEnvelope<'a> {
    pub source: &'a str,
    pub updated_at: String,
    pub count: usize,
    pub ships: Vec<ShipRecordView<'a>>,
}

impl<'a> ShipsEnvelope<'a> {
    pub fn new(
        source: &'a str,
        updated_at: DateTime<Utc>,
        records: &'a [ShipRecord],
        include_raw: bool,
    ) -> Self {
        let ships: Vec<ShipRecordView<'a>> = records
            .iter()
            .map(|record| ShipRecordView {
                record,
                raw: include_raw.then_some(&record.raw),
            })
            .collect();

        Self {
            source,
            updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            count: ships.len(),
            ships,
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<ShipRecord> {
        vec![ShipRecord {
            ship: Some("MSC LORENA".to_string()),
            raw: vec!["MSC LORENA".to_string(), "Panamá".to_string()],
            ..Default::default()
        }]
    }

    #[test]
    fn test_query_toggles() {
        assert_eq!(ResponseOptions::from_query(None), ResponseOptions::default());

        let options = ResponseOptions::from_query(Some("pretty=1&raw=true"));
        assert!(options.pretty);
        assert!(options.include_raw);

        let options = ResponseOptions::from_query(Some("raw=0&foo=bar"));
        assert!(!options.pretty);
        assert!(!options.include_raw);
    }

    #[test]
    fn test_envelope_shape() {
        let records = sample();
        let at = Utc.with_ymd_and_hms(2025, 9, 16, 3, 54, 0).unwrap();
        let envelope = ShipsEnvelope::new("https://example.com/lineup", at, &records, false);
        let value: serde_json::Value = serde_json::from_str(&envelope.to_json(false).unwrap()).unwrap();

        assert_eq!(value["source"], "https://example.com/lineup");
        assert_eq!(value["updatedAt"], "2025-09-16T03:54:00.000Z");
        assert_eq!(value["count"], 1);
        assert_eq!(value["ships"][0]["ship"], "MSC LORENA");
        assert!(value["ships"][0]["imo"].is_null());
        assert!(value["ships"][0].get("raw").is_none());
    }

    #[test]
    fn test_raw_is_included_on_request() {
        let records = sample();
        let envelope = ShipsEnvelope::new("src", Utc::now(), &records, true);
        let value: serde_json::Value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["ships"][0]["raw"][1], "Panamá");
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let records = sample();
        let envelope = ShipsEnvelope::new("src", Utc::now(), &records, false);
        assert!(envelope.to_json(true).unwrap().contains('\n'));
        assert!(!envelope.to_json(false).unwrap().contains('\n'));
    }
}
