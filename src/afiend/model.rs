use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One stored shell alias.
///
/// Field names are serialized in `PascalCase` so records written by older
/// a-fiend releases (`{"Name":"","Command":"ls","Added":"...","Labels":null}`)
/// decode unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasRecord {
    #[serde(default)]
    pub name: String,
    pub command: String,
    pub added: DateTime<Utc>,
    // Never populated or read; kept so existing stores round-trip.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<String>,
}

impl AliasRecord {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self::added_at(name, command, Utc::now())
    }

    pub fn added_at(
        name: impl Into<String>,
        command: impl Into<String>,
        added: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            added,
            labels: Vec::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_legacy_record_with_null_labels() {
        let json = r#"{"Name":"","Command":"ls -la","Added":"2016-03-01T10:20:30.123456789+01:00","Labels":null}"#;
        let record: AliasRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.command, "ls -la");
        assert!(record.labels.is_empty());
        assert_eq!(
            record.added.timestamp(),
            Utc.with_ymd_and_hms(2016, 3, 1, 9, 20, 30).unwrap().timestamp()
        );
        assert_eq!(record.added.timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn decodes_record_without_optional_fields() {
        let json = r#"{"Command":"git status","Added":"2020-01-01T00:00:00Z"}"#;
        let record: AliasRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.name, "");
        assert!(record.labels.is_empty());
    }

    #[test]
    fn serializes_pascal_case_fields() {
        let added = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let record = AliasRecord::added_at("gs", "git status", added);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["Name"], "gs");
        assert_eq!(json["Command"], "git status");
        assert_eq!(json["Added"], "2020-01-01T00:00:00Z");
        assert_eq!(json["Labels"], serde_json::json!([]));
    }
}
