// src/services/normalizer.rs

//! Record normalizer.
//!
//! Maps raw API records onto the fixed eight-column export row. The run
//! timestamp and reference timezone are passed in, so the mapping is pure.

use chrono::FixedOffset;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{NormalizedRow, RawRecord, ResourceSpec};
use crate::utils::time::split_date_time;

/// Raw field holding the creation timestamp.
pub const CREATED_FIELD: &str = "CreatedDateTime";

/// Normalize one resource type's records, preserving order.
pub fn normalize(
    records: &[RawRecord],
    tag: &str,
    id_field: &str,
    run_date: &str,
    tz: FixedOffset,
) -> Result<Vec<NormalizedRow>> {
    records
        .iter()
        .map(|record| normalize_record(record, tag, id_field, run_date, tz))
        .collect()
}

/// Normalize records using the tag and id field of `spec`.
pub fn normalize_resource(
    records: &[RawRecord],
    spec: &ResourceSpec,
    run_date: &str,
    tz: FixedOffset,
) -> Result<Vec<NormalizedRow>> {
    normalize(records, &spec.tag, &spec.id_field, run_date, tz)
}

/// Normalize a single record.
///
/// Missing fields become empty strings. A creation timestamp that does not
/// parse is kept verbatim as the date with an empty time. Only a non-string
/// timestamp is an error.
pub fn normalize_record(
    record: &RawRecord,
    tag: &str,
    id_field: &str,
    run_date: &str,
    tz: FixedOffset,
) -> Result<NormalizedRow> {
    let (created_date, created_time) = created(record, tz)?;

    Ok(NormalizedRow {
        owner: text(record, "Owner"),
        run_date: run_date.to_string(),
        record_type: tag.to_string(),
        created_date,
        created_time,
        ticket_id: text(record, id_field),
        subject: text(record, "Subject"),
        status: text(record, "Status"),
    })
}

/// Render a field as text. Objects and arrays are kept as compact JSON.
fn text(record: &RawRecord, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn created(record: &RawRecord, tz: FixedOffset) -> Result<(String, String)> {
    let raw = match record.get(CREATED_FIELD) {
        None | Some(Value::Null) => return Ok((String::new(), String::new())),
        Some(Value::String(s)) => s,
        Some(other) => return Err(AppError::unexpected_value(CREATED_FIELD, kind(other))),
    };

    if raw.is_empty() {
        return Ok((String::new(), String::new()));
    }

    Ok(split_date_time(raw, tz).unwrap_or_else(|| {
        log::debug!("Unparsable {} {:?}; keeping raw value", CREATED_FIELD, raw);
        (raw.clone(), String::new())
    }))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const RUN_DATE: &str = "2024-03-16 08:00:00";

    fn bogota() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    fn incident() -> RawRecord {
        raw(json!({
            "Owner": "jdoe",
            "IncidentNumber": 10422,
            "Subject": "VPN down",
            "Status": "Active",
            "CreatedDateTime": "2024-03-15T20:30:00Z",
            "Priority": "2"
        }))
    }

    #[test]
    fn test_maps_all_columns() {
        let row = normalize_record(&incident(), "incident", "IncidentNumber", RUN_DATE, bogota())
            .unwrap();

        assert_eq!(
            row,
            NormalizedRow {
                owner: "jdoe".to_string(),
                run_date: RUN_DATE.to_string(),
                record_type: "incident".to_string(),
                created_date: "2024-03-15".to_string(),
                created_time: "15:30:00".to_string(),
                ticket_id: "10422".to_string(),
                subject: "VPN down".to_string(),
                status: "Active".to_string(),
            }
        );
    }

    #[test]
    fn test_id_field_is_resource_specific() {
        let record = raw(json!({ "IncidentNumber": 1, "ServiceReqNumber": "SR-7" }));

        let row = normalize_record(&record, "request", "ServiceReqNumber", RUN_DATE, bogota())
            .unwrap();

        assert_eq!(row.ticket_id, "SR-7");
        assert_eq!(row.record_type, "request");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let row = normalize_record(&RawRecord::new(), "incident", "IncidentNumber", RUN_DATE, bogota())
            .unwrap();

        assert_eq!(row.owner, "");
        assert_eq!(row.ticket_id, "");
        assert_eq!(row.subject, "");
        assert_eq!(row.status, "");
        assert_eq!(row.created_date, "");
        assert_eq!(row.created_time, "");
        assert_eq!(row.run_date, RUN_DATE);
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let record = raw(json!({ "Owner": null, "CreatedDateTime": null }));

        let row = normalize_record(&record, "incident", "IncidentNumber", RUN_DATE, bogota())
            .unwrap();

        assert_eq!(row.owner, "");
        assert_eq!(row.created_date, "");
    }

    #[test]
    fn test_malformed_timestamp_falls_back_to_raw() {
        let record = raw(json!({ "CreatedDateTime": "not-a-date" }));

        let row = normalize_record(&record, "incident", "IncidentNumber", RUN_DATE, bogota())
            .unwrap();

        assert_eq!(row.created_date, "not-a-date");
        assert_eq!(row.created_time, "");
    }

    #[test]
    fn test_non_string_timestamp_is_error() {
        let record = raw(json!({ "CreatedDateTime": 1710534600 }));

        let err = normalize_record(&record, "incident", "IncidentNumber", RUN_DATE, bogota())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::UnexpectedValue { kind: "number", .. }
        ));
    }

    #[test]
    fn test_structured_text_fields_kept_as_json() {
        let records = vec![
            raw(json!({ "IncidentNumber": 1, "Subject": "ok" })),
            raw(json!({
                "IncidentNumber": 2,
                "Subject": { "Text": "rich" },
                "Owner": ["jdoe", "asmith"],
                "Status": true
            })),
        ];

        let rows = normalize(&records, "incident", "IncidentNumber", RUN_DATE, bogota()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subject, "ok");
        assert_eq!(rows[1].subject, r#"{"Text":"rich"}"#);
        assert_eq!(rows[1].owner, r#"["jdoe","asmith"]"#);
        assert_eq!(rows[1].status, "true");
    }

    #[test]
    fn test_normalize_is_repeatable() {
        let records = vec![incident(), raw(json!({ "CreatedDateTime": "garbage" }))];

        let first = normalize(&records, "incident", "IncidentNumber", RUN_DATE, bogota()).unwrap();
        let second = normalize(&records, "incident", "IncidentNumber", RUN_DATE, bogota()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let records: Vec<RawRecord> = ["3", "1", "3"]
            .iter()
            .map(|id| raw(json!({ "IncidentNumber": id })))
            .collect();

        let rows = normalize(&records, "incident", "IncidentNumber", RUN_DATE, bogota()).unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.ticket_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "3"]);
        assert!(rows.iter().all(|r| r.run_date == RUN_DATE));
    }

    #[test]
    fn test_normalize_resource_uses_spec() {
        let spec = ResourceSpec::new("ServiceReqs", "service requests", "request", "ServiceReqNumber");
        let records = vec![raw(json!({ "ServiceReqNumber": 55 }))];

        let rows = normalize_resource(&records, &spec, RUN_DATE, bogota()).unwrap();

        assert_eq!(rows[0].ticket_id, "55");
        assert_eq!(rows[0].record_type, "request");
    }
}
