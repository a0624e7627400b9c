//! Raw and normalized ticket records.

use serde::Serialize;

/// A ticket as returned by the API. Its shape is not fixed.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A ticket flattened into the fixed export schema.
///
/// Field order here is the column order of every exported file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct NormalizedRow {
    #[serde(rename = "Owner")]
    pub owner: String,

    /// Wall-clock start of the run, shared by every row
    #[serde(rename = "RunDate")]
    pub run_date: String,

    /// Tag of the resource the row came from
    #[serde(rename = "RecordType")]
    pub record_type: String,

    #[serde(rename = "CreatedDate")]
    pub created_date: String,

    #[serde(rename = "CreatedTime")]
    pub created_time: String,

    #[serde(rename = "TicketId")]
    pub ticket_id: String,

    #[serde(rename = "Subject")]
    pub subject: String,

    #[serde(rename = "Status")]
    pub status: String,
}

impl NormalizedRow {
    /// Column headers, in export order.
    pub const HEADERS: [&'static str; 8] = [
        "Owner",
        "RunDate",
        "RecordType",
        "CreatedDate",
        "CreatedTime",
        "TicketId",
        "Subject",
        "Status",
    ];

    /// Cell values, in the same order as [`Self::HEADERS`].
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.owner,
            &self.run_date,
            &self.record_type,
            &self.created_date,
            &self.created_time,
            &self.ticket_id,
            &self.subject,
            &self.status,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_follow_header_order() {
        let row = NormalizedRow {
            owner: "jdoe".to_string(),
            run_date: "2024-03-16 08:00:00".to_string(),
            record_type: "incident".to_string(),
            created_date: "2024-03-15".to_string(),
            created_time: "15:30:00".to_string(),
            ticket_id: "10422".to_string(),
            subject: "VPN down".to_string(),
            status: "Active".to_string(),
        };

        let json = serde_json::to_value(&row).unwrap();
        for (header, value) in NormalizedRow::HEADERS.iter().zip(row.fields()) {
            assert_eq!(json[header], value);
        }
    }
}
