use serde::{Deserialize, Serialize};
use std::fmt;

pub mod series;
pub mod summary;

/// Record ID in format: "record::<income|expense>::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    /// Short label shown in lists and invoices (max 256 characters)
    pub title: String,
    /// Record amount, always non-negative; the kind decides the sign
    pub amount: f64,
    /// Calendar date of the transaction, "YYYY-MM-DD" or RFC 3339
    pub date: String,
    pub category: String,
    pub description: String,
    /// Server-side creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Which ledger a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// Short label for the record (max 256 characters)
    pub title: String,
    /// Positive amount in whole currency units
    pub amount: f64,
    /// Calendar date, "YYYY-MM-DD" or RFC 3339
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordListResponse {
    pub records: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRecordResponse {
    pub deleted_id: String,
    pub success_message: String,
}

/// Error body returned by the backend for rejected requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

impl TransactionRecord {
    /// Generate record ID from kind and timestamp
    pub fn generate_id(kind: TransactionKind, epoch_millis: u64) -> String {
        format!("record::{}::{}", kind.as_str(), epoch_millis)
    }

    /// Parse record ID to extract components
    pub fn parse_id(id: &str) -> Result<(TransactionKind, u64), RecordIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "record" {
            return Err(RecordIdError::InvalidFormat);
        }

        let kind = match parts[1] {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            _ => return Err(RecordIdError::InvalidKind),
        };

        let epoch_millis = parts[2]
            .parse::<u64>()
            .map_err(|_| RecordIdError::InvalidTimestamp)?;

        Ok((kind, epoch_millis))
    }

    /// Extract epoch timestamp from record ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, RecordIdError> {
        Self::parse_id(&self.id).map(|(_, timestamp)| timestamp)
    }

    /// Extract the kind encoded in the record ID
    pub fn extract_kind(&self) -> Result<TransactionKind, RecordIdError> {
        Self::parse_id(&self.id).map(|(kind, _)| kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordIdError {
    InvalidFormat,
    InvalidKind,
    InvalidTimestamp,
}

impl fmt::Display for RecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIdError::InvalidFormat => write!(f, "Invalid record ID format"),
            RecordIdError::InvalidKind => write!(f, "Invalid record kind"),
            RecordIdError::InvalidTimestamp => write!(f, "Invalid timestamp in record ID"),
        }
    }
}

impl std::error::Error for RecordIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_record_id() {
        let income_id = TransactionRecord::generate_id(TransactionKind::Income, 1702516122000);
        assert_eq!(income_id, "record::income::1702516122000");

        let expense_id = TransactionRecord::generate_id(TransactionKind::Expense, 1702516125000);
        assert_eq!(expense_id, "record::expense::1702516125000");
    }

    #[test]
    fn test_parse_record_id() {
        let (kind, timestamp) = TransactionRecord::parse_id("record::income::1702516122000").unwrap();
        assert_eq!(kind, TransactionKind::Income);
        assert_eq!(timestamp, 1702516122000);

        let (kind, timestamp) = TransactionRecord::parse_id("record::expense::1702516125000").unwrap();
        assert_eq!(kind, TransactionKind::Expense);
        assert_eq!(timestamp, 1702516125000);

        // Invalid format
        assert!(TransactionRecord::parse_id("invalid::format").is_err());
        assert!(TransactionRecord::parse_id("record::income").is_err());
        assert!(TransactionRecord::parse_id("not_record::income::123").is_err());

        // Invalid kind
        assert!(TransactionRecord::parse_id("record::transfer::123").is_err());

        // Invalid timestamp
        assert!(TransactionRecord::parse_id("record::income::not_a_number").is_err());
    }

    #[test]
    fn test_extract_timestamp_and_kind() {
        let record = TransactionRecord {
            id: "record::expense::1702516122000".to_string(),
            title: "Groceries".to_string(),
            amount: 42.5,
            date: "2023-12-14".to_string(),
            category: "food".to_string(),
            description: "Weekly shop".to_string(),
            created_at: "2023-12-14T01:02:02.000Z".to_string(),
        };

        assert_eq!(record.extract_timestamp().unwrap(), 1702516122000);
        assert_eq!(record.extract_kind().unwrap(), TransactionKind::Expense);
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionKind::Income).unwrap(), "\"income\"");
        assert_eq!(
            serde_json::from_str::<TransactionKind>("\"expense\"").unwrap(),
            TransactionKind::Expense
        );
    }
}
