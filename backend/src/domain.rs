use crate::db::DbConnection;
use anyhow::Result;
use chrono::Utc;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use shared::{
    series, CreateRecordRequest, DeleteRecordResponse, RecordListResponse, TransactionKind,
    TransactionRecord,
};
use thiserror::Error;
use tracing::info;

const MAX_TITLE_LENGTH: usize = 256;

/// Validation failures surfaced to the client as 400s
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Title must be at most {MAX_TITLE_LENGTH} characters")]
    TitleTooLong,
    #[error("Amount must be a positive number")]
    NonPositiveAmount,
    #[error("Date must be YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Service managing the income and expense ledgers
#[derive(Clone)]
pub struct RecordService {
    db: DbConnection,
}

impl RecordService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List all records of one kind, newest first
    pub async fn list(&self, kind: TransactionKind) -> Result<RecordListResponse> {
        let records = self.db.list_records(kind).await?;
        info!("Listing {} {} records", records.len(), kind);
        Ok(RecordListResponse { records })
    }

    /// Validate and store a new record
    pub async fn create(
        &self,
        kind: TransactionKind,
        request: CreateRecordRequest,
    ) -> Result<TransactionRecord, RecordError> {
        Self::validate(&request)?;

        let now = Utc::now();
        let record = TransactionRecord {
            id: TransactionRecord::generate_id(kind, now.timestamp_millis() as u64),
            title: request.title.trim().to_string(),
            amount: request.amount,
            date: request.date,
            category: request.category,
            description: request.description,
            created_at: now.to_rfc3339(),
        };

        self.db.insert_record(kind, &record).await?;
        info!("Created {} record {}", kind, record.id);
        Ok(record)
    }

    /// Delete a record, returning None when no record with that id exists in
    /// the given ledger
    pub async fn delete(
        &self,
        kind: TransactionKind,
        id: &str,
    ) -> Result<Option<DeleteRecordResponse>> {
        if !self.db.delete_record(kind, id).await? {
            return Ok(None);
        }
        info!("Deleted {} record {}", kind, id);
        Ok(Some(DeleteRecordResponse {
            deleted_id: id.to_string(),
            success_message: format!("{} deleted", capitalize(kind.as_str())),
        }))
    }

    fn validate(request: &CreateRecordRequest) -> Result<(), RecordError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(RecordError::TitleTooLong);
        }
        if !(request.amount > 0.0) {
            return Err(RecordError::NonPositiveAmount);
        }
        if series::parse_record_date(&request.date).is_none() {
            return Err(RecordError::InvalidDate);
        }
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Renders PDF invoices for stored records, keyed by the record id
#[derive(Clone)]
pub struct InvoiceService {
    db: DbConnection,
}

impl InvoiceService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Render the invoice for a payment id, or None when the record is
    /// unknown
    pub async fn render_invoice(&self, payment_id: &str) -> Result<Option<Vec<u8>>> {
        let record = match self.db.get_record(payment_id).await? {
            Some(record) => record,
            None => return Ok(None),
        };

        let bytes = Self::render_pdf(&record)?;
        info!("Rendered invoice for {} ({} bytes)", payment_id, bytes.len());
        Ok(Some(bytes))
    }

    fn render_pdf(record: &TransactionRecord) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new("Invoice", Mm(210.0), Mm(297.0), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        let kind = record.extract_kind().map(|k| k.to_string()).unwrap_or_default();

        layer.use_text("INVOICE", 24.0, Mm(20.0), Mm(270.0), &bold);
        layer.use_text(format!("Payment ID: {}", record.id), 10.0, Mm(20.0), Mm(258.0), &font);

        let lines = [
            format!("Title: {}", record.title),
            format!("Kind: {}", kind),
            format!("Amount: {:.2}", record.amount),
            format!("Date: {}", record.date),
            format!("Category: {}", record.category),
            format!("Description: {}", record.description),
            format!("Recorded at: {}", record.created_at),
        ];
        let mut y = 240.0;
        for line in &lines {
            layer.use_text(line.as_str(), 12.0, Mm(20.0), Mm(y), &font);
            y -= 8.0;
        }

        let bytes = doc.save_to_bytes()?;
        Ok(bytes)
    }
}
