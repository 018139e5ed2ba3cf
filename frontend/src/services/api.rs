use gloo::net::http::Request;
use shared::{ApiErrorBody, CreateRecordRequest, DeleteRecordResponse, TransactionRecord};

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Fetch all income records
    pub async fn get_incomes(&self) -> Result<Vec<TransactionRecord>, String> {
        self.get_records("get-incomes").await
    }

    /// Fetch all expense records
    pub async fn get_expenses(&self) -> Result<Vec<TransactionRecord>, String> {
        self.get_records("get-expenses").await
    }

    /// Create an income record
    pub async fn add_income(&self, request: &CreateRecordRequest) -> Result<TransactionRecord, String> {
        self.post_record("add-income", request).await
    }

    /// Create an expense record
    pub async fn add_expense(&self, request: &CreateRecordRequest) -> Result<TransactionRecord, String> {
        self.post_record("add-expense", request).await
    }

    /// Delete an income record by id
    pub async fn delete_income(&self, id: &str) -> Result<DeleteRecordResponse, String> {
        self.delete_record("delete-income", id).await
    }

    /// Delete an expense record by id
    pub async fn delete_expense(&self, id: &str) -> Result<DeleteRecordResponse, String> {
        self.delete_record("delete-expense", id).await
    }

    /// Download the PDF invoice for a payment id as raw bytes
    pub async fn download_invoice(&self, payment_id: &str) -> Result<Vec<u8>, String> {
        let url = format!("{}/invoice/{}", self.base_url, payment_id);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    response
                        .binary()
                        .await
                        .map_err(|e| format!("Failed to read invoice bytes: {}", e))
                } else {
                    Err(format!("Server error {}", response.status()))
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn get_records(&self, path: &str) -> Result<Vec<TransactionRecord>, String> {
        let url = format!("{}/api/v1/{}", self.base_url, path);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<TransactionRecord>>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse records: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch records: {}", e)),
        }
    }

    async fn post_record(
        &self,
        path: &str,
        request: &CreateRecordRequest,
    ) -> Result<TransactionRecord, String> {
        let url = format!("{}/api/v1/{}", self.base_url, path);

        match Request::post(&url)
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<TransactionRecord>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(Self::error_message(&response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn delete_record(&self, path: &str, id: &str) -> Result<DeleteRecordResponse, String> {
        let url = format!("{}/api/v1/{}/{}", self.base_url, path, id);

        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<DeleteRecordResponse>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(Self::error_message(&response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Prefer the structured error body, fall back to raw text
    async fn error_message(response: &gloo::net::http::Response) -> String {
        if let Ok(body) = response.json::<ApiErrorBody>().await {
            return body.message;
        }
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
