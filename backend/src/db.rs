use anyhow::Result;
use shared::{TransactionKind, TransactionRecord};
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:expense_tracker.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Store a record. The id is the primary key, so re-inserting an
    /// existing record replaces it.
    pub async fn insert_record(&self, kind: TransactionKind, record: &TransactionRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO records
                (id, kind, title, amount, date, category, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(kind.as_str())
        .bind(&record.title)
        .bind(record.amount)
        .bind(&record.date)
        .bind(&record.category)
        .bind(&record.description)
        .bind(&record.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// List all records of one kind, newest first
    pub async fn list_records(&self, kind: TransactionKind) -> Result<Vec<TransactionRecord>> {
        let rows = sqlx::query(
            "SELECT id, title, amount, date, category, description, created_at
             FROM records WHERE kind = ? ORDER BY created_at DESC",
        )
        .bind(kind.as_str())
        .fetch_all(&*self.pool)
        .await?;

        let records = rows.iter().map(Self::row_to_record).collect();
        Ok(records)
    }

    /// Retrieve a single record by its id, regardless of kind
    pub async fn get_record(&self, id: &str) -> Result<Option<TransactionRecord>> {
        let row = sqlx::query(
            "SELECT id, title, amount, date, category, description, created_at
             FROM records WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_record))
    }

    /// Delete a record by id within one kind. Returns whether a row was
    /// actually removed.
    pub async fn delete_record(&self, kind: TransactionKind, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = ? AND kind = ?")
            .bind(id)
            .bind(kind.as_str())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> TransactionRecord {
        TransactionRecord {
            id: row.get("id"),
            title: row.get("title"),
            amount: row.get("amount"),
            date: row.get("date"),
            category: row.get("category"),
            description: row.get("description"),
            created_at: row.get("created_at"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Setup a new test database for each test
    async fn setup_test() -> DbConnection {
        DbConnection::init_test().await.expect("Failed to create test database")
    }

    fn sample_record(id: &str, created_at: &str) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            title: "Salary".to_string(),
            amount: 1200.0,
            date: "2024-04-01".to_string(),
            category: "work".to_string(),
            description: "April salary".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_records() {
        let db = setup_test().await;

        let record = sample_record("record::income::1", "2024-04-01T10:00:00Z");
        db.insert_record(TransactionKind::Income, &record)
            .await
            .expect("Failed to insert record");

        let incomes = db.list_records(TransactionKind::Income).await.expect("Failed to list");
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0], record);

        // Kinds are separate ledgers
        let expenses = db.list_records(TransactionKind::Expense).await.expect("Failed to list");
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_list_records_newest_first() {
        let db = setup_test().await;

        let older = sample_record("record::income::1", "2024-04-01T10:00:00Z");
        let newer = sample_record("record::income::2", "2024-04-02T10:00:00Z");
        db.insert_record(TransactionKind::Income, &older).await.unwrap();
        db.insert_record(TransactionKind::Income, &newer).await.unwrap();

        let incomes = db.list_records(TransactionKind::Income).await.unwrap();
        assert_eq!(incomes[0].id, "record::income::2");
        assert_eq!(incomes[1].id, "record::income::1");
    }

    #[tokio::test]
    async fn test_get_record() {
        let db = setup_test().await;

        let record = sample_record("record::expense::7", "2024-04-03T10:00:00Z");
        db.insert_record(TransactionKind::Expense, &record).await.unwrap();

        let found = db.get_record("record::expense::7").await.unwrap();
        assert_eq!(found, Some(record));

        let missing = db.get_record("record::expense::8").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_record() {
        let db = setup_test().await;

        let record = sample_record("record::income::3", "2024-04-04T10:00:00Z");
        db.insert_record(TransactionKind::Income, &record).await.unwrap();

        // Deleting under the wrong kind leaves the record alone
        let wrong_kind = db.delete_record(TransactionKind::Expense, &record.id).await.unwrap();
        assert!(!wrong_kind);

        let deleted = db.delete_record(TransactionKind::Income, &record.id).await.unwrap();
        assert!(deleted);

        let deleted_again = db.delete_record(TransactionKind::Income, &record.id).await.unwrap();
        assert!(!deleted_again, "Record should not exist to be deleted");
    }
}
