//! SQLite schema for the inventory database.

/// Schema version recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Idempotent schema creation, run on every open.
pub const CREATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE COLLATE NOCASE,
        category TEXT,
        quantity INTEGER NOT NULL DEFAULT 0,
        unit_price TEXT,
        supplier TEXT,
        supplier_contact TEXT,
        date_added TEXT NOT NULL,
        minimum_stock INTEGER NOT NULL DEFAULT 0,
        barcode TEXT,
        location TEXT
    );

    -- Append-only log of quantity changes
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id INTEGER NOT NULL,
        transaction_type TEXT NOT NULL
            CHECK (transaction_type IN ('IN', 'OUT', 'ADJUSTMENT')),
        quantity INTEGER NOT NULL,
        transaction_date TEXT NOT NULL,
        notes TEXT,
        user_name TEXT,

        FOREIGN KEY (item_id) REFERENCES items(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS transactions_item_id
    ON transactions (item_id);

    CREATE INDEX IF NOT EXISTS transactions_date
    ON transactions (transaction_date);
"#;
