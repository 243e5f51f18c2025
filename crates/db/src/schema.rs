use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS operator_codes (
        id SERIAL PRIMARY KEY,
        operator_code SMALLINT NOT NULL UNIQUE CHECK (operator_code >= 0)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id SERIAL PRIMARY KEY,
        tag VARCHAR(100) NOT NULL UNIQUE
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        id SERIAL PRIMARY KEY,
        number VARCHAR(16) NOT NULL UNIQUE,
        operator_code_id INTEGER NOT NULL REFERENCES operator_codes(id) ON DELETE CASCADE,
        tag_id INTEGER NULL REFERENCES tags(id) ON DELETE SET NULL,
        timezone VARCHAR(32) NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notifications (
        id SERIAL PRIMARY KEY,
        text TEXT NOT NULL,
        start_datetime TIMESTAMP WITH TIME ZONE NOT NULL,
        finish_datetime TIMESTAMP WITH TIME ZONE NOT NULL,
        CONSTRAINT valid_schedule CHECK (finish_datetime > start_datetime)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notification_tags (
        notification_id INTEGER NOT NULL REFERENCES notifications(id) ON DELETE CASCADE,
        tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (notification_id, tag_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notification_operator_codes (
        notification_id INTEGER NOT NULL REFERENCES notifications(id) ON DELETE CASCADE,
        operator_code_id INTEGER NOT NULL REFERENCES operator_codes(id) ON DELETE CASCADE,
        PRIMARY KEY (notification_id, operator_code_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id SERIAL PRIMARY KEY,
        notification_id INTEGER NOT NULL REFERENCES notifications(id) ON DELETE CASCADE,
        client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
        created TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        status BOOLEAN NOT NULL DEFAULT FALSE
    );
    "#,
];

// Prepared statements take a single command, so each index is its own query.
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_clients_operator_code_id ON clients(operator_code_id);",
    "CREATE INDEX IF NOT EXISTS idx_clients_tag_id ON clients(tag_id);",
    "CREATE INDEX IF NOT EXISTS idx_notification_tags_tag_id ON notification_tags(tag_id);",
    "CREATE INDEX IF NOT EXISTS idx_notification_operator_codes_operator_code_id ON notification_operator_codes(operator_code_id);",
    "CREATE INDEX IF NOT EXISTS idx_messages_notification_id ON messages(notification_id);",
    "CREATE INDEX IF NOT EXISTS idx_messages_client_id ON messages(client_id);",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
