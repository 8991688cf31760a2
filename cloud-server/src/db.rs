//! Database module - PostgreSQL connection and migrations

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA_SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Evaluated submissions
CREATE TABLE IF NOT EXISTS submissions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    site_key_hash VARCHAR(64) NOT NULL,
    form_data JSONB NOT NULL,
    metadata JSONB NOT NULL,
    behavioral_data JSONB NOT NULL,
    detection JSONB NOT NULL,
    reasons JSONB NOT NULL,
    sales_score DOUBLE PRECISION NOT NULL,
    spam_score DOUBLE PRECISION NOT NULL,
    ai_reasoning TEXT,
    decision VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_submissions_site ON submissions(site_key_hash, created_at);
CREATE INDEX IF NOT EXISTS idx_submissions_decision ON submissions(decision)
"#;
