use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Channel the swap table trigger publishes on.
pub const SWAP_CHANGES_CHANNEL: &str = "swap_requests_changed";

const STATEMENTS: &[&str] = &[
    // Create schedule_rows table
    r#"
    CREATE TABLE IF NOT EXISTS schedule_rows (
        week_start_date VARCHAR(10) NOT NULL,
        employee_code TEXT NOT NULL,
        sunday_shift TEXT NOT NULL DEFAULT '',
        monday_shift TEXT NOT NULL DEFAULT '',
        tuesday_shift TEXT NOT NULL DEFAULT '',
        wednesday_shift TEXT NOT NULL DEFAULT '',
        thursday_shift TEXT NOT NULL DEFAULT '',
        friday_shift TEXT NOT NULL DEFAULT '',
        saturday_shift TEXT NOT NULL DEFAULT '',
        display_order INTEGER NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        PRIMARY KEY (week_start_date, employee_code)
    );
    "#,
    // Create swap_requests table
    r#"
    CREATE TABLE IF NOT EXISTS swap_requests (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        date VARCHAR(10) NOT NULL,
        from_employee_code TEXT NOT NULL,
        to_employee_code TEXT NOT NULL,
        from_shift TEXT NOT NULL,
        to_shift TEXT NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'pending',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_swap_status
            CHECK (status IN ('pending', 'accepted', 'rejected', 'cancelled'))
    );
    "#,
    // Create notifications table
    r#"
    CREATE TABLE IF NOT EXISTS notifications (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id TEXT NOT NULL,
        message TEXT NOT NULL,
        kind VARCHAR(32) NOT NULL,
        related_swap_id UUID NULL REFERENCES swap_requests(id) ON DELETE CASCADE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    // Create user_roles table
    r#"
    CREATE TABLE IF NOT EXISTS user_roles (
        principal_id TEXT PRIMARY KEY,
        employee_code TEXT NULL UNIQUE,
        role VARCHAR(16) NOT NULL DEFAULT 'user',
        CONSTRAINT valid_role CHECK (role IN ('admin', 'user'))
    );
    "#,
    // Widen code columns on databases created with bounded VARCHARs
    r#"
    ALTER TABLE schedule_rows
        ALTER COLUMN employee_code TYPE TEXT,
        ALTER COLUMN sunday_shift TYPE TEXT,
        ALTER COLUMN monday_shift TYPE TEXT,
        ALTER COLUMN tuesday_shift TYPE TEXT,
        ALTER COLUMN wednesday_shift TYPE TEXT,
        ALTER COLUMN thursday_shift TYPE TEXT,
        ALTER COLUMN friday_shift TYPE TEXT,
        ALTER COLUMN saturday_shift TYPE TEXT;
    "#,
    r#"
    ALTER TABLE swap_requests
        ALTER COLUMN from_employee_code TYPE TEXT,
        ALTER COLUMN to_employee_code TYPE TEXT,
        ALTER COLUMN from_shift TYPE TEXT,
        ALTER COLUMN to_shift TYPE TEXT;
    "#,
    "ALTER TABLE notifications ALTER COLUMN user_id TYPE TEXT;",
    r#"
    ALTER TABLE user_roles
        ALTER COLUMN principal_id TYPE TEXT,
        ALTER COLUMN employee_code TYPE TEXT;
    "#,
    // Change feed for swap_requests
    r#"
    CREATE OR REPLACE FUNCTION notify_swap_requests_changed() RETURNS trigger AS $$
    BEGIN
        PERFORM pg_notify('swap_requests_changed', TG_OP);
        RETURN NULL;
    END;
    $$ LANGUAGE plpgsql;
    "#,
    "DROP TRIGGER IF EXISTS swap_requests_changed ON swap_requests;",
    r#"
    CREATE TRIGGER swap_requests_changed
        AFTER INSERT OR UPDATE OR DELETE ON swap_requests
        FOR EACH STATEMENT EXECUTE FUNCTION notify_swap_requests_changed();
    "#,
    // Create indexes
    "CREATE INDEX IF NOT EXISTS idx_schedule_rows_order ON schedule_rows(week_start_date, display_order);",
    "CREATE INDEX IF NOT EXISTS idx_swap_requests_date ON swap_requests(date);",
    "CREATE INDEX IF NOT EXISTS idx_swap_requests_created_at ON swap_requests(created_at DESC);",
    "CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id);",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
