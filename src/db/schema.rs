//! Database schema and migrations for vdrive.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - flat node table with the parent index
    r#"
-- Flat node table; the tree is derived from the parent_id index.
-- The virtual root folder is never stored here.
CREATE TABLE nodes (
    id          TEXT PRIMARY KEY,               -- UUID, assigned at creation
    parent_id   TEXT NOT NULL,                  -- 'root' for top-level nodes
    name        TEXT NOT NULL,
    is_folder   INTEGER NOT NULL DEFAULT 0,
    size        INTEGER NOT NULL DEFAULT 0,     -- bytes for files, 0 for folders
    mime_type   TEXT,                           -- NULL for folders
    created_at  INTEGER NOT NULL,               -- epoch milliseconds
    content     BLOB                            -- NULL for folders
);

CREATE INDEX idx_nodes_parent_id ON nodes(parent_id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_contains_nodes_table() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE nodes"));
        assert!(first.contains("parent_id"));
        assert!(first.contains("is_folder"));
        assert!(first.contains("content"));
    }

    #[test]
    fn test_first_migration_creates_parent_index() {
        assert!(MIGRATIONS[0].contains("CREATE INDEX idx_nodes_parent_id ON nodes(parent_id)"));
    }

    #[test]
    fn test_migrations_are_valid_sql() {
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
            assert!(
                migration.contains("CREATE TABLE")
                    || migration.contains("ALTER TABLE")
                    || migration.contains("CREATE INDEX")
            );
        }
    }
}
