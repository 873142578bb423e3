#[cfg(test)]
mod tests {
    use tasknest::db::db::{Db, DB_FILE_NAME};
    use tasknest::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        temp_dir: TempDir,
    }

    impl MigrationTestContext {
        fn db_path(&self) -> std::path::PathBuf {
            self.temp_dir.path().join(DB_FILE_NAME)
        }
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            MigrationTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn table_exists(conn: &rusqlite::Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i32>(0),
        )
        .unwrap()
            > 0
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_automatically(ctx: &mut MigrationTestContext) {
        let db = Db::open(ctx.db_path()).unwrap();

        let version = get_db_version(&db.conn).unwrap();
        assert_eq!(version, MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());

        for table in ["users", "tasks", "tags", "task_tags", "categories"] {
            assert!(table_exists(&db.conn, table), "{}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let conn = Db::new_without_migrations(ctx.db_path()).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
        assert!(!table_exists(&conn, "tasks"));
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let mut conn = Db::new_without_migrations(ctx.db_path()).unwrap();
        let manager = MigrationManager::new();
        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        assert_eq!(history.len() as u32, manager.latest_version());
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
        assert_eq!(history[0].1, "create_users");
        assert!(manager.is_migration_applied(&conn, 2).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut conn = Db::new_without_migrations(ctx.db_path()).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version1 = get_db_version(&conn).unwrap();

        manager.run_migrations(&mut conn).unwrap();
        let version2 = get_db_version(&conn).unwrap();

        assert_eq!(version1, version2);
        assert_eq!(manager.get_migration_history(&conn).unwrap().len() as u32, version1);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_reopening_keeps_data(ctx: &mut MigrationTestContext) {
        {
            let db = Db::open(ctx.db_path()).unwrap();
            db.conn
                .execute("INSERT INTO users (email, password_hash) VALUES ('ana@example.com', 'x')", [])
                .unwrap();
        }
        let db = Db::open(ctx.db_path()).unwrap();
        let count: i32 = db.conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }
}
