use std::sync::atomic::AtomicU32;
use std::{env, thread};

use deadpool_diesel::postgres::Pool;
use diesel::{sql_query, Connection, PgConnection, RunQueryDsl};
use orm::migrations::run_migrations;

static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Disposable Postgres database, dropped together with the value.
pub struct TestDb {
    default_db_url: String,
    name: String,
    pool: Pool,
}

impl TestDb {
    pub fn new() -> Self {
        let name = format!(
            "test_db_{}_{}",
            std::process::id(),
            TEST_DB_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
        );
        let default_db_url =
            env::var("DATABASE_URL_TEST").expect("DATABASE_URL_TEST not set");
        let mut conn = PgConnection::establish(&default_db_url).unwrap();

        sql_query(format!("CREATE DATABASE {};", name))
            .execute(&mut conn)
            .expect("Failed to create test db");

        let db_path = format!("{}/{}", default_db_url, name);

        let pool_manager = deadpool_diesel::Manager::new(
            db_path,
            deadpool_diesel::Runtime::Tokio1,
        );

        let pool = Pool::builder(pool_manager)
            .max_size(4)
            .build()
            .expect("Failed to build Postgres db pool");

        Self {
            default_db_url: default_db_url.to_string(),
            name,
            pool,
        }
    }

    /// Pool over a migrated database.
    pub async fn migrated_pool(&self) -> Pool {
        let conn = self.pool.get().await.expect("Failed to get connection");
        run_migrations(&conn)
            .await
            .expect("Should be able to run migrations");
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!("TestDb leaking database {}", self.name);
            return;
        }
        let mut conn = PgConnection::establish(&self.default_db_url)
            .expect("Failed to connect to default db");
        sql_query(format!(
            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE \
             datname = '{}'",
            self.name
        ))
        .execute(&mut conn)
        .expect("Failed to terminate connections to test db");
        sql_query(format!("DROP DATABASE {}", self.name))
            .execute(&mut conn)
            .expect("Failed to drop test db");
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}
