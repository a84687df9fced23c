//! Embedded PostgreSQL helpers shared by integration tests.
//!
//! Suites that need a real database call [`shared_cluster`] and then create a
//! temporary database per test. When the cluster cannot start, setting
//! `SKIP_TEST_CLUSTER` turns the failure into a logged skip.

use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Process-wide embedded cluster, retrying transient bootstrap failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => return Err(error.to_string()),
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Drop the `users` table so later queries fail against a missing relation.
pub fn drop_users_table(database_url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| err.to_string())?;
    diesel::sql_query("DROP TABLE users")
        .execute(&mut conn)
        .map(|_| ())
        .map_err(|err| err.to_string())
}
