//! Embedded PostgreSQL for durable tier integration tests.
//!
//! Suites call [`temporary_database`] from a fixture and pass any failure to
//! [`handle_cluster_setup_failure`], which skips when `SKIP_TEST_CLUSTER` is
//! truthy and panics otherwise.

use pg_embedded_setup_unpriv::TemporaryDatabase;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: std::time::Duration = std::time::Duration::from_millis(500);

/// Whether `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip or fail a suite whose cluster could not be provisioned.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Keep `PG_PASSWORD` stable so a reused data directory still authenticates.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns threads; the shared
        // cluster singleton serialises the first call.
        unsafe {
            std::env::set_var("PG_PASSWORD", "portfolio_embedded_test");
        }
    }
}

/// Fresh, empty database on the process-wide embedded cluster.
pub fn temporary_database() -> Result<TemporaryDatabase, String> {
    ensure_stable_password();
    let mut attempt = 1;
    let cluster = loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(cluster) => break cluster,
            Err(err) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("embedded cluster attempt {attempt} failed: {err}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(err) => return Err(format!("start embedded cluster: {err}")),
        }
    };
    cluster
        .create_temporary_database()
        .map_err(|err| format!("create temporary database: {err:?}"))
}
