//! Skip policy for suites that depend on the embedded PostgreSQL cluster.
//!
//! Environments that cannot start the cluster may set `SKIP_TEST_CLUSTER`;
//! everywhere else a bootstrap failure fails the test loudly.

/// Whether `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns `None` with a skip marker when skipping is allowed, otherwise panics.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
