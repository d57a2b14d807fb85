//! Embedded PostgreSQL provisioning for the Diesel adapter suites.
//!
//! One cluster is shared per test binary. The schema is applied once to a
//! template database through the crate's own migration runner, and every test
//! gets a fresh database cloned from that template.

use std::sync::{Mutex, OnceLock};

use exercise_tracker::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;
use uuid::Uuid;

const TEMPLATE_NAME: &str = "exercise_tracker_template";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Ensures `PG_PASSWORD` is stable so a reused data directory keeps accepting
/// the password it was initialised with.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "exercise_tracker_embedded_test");
        }
    }
}

/// Returns the cluster shared by every test in this binary.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("embedded cluster bootstrap: {err:?}"))
}

/// Creates the migrated template on first use.
fn ensure_template_database(cluster: &ClusterHandle, runtime: &Runtime) -> Result<(), String> {
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(TEMPLATE_NAME)
        .map_err(|err| format!("template check: {err:?}"))?;
    if exists {
        return Ok(());
    }

    cluster
        .create_database(TEMPLATE_NAME)
        .map_err(|err| format!("create template: {err:?}"))?;
    let url = cluster.connection().database_url(TEMPLATE_NAME);
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrate template: {err}"))
}

/// Provisions a fresh database with the schema applied.
///
/// The returned handle drops the database when it goes out of scope.
pub fn provision_migrated_database(
    cluster: &ClusterHandle,
    runtime: &Runtime,
) -> Result<TemporaryDatabase, String> {
    ensure_template_database(cluster, runtime)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(name.as_str(), TEMPLATE_NAME)
        .map_err(|err| format!("create database from template: {err:?}"))
}
