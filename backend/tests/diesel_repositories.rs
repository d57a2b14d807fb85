//! Diesel adapters against an embedded PostgreSQL database.
//!
//! Each test runs on a fresh database cloned from a migrated template, so the
//! embedded migrations are exercised too. The tests stay synchronous and drive
//! the repositories through a per-test Tokio runtime.

use chrono::NaiveDate;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use exercise_tracker::domain::ports::{
    ExerciseLogRepository, UserPersistenceError, UserRepository,
};
use exercise_tracker::domain::{
    Description, ExerciseDuration, NewExerciseEntry, User, UserId, Username,
};
use exercise_tracker::outbound::persistence::{
    DbPool, DieselExerciseLogRepository, DieselUserRepository, PoolConfig,
};

mod support;

use support::{handle_cluster_setup_failure, provision_migrated_database, shared_cluster};

struct Store {
    runtime: Runtime,
    users: DieselUserRepository,
    logs: DieselExerciseLogRepository,
    _database: TemporaryDatabase,
}

fn setup_store() -> Result<Store, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_migrated_database(cluster, &runtime)?;

    let config = PoolConfig::new(database.url())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(Store {
        runtime,
        users: DieselUserRepository::new(pool.clone()),
        logs: DieselExerciseLogRepository::new(pool),
        _database: database,
    })
}

#[fixture]
fn store() -> Option<Store> {
    assert!(
        tokio::runtime::Handle::try_current().is_err(),
        "database fixtures must be built outside a Tokio runtime"
    );
    match setup_store() {
        Ok(store) => Some(store),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn user(id: &str, name: &str) -> User {
    User::try_from_strings(id, name).expect("fixture user is valid")
}

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).expect("fixture date")
}

fn entry(user_id: &str, description: &str, duration: f64, date: NaiveDate) -> NewExerciseEntry {
    NewExerciseEntry {
        user_id: UserId::new(user_id).expect("fixture id"),
        description: Description::new(description).expect("fixture description"),
        duration: ExerciseDuration::new(duration).expect("fixture duration"),
        date,
    }
}

#[rstest]
fn inserted_users_are_found_by_id_and_name(store: Option<Store>) {
    let Some(store) = store else { return };
    let alice = user("Ab3_9-xYz", "alice");

    store
        .runtime
        .block_on(store.users.insert(&alice))
        .expect("insert succeeds");

    let by_id = store
        .runtime
        .block_on(store.users.find_by_id(alice.id()))
        .expect("lookup by id");
    assert_eq!(by_id, Some(alice.clone()));

    let name = Username::new("ALICE").expect("valid username");
    let by_name = store
        .runtime
        .block_on(store.users.find_by_username(&name))
        .expect("lookup by name");
    assert_eq!(by_name, Some(alice));

    let unknown = UserId::new("nosuchid1").expect("valid id");
    let missing = store
        .runtime
        .block_on(store.users.find_by_id(&unknown))
        .expect("lookup of unknown id");
    assert_eq!(missing, None);
}

#[rstest]
fn users_are_listed_in_registration_order(store: Option<Store>) {
    let Some(store) = store else { return };
    for (id, name) in [("first0001", "first"), ("second002", "second")] {
        store
            .runtime
            .block_on(store.users.insert(&user(id, name)))
            .expect("insert succeeds");
    }

    let users = store
        .runtime
        .block_on(store.users.list())
        .expect("list succeeds");
    let names: Vec<_> = users.iter().map(|u| u.username().as_ref()).collect();
    assert_eq!(names, ["first", "second"]);
}

#[rstest]
fn a_taken_username_is_reported_as_a_duplicate(store: Option<Store>) {
    let Some(store) = store else { return };
    store
        .runtime
        .block_on(store.users.insert(&user("Ab3_9-xYz", "alice")))
        .expect("first insert succeeds");

    let err = store
        .runtime
        .block_on(store.users.insert(&user("Zz9_8-wVu", "alice")))
        .expect_err("second insert is rejected");

    assert!(
        matches!(err, UserPersistenceError::DuplicateUsername { ref username } if username == "alice"),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn an_id_clash_is_a_query_failure_not_a_duplicate_name(store: Option<Store>) {
    let Some(store) = store else { return };
    store
        .runtime
        .block_on(store.users.insert(&user("Ab3_9-xYz", "alice")))
        .expect("first insert succeeds");

    let err = store
        .runtime
        .block_on(store.users.insert(&user("Ab3_9-xYz", "bob")))
        .expect_err("id clash is rejected");

    assert!(
        matches!(err, UserPersistenceError::Query { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn date_bounds_are_exclusive_and_scoped_to_the_user(store: Option<Store>) {
    let Some(store) = store else { return };
    let owner = "Ab3_9-xYz";
    for (description, duration, date) in [
        ("swim", 45.0, day(5, 1)),
        ("bike", 60.0, day(5, 10)),
        ("run", 30.0, day(5, 20)),
    ] {
        store
            .runtime
            .block_on(store.logs.append(&entry(owner, description, duration, date)))
            .expect("append succeeds");
    }
    store
        .runtime
        .block_on(store.logs.append(&entry("Zz9_8-wVu", "row", 20.0, day(5, 10))))
        .expect("append for another user succeeds");

    let owner_id = UserId::new(owner).expect("valid id");
    let windowed = store
        .runtime
        .block_on(
            store
                .logs
                .query_range(&owner_id, Some(day(5, 1)), Some(day(5, 20))),
        )
        .expect("windowed query");
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0].date(), day(5, 10));
    assert_eq!(windowed[0].description().as_ref(), "bike");
    assert_eq!(windowed[0].duration().value(), 60.0);

    let everything = store
        .runtime
        .block_on(store.logs.query_range(&owner_id, None, None))
        .expect("unbounded query");
    let dates: Vec<_> = everything.iter().map(|e| e.date()).collect();
    assert_eq!(dates, [day(5, 1), day(5, 10), day(5, 20)]);
    assert!(everything.iter().all(|e| e.user_id() == &owner_id));
}
