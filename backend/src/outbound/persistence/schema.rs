//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; `diesel print-schema` against a
//! migrated database regenerates this file.

diesel::table! {
    /// Registered users. `username` is stored lowercase and is unique.
    users (id) {
        id -> Varchar,
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only exercise log. Indexed on `(user_id, date)`.
    exercise_logs (id) {
        /// Insertion sequence; breaks date ties in store order.
        id -> Int8,
        user_id -> Varchar,
        description -> Text,
        duration -> Float8,
        date -> Date,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, exercise_logs);
