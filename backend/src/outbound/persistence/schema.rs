//! Diesel table definitions for the durable capture tier.
//!
//! The table is created by [`super::bootstrap::BOOTSTRAP_SQL`] when the tier
//! connects; keep both in step.

diesel::table! {
    cv_requests (id) {
        id -> Int4,
        #[max_length = 255]
        email -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
