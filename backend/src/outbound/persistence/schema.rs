//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Accounts that may own jokes.
    users (id) {
        id -> Uuid,
        username -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Stored jokes. Rows are never updated.
    jokes (id) {
        id -> Uuid,
        name -> Text,
        content -> Text,
        /// Owner; references `users.id` and cascades on user removal.
        jokester_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(jokes -> users (jokester_id));
diesel::allow_tables_to_appear_in_same_query!(jokes, users);
