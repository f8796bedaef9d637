//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Aggregating reads use
//! `sql_query` and do not rely on these definitions; single-row writes and
//! plain lookups do.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        /// Unique (`users_email_key`).
        email -> Varchar,
        hashed_password -> Text,
        registered_at -> Timestamptz,
    }
}

diesel::table! {
    /// Public profiles, keyed by the owning user's id.
    profiles (user_id) {
        user_id -> Int8,
        display_name -> Text,
        /// Unique (`profiles_tag_name_key`).
        tag_name -> Varchar,
        picture_path -> Text,
        background_path -> Text,
    }
}

diesel::table! {
    posts (id) {
        id -> Int8,
        owner_id -> Int8,
        title -> Text,
        description -> Text,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    comments (id) {
        id -> Int8,
        post_id -> Int8,
        user_id -> Int8,
        content -> Text,
    }
}

diesel::table! {
    post_likes (liker_id, post_id) {
        liker_id -> Int8,
        post_id -> Int8,
    }
}

diesel::table! {
    comment_likes (liker_id, comment_id) {
        liker_id -> Int8,
        comment_id -> Int8,
    }
}

diesel::table! {
    follows (follower_id, followed_id) {
        follower_id -> Int8,
        followed_id -> Int8,
        followed_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(posts -> profiles (owner_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(post_likes -> posts (post_id));
diesel::joinable!(comment_likes -> comments (comment_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    profiles,
    posts,
    comments,
    post_likes,
    comment_likes,
    follows,
);
