//! Diesel table definitions.

diesel::table! {
    books (book_id) {
        book_id -> Uuid,
        language -> Text,
        artifact -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    chapters (chapter_id) {
        chapter_id -> Uuid,
        chapter_number -> Int4,
        chapter_title -> Text,
        language -> Text,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    generation_jobs (book_id) {
        book_id -> Uuid,
        language -> Text,
        mode -> Text,
        status -> Text,
        progress -> Int2,
        error_message -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    uploads (id) {
        id -> Uuid,
        kind -> Text,
        source_name -> Text,
        content -> Text,
        file_path -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(books, chapters, generation_jobs, uploads,);
