//! Classification of database errors.

/// Returns true if `e` is a unique-constraint violation on `links.url`.
///
/// SQLite does not report constraint names, so the column is matched in the
/// error message (`UNIQUE constraint failed: links.url`).
pub fn is_unique_violation_on_url(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.message().contains("links.url")
}
