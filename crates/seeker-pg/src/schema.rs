/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL for table creation and indexing. All methods
/// return `&'static str` so implementors can build them with
/// `const_format::concatcp!`.
///
/// This trait contains no I/O; [`crate::migrate`] executes it.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement(s).
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}
