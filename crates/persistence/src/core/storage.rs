//! Storage traits for withholding records and user accounts.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{
    IslrKey, IslrRecord, ListingQuery, NewUser, RivaKey, RivaRecord, TablePage, User,
};

/// Read access to the withholding tables.
///
/// The listing methods apply the query's filter, sort and pagination to a
/// single table. Merging the two tables is done by
/// [`list_retentions`](crate::core::list_retentions).
///
/// # Example
///
/// ```ignore
/// use retenciones_persistence::core::RetentionStore;
/// use retenciones_persistence::types::{IslrKey, ListingQuery};
///
/// async fn example<S: RetentionStore>(store: &S) -> Result<(), StorageError> {
///     let page = store.list_islr(&ListingQuery::new()).await?;
///     println!("{} of {} rows", page.rows.len(), page.total);
///
///     let key = IslrKey {
///         rif: "J-123".into(),
///         nro_factura: "100".into(),
///         nro_retencion: "200".into(),
///     };
///     let record = store.find_islr(&key).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RetentionStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Lists one page of `dp_islr` plus the filtered row count.
    async fn list_islr(&self, query: &ListingQuery) -> StorageResult<TablePage<IslrRecord>>;

    /// Lists one page of `dp_riva` plus the filtered row count.
    async fn list_riva(&self, query: &ListingQuery) -> StorageResult<TablePage<RivaRecord>>;

    /// Fetches one ISLR record by exact natural key.
    async fn find_islr(&self, key: &IslrKey) -> StorageResult<Option<IslrRecord>>;

    /// Fetches one RIVA record by exact natural key.
    async fn find_riva(&self, key: &RivaKey) -> StorageResult<Option<RivaRecord>>;

    /// Verifies the store answers queries.
    async fn health_check(&self) -> StorageResult<()>;
}

/// Access to the `usuarios` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by login name.
    async fn find_user(&self, username: &str) -> StorageResult<Option<User>>;

    /// Returns true if any user has the given username or RIF.
    async fn user_exists(&self, username: &str, rif: &str) -> StorageResult<bool>;

    /// Inserts a new user.
    ///
    /// Fails with [`RecordError::UserExists`](crate::error::RecordError::UserExists)
    /// when the username or RIF is taken.
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;
}
