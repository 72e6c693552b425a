//! # Redis Store
//!
//! Collections kept in Redis, one hash per element.
//!
//! ## Key Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {prefix}:collections          SET    registered collection names      │
//! │  {prefix}:{collection}:seq     STRING last id handed out (INCR)        │
//! │  {prefix}:{collection}:{id}    HASH   element fields                   │
//! │                                                                         │
//! │  e.g. stockroom:collections    → { "products" }                        │
//! │       stockroom:products:seq   → "2"                                   │
//! │       stockroom:products:1     → { name: "Tea", price: "2.50", ... }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Writes
//! Id generation, insert and update each run as one Lua script, so the
//! registry / slot check and the write happen in a single round trip that no
//! other client can interleave with.
//!
//! ## Error Classification
//! I/O errors, refused or dropped connections and timeouts become
//! `StoreFailure::Connectivity`; every other Redis error becomes
//! `StoreFailure::Other`.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError, Script};
use stockroom_core::Fields;
use tracing::{debug, info};

use super::{Store, StoreFailure, StoreResult};

const NEXT_ID_IF_REGISTERED: &str = r"
if redis.call('SISMEMBER', KEYS[1], ARGV[1]) == 0 then
    return -1
end
return redis.call('INCR', KEYS[2])
";

const INSERT_IF_ABSENT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return 0
end
redis.call('HSET', KEYS[1], unpack(ARGV))
return 1
";

const REPLACE_IF_PRESENT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return 0
end
redis.call('DEL', KEYS[1])
redis.call('HSET', KEYS[1], unpack(ARGV))
return 1
";

/// Maps a Redis error onto the store outcome model.
pub fn classify(err: RedisError) -> StoreFailure {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StoreFailure::Connectivity(err.to_string())
    } else {
        StoreFailure::Other(err.to_string())
    }
}

/// Redis-backed [`Store`] implementation.
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
    sequence_script: Script,
    insert_script: Script,
    replace_script: Script,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connects to Redis and returns a store using `prefix` for every key.
    ///
    /// ## Arguments
    /// * `url` - Redis connection URL (e.g. `redis://localhost:6379/0`)
    /// * `prefix` - Namespace for all keys written by this store
    ///
    /// ## Errors
    /// * `StoreFailure::Connectivity` - server unreachable
    /// * `StoreFailure::Other` - malformed URL
    pub async fn connect(url: &str, prefix: impl Into<String>) -> StoreResult<Self> {
        let prefix = prefix.into();
        info!(prefix = %prefix, "Connecting to Redis store");

        let client = redis::Client::open(url).map_err(classify)?;
        let conn = ConnectionManager::new(client).await.map_err(classify)?;

        info!("Redis store connected");

        Ok(RedisStore {
            conn,
            prefix,
            sequence_script: Script::new(NEXT_ID_IF_REGISTERED),
            insert_script: Script::new(INSERT_IF_ABSENT),
            replace_script: Script::new(REPLACE_IF_PRESENT),
        })
    }

    /// Returns the key namespace.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn registry_key(&self) -> String {
        format!("{}:collections", self.prefix)
    }

    fn sequence_key(&self, collection: &str) -> String {
        format!("{}:{}:seq", self.prefix, collection)
    }

    fn element_key(&self, collection: &str, id: i64) -> String {
        format!("{}:{}:{}", self.prefix, collection, id)
    }

    async fn run_write(
        &self,
        script: &Script,
        key: &str,
        fields: &Fields,
    ) -> StoreResult<bool> {
        if fields.is_empty() {
            return Err(StoreFailure::other("cannot store an element with no fields"));
        }

        let mut invocation = script.prepare_invoke();
        invocation.key(key);
        for (field, value) in fields {
            invocation.arg(field).arg(value);
        }

        let mut conn = self.conn.clone();
        let written: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(classify)?;

        Ok(written == 1)
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn collection_exists(&self, collection: &str) -> StoreResult<bool> {
        debug!(collection = %collection, "SISMEMBER");
        let mut conn = self.conn.clone();
        conn.sismember(self.registry_key(), collection)
            .await
            .map_err(classify)
    }

    async fn create_collection(&self, collection: &str) -> StoreResult<()> {
        debug!(collection = %collection, "SADD");
        let mut conn = self.conn.clone();
        let _added: i64 = conn
            .sadd(self.registry_key(), collection)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn generate_id(&self, collection: &str) -> StoreResult<i64> {
        debug!(collection = %collection, "Next id");

        let mut invocation = self.sequence_script.prepare_invoke();
        invocation
            .key(self.registry_key())
            .key(self.sequence_key(collection))
            .arg(collection);

        let mut conn = self.conn.clone();
        let id: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(classify)?;

        // -1: collection not in the registry, nothing was incremented
        if id < 0 {
            return Err(StoreFailure::other(format!(
                "collection '{}' does not exist",
                collection
            )));
        }

        Ok(id)
    }

    async fn element_exists(&self, collection: &str, id: i64) -> StoreResult<bool> {
        debug!(collection = %collection, id, "EXISTS");
        let mut conn = self.conn.clone();
        conn.exists(self.element_key(collection, id))
            .await
            .map_err(classify)
    }

    async fn insert_element(
        &self,
        collection: &str,
        id: i64,
        fields: Fields,
    ) -> StoreResult<()> {
        debug!(collection = %collection, id, "Insert element");
        let key = self.element_key(collection, id);

        if !self.run_write(&self.insert_script, &key, &fields).await? {
            return Err(StoreFailure::other(format!(
                "element {} already exists in '{}'",
                id, collection
            )));
        }

        Ok(())
    }

    async fn get_element(&self, collection: &str, id: i64) -> StoreResult<Fields> {
        debug!(collection = %collection, id, "HGETALL");
        let mut conn = self.conn.clone();
        let fields: BTreeMap<String, String> = conn
            .hgetall(self.element_key(collection, id))
            .await
            .map_err(classify)?;

        // HGETALL answers an empty map for a missing key.
        if fields.is_empty() {
            return Err(StoreFailure::other(format!(
                "element {} not found in '{}'",
                id, collection
            )));
        }

        Ok(fields)
    }

    async fn update_element(
        &self,
        collection: &str,
        id: i64,
        fields: Fields,
    ) -> StoreResult<()> {
        debug!(collection = %collection, id, "Replace element");
        let key = self.element_key(collection, id);

        if !self.run_write(&self.replace_script, &key, &fields).await? {
            return Err(StoreFailure::other(format!(
                "element {} not found in '{}'",
                id, collection
            )));
        }

        Ok(())
    }

    async fn delete_element(&self, collection: &str, id: i64) -> StoreResult<()> {
        debug!(collection = %collection, id, "DEL");
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .del(self.element_key(collection, id))
            .await
            .map_err(classify)?;

        if removed == 0 {
            return Err(StoreFailure::other(format!(
                "element {} not found in '{}'",
                id, collection
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::repository::product::ProductRepository;
    use rust_decimal_macros::dec;
    use std::io;
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};
    use stockroom_core::Product;

    #[test]
    fn test_io_errors_are_connectivity() {
        let err = RedisError::from(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert!(classify(err).is_connectivity());
    }

    #[test]
    fn test_server_errors_are_other() {
        let err = RedisError::from((
            redis::ErrorKind::TypeError,
            "WRONGTYPE Operation against a key holding the wrong kind of value",
        ));
        assert!(!classify(err).is_connectivity());
    }

    #[test]
    fn test_invalid_url_is_not_connectivity() {
        let err = redis::Client::open("not a url").unwrap_err();
        assert!(!classify(err).is_connectivity());
    }

    // -------------------------------------------------------------------------
    // Live server tests: `cargo test -p stockroom-db -- --ignored`
    // Server from REDIS_URL (default redis://127.0.0.1:6379).
    // -------------------------------------------------------------------------

    fn fields(name: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), name.to_string());
        fields
    }

    /// Connects with a key prefix no other test run shares.
    async fn live_store() -> RedisStore {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let prefix = format!("stockroom-test:{}:{}", std::process::id(), nanos);

        RedisStore::connect(&url, prefix).await.unwrap()
    }

    async fn cleanup(store: &RedisStore) {
        let mut conn = store.conn.clone();
        let keys: Vec<String> = conn.keys(format!("{}:*", store.prefix())).await.unwrap();
        if !keys.is_empty() {
            let _: i64 = conn.del(keys).await.unwrap();
        }
    }

    #[tokio::test]
    #[ignore = "needs a Redis server"]
    async fn test_redis_ids_are_sequential_per_collection() {
        let store = live_store().await;
        store.create_collection("a").await.unwrap();
        store.create_collection("b").await.unwrap();
        // create-if-absent
        store.create_collection("a").await.unwrap();

        assert_eq!(store.generate_id("a").await.unwrap(), 1);
        assert_eq!(store.generate_id("a").await.unwrap(), 2);
        assert_eq!(store.generate_id("b").await.unwrap(), 1);

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore = "needs a Redis server"]
    async fn test_redis_generate_id_requires_collection() {
        let store = live_store().await;

        let err = store.generate_id("missing").await.unwrap_err();
        assert!(!err.is_connectivity());

        // the failed call must not have started a sequence
        store.create_collection("missing").await.unwrap();
        assert_eq!(store.generate_id("missing").await.unwrap(), 1);

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore = "needs a Redis server"]
    async fn test_redis_element_crud() {
        let store = live_store().await;
        store.create_collection("products").await.unwrap();

        store
            .insert_element("products", 1, fields("Chai"))
            .await
            .unwrap();
        assert!(store.element_exists("products", 1).await.unwrap());

        let err = store
            .insert_element("products", 1, fields("Chang"))
            .await
            .unwrap_err();
        assert!(!err.is_connectivity());
        assert_eq!(
            store.get_element("products", 1).await.unwrap()["name"],
            "Chai"
        );

        store
            .update_element("products", 1, fields("Chang"))
            .await
            .unwrap();
        assert_eq!(
            store.get_element("products", 1).await.unwrap()["name"],
            "Chang"
        );

        store.delete_element("products", 1).await.unwrap();
        assert!(!store.element_exists("products", 1).await.unwrap());

        for err in [
            store.delete_element("products", 1).await.unwrap_err(),
            store.get_element("products", 1).await.unwrap_err(),
            store
                .update_element("products", 1, fields("Chai"))
                .await
                .unwrap_err(),
        ] {
            assert!(!err.is_connectivity());
        }

        // a refused update must not create the element
        assert!(!store.element_exists("products", 1).await.unwrap());

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore = "needs a Redis server"]
    async fn test_redis_add_then_get() {
        let store = Arc::new(live_store().await);
        let repo = ProductRepository::new(store.clone(), "products");
        let tea = Product::new("Tea", "Beverages", dec!(2.50), 100);

        let id = repo.add(&tea).await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(repo.get(id).await.unwrap(), tea.with_id(id));

        repo.remove(id).await.unwrap();
        assert!(matches!(
            repo.get(id).await,
            Err(RepoError::ProductNotFound { id: 1 })
        ));

        cleanup(&store).await;
    }
}
