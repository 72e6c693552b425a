//! # stockroom-db: Store Access Layer for Stockroom
//!
//! Maps `Product` values onto a schema-less collection store and translates
//! store outcomes into a small set of repository errors.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Caller (seed binary, host application)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Catalog     │    │  Repository   │    │    Store     │  │   │
//! │  │   │ (catalog.rs)  │───►│ (product.rs)  │───►│   (trait)    │  │   │
//! │  │   │ StoreConfig   │    │ validate →    │    │ MemoryStore  │  │   │
//! │  │   │               │    │ check → act   │    │ RedisStore   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store capability trait and backends
//! - [`repository`] - Repository implementations
//! - [`catalog`] - Connected store handle
//! - [`config`] - Store configuration
//! - [`error`] - Repository error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Catalog, StoreConfig};
//!
//! let catalog = Catalog::connect(StoreConfig::load()?).await?;
//! let id = catalog.products().add(&product).await?;
//! let stored = catalog.products().get(id).await?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod repository;
pub mod store;

pub use catalog::Catalog;
pub use config::{Backend, StoreConfig};
pub use error::{RepoError, RepoResult};
pub use repository::product::ProductRepository;
pub use store::memory::MemoryStore;
pub use store::redis_store::RedisStore;
pub use store::{Store, StoreFailure, StoreOp, StoreResult};
