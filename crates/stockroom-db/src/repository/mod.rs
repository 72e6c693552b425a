//! # Repository Module
//!
//! Typed access to entities kept in a schema-less store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │                                                                 │
//! │       │  catalog.products().add(&tea)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── add(&self, product)     → id                                      │
//! │  ├── get(&self, id)          → Product                                 │
//! │  ├── update(&self, product)                                            │
//! │  └── remove(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  collection_exists / element_exists / insert_element / ...      │
//! │       ▼                                                                 │
//! │  dyn Store (MemoryStore, RedisStore)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product add/get/update/remove

pub mod product;
