//! SQLite persistence for tracking shipping parcels.
//!
//! # Intention
//!
//! - Provide record-level CRUD over the `parcel` table through [`ParcelStore`].
//! - Keep connection lifecycle with the caller: the store only borrows an open
//!   [`rusqlite::Connection`].
//!
//! # Architectural Boundaries
//!
//! - `store` writes what it is told, guarding address changes and deletes on
//!   the `registered` status and nothing else.
//! - Status ordering belongs to callers such as [`ParcelService`].
//! - `schema` and `config` are conveniences for callers and tests; the store
//!   does not depend on them.

pub mod config;
pub mod error;
pub mod parcel;
pub mod schema;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use error::{ParseStatusError, Result, StoreError};
pub use parcel::{Parcel, Status};
pub use service::ParcelService;
pub use store::ParcelStore;
