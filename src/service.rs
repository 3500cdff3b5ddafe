//! Caller-side workflow on top of [`ParcelStore`].
//!
//! The store writes whatever it is told; the ordering of statuses and the
//! reporting of blocked writes live here.

use crate::parcel::{Parcel, Status};
use crate::store::ParcelStore;
use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

pub struct ParcelService<'conn> {
    store: ParcelStore<'conn>,
}

impl<'conn> ParcelService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            store: ParcelStore::new(conn),
        }
    }

    pub fn store(&self) -> &ParcelStore<'conn> {
        &self.store
    }

    /// Register a new parcel for `client` and return it with its number set.
    pub fn register(&self, client: i64, address: &str) -> Result<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self
            .store
            .add(&parcel)
            .with_context(|| format!("failed to register parcel for client {client}"))?;
        info!(
            number = parcel.number,
            client,
            address,
            created_at = %parcel.created_at,
            "parcel registered"
        );
        Ok(parcel)
    }

    pub fn client_parcels(&self, client: i64) -> Result<Vec<Parcel>> {
        let parcels = self
            .store
            .get_by_client(client)
            .with_context(|| format!("failed to list parcels of client {client}"))?;
        for parcel in &parcels {
            info!(client, "{parcel}");
        }
        Ok(parcels)
    }

    /// Move a parcel one step along registered, sent, delivered.
    ///
    /// A delivered parcel stays delivered. Returns the status after the call.
    pub fn next_status(&self, number: i64) -> Result<Status> {
        let parcel = self
            .store
            .get(number)
            .with_context(|| format!("failed to load parcel {number}"))?;
        let Some(next) = parcel.status.next() else {
            info!(number, "parcel already delivered");
            return Ok(parcel.status);
        };
        self.store
            .set_status(number, next)
            .with_context(|| format!("failed to set status of parcel {number}"))?;
        info!(number, from = %parcel.status, to = %next, "parcel status changed");
        Ok(next)
    }

    /// Returns false when the parcel is missing or no longer registered.
    pub fn change_address(&self, number: i64, address: &str) -> Result<bool> {
        let rows = self
            .store
            .set_address(number, address)
            .with_context(|| format!("failed to change address of parcel {number}"))?;
        if rows == 0 {
            warn!(number, "address not changed, parcel missing or not registered");
        }
        Ok(rows > 0)
    }

    /// Returns false when the parcel is missing or no longer registered.
    pub fn delete(&self, number: i64) -> Result<bool> {
        let rows = self
            .store
            .delete(number)
            .with_context(|| format!("failed to delete parcel {number}"))?;
        if rows == 0 {
            warn!(number, "parcel not deleted, missing or not registered");
        }
        Ok(rows > 0)
    }
}
