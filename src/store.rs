use crate::error::{Result, StoreError};
use crate::parcel::{Parcel, Status};
use rusqlite::{named_params, Connection, Row};
use tracing::debug;

/// Data access over the `parcel` table.
///
/// The connection is borrowed: opening, schema setup and closing belong to
/// the caller. Every method runs a single statement.
///
/// Address changes and deletes only touch rows whose status is
/// `registered`. When that guard fails the call still succeeds and reports
/// zero affected rows.
pub struct ParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ParcelStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Insert a parcel and return the number the database assigned to it.
    /// `parcel.number` is ignored.
    pub fn add(&self, parcel: &Parcel) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at) \
             VALUES (:client, :status, :address, :created_at)",
            named_params! {
                ":client": parcel.client,
                ":status": parcel.status,
                ":address": parcel.address,
                ":created_at": parcel.created_at,
            },
        )?;
        let number = self.conn.last_insert_rowid();
        debug!(number, client = parcel.client, "parcel added");
        Ok(number)
    }

    /// Fetch one parcel by number, `StoreError::NotFound` if there is none.
    pub fn get(&self, number: i64) -> Result<Parcel> {
        self.conn
            .query_row(
                "SELECT number, client, status, address, created_at \
                 FROM parcel WHERE number = :number",
                named_params! { ":number": number },
                row_to_parcel,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(number),
                other => StoreError::Persistence(other),
            })
    }

    /// All parcels of a client, in no particular order.
    pub fn get_by_client(&self, client: i64) -> Result<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(
            "SELECT number, client, status, address, created_at \
             FROM parcel WHERE client = :client",
        )?;
        let parcels = stmt
            .query_map(named_params! { ":client": client }, row_to_parcel)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(client, count = parcels.len(), "parcels fetched by client");
        Ok(parcels)
    }

    /// Change the address of a registered parcel. Returns affected rows.
    pub fn set_address(&self, number: i64, address: &str) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE parcel SET address = :address \
             WHERE number = :number AND status = :registered",
            named_params! {
                ":address": address,
                ":number": number,
                ":registered": Status::Registered,
            },
        )?;
        debug!(number, rows, "parcel address updated");
        Ok(rows)
    }

    /// Write a status unconditionally. Returns affected rows.
    pub fn set_status(&self, number: i64, status: Status) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE parcel SET status = :status WHERE number = :number",
            named_params! { ":status": status, ":number": number },
        )?;
        debug!(number, %status, rows, "parcel status updated");
        Ok(rows)
    }

    /// Delete a registered parcel. Returns affected rows.
    pub fn delete(&self, number: i64) -> Result<usize> {
        let rows = self.conn.execute(
            "DELETE FROM parcel WHERE number = :number AND status = :registered",
            named_params! { ":number": number, ":registered": Status::Registered },
        )?;
        debug!(number, rows, "parcel deleted");
        Ok(rows)
    }
}

fn row_to_parcel(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get(0)?,
        client: row.get(1)?,
        status: row.get(2)?,
        address: row.get(3)?,
        created_at: row.get(4)?,
    })
}
