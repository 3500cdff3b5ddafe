use crate::error::ParseStatusError;
use chrono::{SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Delivery status of a parcel
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Registered,
    Sent,
    Delivered,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Registered => "registered",
            Status::Sent => "sent",
            Status::Delivered => "delivered",
        }
    }

    /// Next status in delivery order, `None` once delivered.
    pub fn next(&self) -> Option<Status> {
        match self {
            Status::Registered => Some(Status::Sent),
            Status::Sent => Some(Status::Delivered),
            Status::Delivered => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Status::Registered),
            "sent" => Ok(Status::Sent),
            "delivered" => Ok(Status::Delivered),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A tracked shipment.
///
/// `Parcel::default()` is the empty parcel: number and client zero, status
/// `registered`, blank address and timestamp.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Assigned by the store on insert; ignored by [`ParcelStore::add`](crate::store::ParcelStore::add).
    pub number: i64,
    pub client: i64,
    pub status: Status,
    pub address: String,
    /// RFC3339 timestamp in UTC.
    pub created_at: String,
}

impl Parcel {
    /// Create a registered parcel stamped with the current UTC time
    pub fn new(client: i64, address: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: Status::Registered,
            address: address.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parcel #{} for client {}: {}, address {:?}, created {}",
            self.number, self.client, self.status, self.address, self.created_at
        )
    }
}
