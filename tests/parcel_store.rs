use parcel_tracker::{schema, Parcel, ParcelStore, Result, Status, StoreError};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rusqlite::Connection;
use std::collections::HashMap;
use tempfile::NamedTempFile;

fn test_parcel() -> Parcel {
    Parcel::new(1000, "test")
}

// Helper function to create an in-memory database for testing
fn create_test_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    schema::initialize(&conn)?;
    Ok(conn)
}

// Helper function to create a temporary file-based database, emptied and
// renumbered from 1
fn create_temp_db() -> Result<(Connection, NamedTempFile)> {
    let temp_file = NamedTempFile::new().unwrap();
    let conn = Connection::open(temp_file.path())?;
    schema::initialize(&conn)?;
    schema::truncate(&conn)?;
    Ok((conn, temp_file))
}

#[tokio::test]
async fn test_add_get_delete() {
    let conn = create_test_db().unwrap();
    test_add_get_delete_impl(&conn).unwrap();

    let (conn, _file) = create_temp_db().unwrap();
    test_add_get_delete_impl(&conn).unwrap();
}

fn test_add_get_delete_impl(conn: &Connection) -> Result<()> {
    let store = ParcelStore::new(conn);
    let mut parcel = test_parcel();

    let number = store.add(&parcel)?;
    assert_ne!(number, 0);

    let stored = store.get(number)?;
    parcel.number = number;
    assert_eq!(stored, parcel);

    store.delete(number)?;
    let err = store.get(number).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(n) if n == number));
    assert_eq!(store.get(number).unwrap_or_default(), Parcel::default());

    Ok(())
}

#[tokio::test]
async fn test_set_address() {
    test_set_address_impl().unwrap();
}

fn test_set_address_impl() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel())?;
    let before = store.get(number)?;

    let new_address = "new test address";
    assert_eq!(store.set_address(number, new_address)?, 1);

    let after = store.get(number)?;
    assert_eq!(after.address, new_address);
    assert_eq!(
        Parcel {
            address: before.address.clone(),
            ..after
        },
        before
    );

    Ok(())
}

#[tokio::test]
async fn test_guarded_writes_leave_row_unchanged() {
    test_guarded_writes_leave_row_unchanged_impl().unwrap();
}

fn test_guarded_writes_leave_row_unchanged_impl() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);

    for status in [Status::Sent, Status::Delivered] {
        let number = store.add(&test_parcel())?;
        store.set_status(number, status)?;
        let before = store.get(number)?;

        store.set_address(number, "somewhere else")?;
        assert_eq!(store.get(number)?, before);

        store.delete(number)?;
        assert_eq!(store.get(number)?, before);
    }

    Ok(())
}

#[tokio::test]
async fn test_set_status() {
    test_set_status_impl().unwrap();
}

fn test_set_status_impl() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel())?;
    let before = store.get(number)?;

    store.set_status(number, Status::Sent)?;

    let after = store.get(number)?;
    assert_eq!(after.status, Status::Sent);
    assert_eq!(
        Parcel {
            status: before.status,
            ..after
        },
        before
    );

    Ok(())
}

#[tokio::test]
async fn test_get_by_client() {
    let (conn, _file) = create_temp_db().unwrap();
    test_get_by_client_impl(&conn).unwrap();
}

fn test_get_by_client_impl(conn: &Connection) -> Result<()> {
    let store = ParcelStore::new(conn);
    let mut rng = StdRng::from_entropy();
    let client: i64 = rng.gen_range(0..10_000_000);

    // Parcels of other clients must not show up
    store.add(&Parcel::new(client + 1, "elsewhere"))?;
    store.add(&Parcel::new(client - 1, "elsewhere"))?;

    let mut added = HashMap::new();
    for address in ["first", "second", "third"] {
        let mut parcel = Parcel::new(client, address);
        parcel.number = store.add(&parcel)?;
        added.insert(parcel.number, parcel);
    }

    let stored = store.get_by_client(client)?;
    assert_eq!(stored.len(), 3);
    for parcel in stored {
        assert_eq!(added.get(&parcel.number), Some(&parcel));
    }

    Ok(())
}

#[tokio::test]
async fn test_numbering_scenario() {
    test_numbering_scenario_impl().unwrap();
}

fn test_numbering_scenario_impl() -> Result<()> {
    let (conn, _file) = create_temp_db()?;
    let store = ParcelStore::new(&conn);
    let parcel = Parcel::new(1000, "test").with_created_at("2024-01-01T00:00:00Z");

    let number = store.add(&parcel)?;
    assert_eq!(number, 1);
    assert_eq!(
        store.get(1)?,
        Parcel {
            number: 1,
            ..parcel.clone()
        }
    );

    store.delete(1)?;
    assert!(store.get(1).unwrap_err().is_not_found());

    // Deleted numbers are not reused until the table is truncated
    assert_eq!(store.add(&parcel)?, 2);
    schema::truncate(&conn)?;
    assert_eq!(store.add(&parcel)?, 1);

    Ok(())
}
