// Integration tests for the schema migrator
// Covers: declared-order schema creation, idempotent re-migration, and
// failure atomicity

use rusqlite::Connection;
use seedbed_core::schema::TableSchema;
use seedbed_store::datagen::RecordGenerator;
use seedbed_store::{migrate, query, seed};

fn setup_store() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn customers_schema() -> TableSchema {
    TableSchema::builder("customers")
        .increments("id")
        .string("name")
        .string("firstname")
        .nullable_date("birthdate")
        .timestamps()
        .build()
        .unwrap()
}

#[test]
fn test_migrate_on_fresh_store() {
    // Given: A fresh in-memory store
    let mut conn = setup_store();
    let schema = customers_schema();

    // When: The schema is applied
    migrate::apply(&mut conn, &schema).unwrap();

    // Then: The table carries exactly the declared columns, in order
    let columns = migrate::table_columns(&conn, "customers").unwrap();
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "name", "firstname", "birthdate", "created_at", "updated_at"]
    );

    assert!(columns[0].primary_key);
    assert_eq!(columns[0].sql_type, "INTEGER");
    assert!(columns[1].not_null, "name must be NOT NULL");
    assert!(columns[2].not_null, "firstname must be NOT NULL");
    assert!(!columns[3].not_null, "birthdate must be nullable");
    assert_eq!(columns[3].sql_type, "TEXT");
    assert!(columns[4].not_null);
    assert!(columns[5].not_null);

    // And: The table starts empty
    let rows = query::fetch_all(&conn, "customers").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_migrate_is_idempotent() {
    // Given: A migrated store with a few rows
    let mut conn = setup_store();
    let schema = customers_schema();
    migrate::apply(&mut conn, &schema).unwrap();

    let mut generator = RecordGenerator::new(Some(7));
    let report = seed::run(&conn, &schema, &mut generator, 3);
    assert_eq!(report.inserted, 4);

    let before = migrate::table_columns(&conn, "customers").unwrap();

    // When: The same schema is applied again
    migrate::apply(&mut conn, &schema).unwrap();

    // Then: The rows are gone and the schema is unchanged
    let rows = query::fetch_all(&conn, "customers").unwrap();
    assert!(rows.is_empty(), "re-migration must erase prior rows");

    let after = migrate::table_columns(&conn, "customers").unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_migrate_twice_then_seed_leaves_single_batch() {
    // Given: A store that was migrated and seeded once already
    let mut conn = setup_store();
    let schema = customers_schema();
    migrate::apply(&mut conn, &schema).unwrap();

    let mut generator = RecordGenerator::new(Some(11));
    seed::run(&conn, &schema, &mut generator, 5);

    // When: The schema is applied again and seeding runs again
    migrate::apply(&mut conn, &schema).unwrap();
    let report = seed::run(&conn, &schema, &mut generator, 5);

    // Then: Only the second batch's rows exist (6, not 11)
    assert_eq!(report.inserted, 6);
    let rows = query::fetch_all(&conn, "customers").unwrap();
    assert_eq!(rows.len(), 6);
}

#[test]
fn test_dropping_a_missing_table_is_not_an_error() {
    // Given: A fresh store with no customers table
    let mut conn = setup_store();

    // When/Then: Migration succeeds; the implicit drop is a no-op
    migrate::apply(&mut conn, &customers_schema()).unwrap();
}

#[test]
fn test_failed_migration_leaves_prior_state_intact() {
    // Given: A store where the table name is taken by a view
    let mut conn = setup_store();
    conn.execute_batch("CREATE VIEW customers AS SELECT 1 AS id")
        .unwrap();

    // When: Migration is attempted
    let result = migrate::apply(&mut conn, &customers_schema());

    // Then: It fails with a schema error and the view survives untouched
    let err = result.unwrap_err();
    assert_eq!(err.code(), "ERR_SCHEMA");

    let view_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'view' AND name = 'customers'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(view_count, 1, "the pre-existing view must survive");

    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'customers'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(table_count, 0, "no partially-created table may remain");
}

#[test]
fn test_table_columns_rejects_bad_identifier() {
    let conn = setup_store();
    let err = migrate::table_columns(&conn, "customers; DROP TABLE x").unwrap_err();
    assert_eq!(err.code(), "ERR_SCHEMA");
}
