use litegen::{
    AUTO_INCREMENT, BLOB, Condition, Database, DatabaseConfig, Executor, FixedDir, INTEGER,
    LiteError, MutationBuilder, PRIMARY_KEY, QueryBuilder, SqlBuilder, Statement, TEXT, Value,
    columns, conditions, values,
};

fn schema(db: &Database) {
    db.create_table(
        "test3",
        &columns!["id", INTEGER, PRIMARY_KEY, AUTO_INCREMENT, "val", TEXT, "val2", BLOB],
    )
    .unwrap();
}

fn ids(rows: &[litegen::Record]) -> Vec<i64> {
    rows.iter().map(|r| r.try_get::<i64>("id").unwrap()).collect()
}

#[test]
fn create_then_drop_round_trip() {
    let db = Database::open_in_memory().unwrap();
    assert!(!db.table_exists("test3").unwrap());

    schema(&db);
    assert!(db.table_exists("test3").unwrap());
    assert!(db.table_empty("test3").unwrap());

    db.drop_table("test3").unwrap();
    assert!(!db.table_exists("test3").unwrap());

    // IF EXISTS: dropping again is fine
    db.drop_table("test3").unwrap();
}

#[test]
fn walkthrough_insert_update_select_delete() {
    let db = Database::open_in_memory().unwrap();
    schema(&db);

    assert_eq!(db.insert("test3", &values!["val", "val2", "a", vec![1_u8, 2]]).unwrap(), 1);
    assert_eq!(db.insert("test3", &values!["val", "b"]).unwrap(), 1);
    assert_eq!(
        db.insert_pairs("test3", [("val", Value::from("c")), ("val2", Value::Null)])
            .unwrap(),
        1
    );
    assert_eq!(db.count("test3").unwrap(), 3);

    assert_eq!(db.update("test3", &values!["val", "B"], "id", 2).unwrap(), 1);
    let row = db.get("test3", "id", 2).unwrap().remove(0);
    assert_eq!(row.try_get::<String>("val").unwrap(), "B");
    assert_eq!(row.try_get_opt::<Vec<u8>>("val2").unwrap(), None);

    let first = db.get_column("test3", "val2", "id", 1).unwrap();
    assert_eq!(first[0].columns(), &["val2".to_string()]);
    assert_eq!(first[0].try_get::<Vec<u8>>("val2").unwrap(), vec![1, 2]);

    let conds = conditions![("id", ">", 1), ("id", "<", 3)].unwrap();
    let rows = db.select("test3", &["id", "val"], &conds).unwrap();
    assert_eq!(ids(&rows), vec![2]);

    assert_eq!(db.delete("test3", "id", "=", 1).unwrap(), 1);
    assert_eq!(ids(&db.select("test3", &[], &[]).unwrap()), vec![2, 3]);

    assert_eq!(db.delete_where("test3", &[]).unwrap(), 2);
    assert!(db.table_empty("test3").unwrap());
}

#[test]
fn update_where_applies_all_conditions() {
    let db = Database::open_in_memory().unwrap();
    schema(&db);
    for val in ["a", "b", "c", "d"] {
        db.insert("test3", &values!["val", val]).unwrap();
    }

    let conds = conditions![("id", ">=", 2), ("val", "!=", "c")].unwrap();
    let changed = db.update_where("test3", &conds, &values!["val2", vec![9_u8]]).unwrap();
    assert_eq!(changed, 2);

    let tagged = db
        .select("test3", &["id"], &[Condition::eq("val2", vec![9_u8]).unwrap()])
        .unwrap();
    assert_eq!(ids(&tagged), vec![2, 4]);
}

#[test]
fn like_and_exists() {
    let db = Database::open_in_memory().unwrap();
    schema(&db);
    db.insert("test3", &values!["val", "apple"]).unwrap();
    db.insert("test3", &values!["val", "it's"]).unwrap();

    let rows = db
        .select("test3", &[], &conditions![("val", "LIKE", "app%")].unwrap())
        .unwrap();
    assert_eq!(rows.len(), 1);

    // quotes in values are bound, not spliced
    assert!(db.exists("test3", "val", "it's").unwrap());
    assert!(!db.exists("test3", "val", "pear").unwrap());
}

#[test]
fn unique_violation_is_classified() {
    let db = Database::open_in_memory().unwrap();
    schema(&db);
    db.insert("test3", &values!["id", "val", 1, "a"]).unwrap();

    let err = db.insert("test3", &values!["id", "val", 1, "b"]).unwrap_err();
    assert!(err.is_unique_violation());
}

#[test]
fn storage_errors_propagate() {
    let db = Database::open_in_memory().unwrap();
    let err = db.select("missing", &[], &[]).unwrap_err();
    assert!(matches!(err, LiteError::Query(_)));
    assert!(!err.is_input_error());
}

#[test]
fn builders_run_through_database() {
    let db = Database::open_in_memory().unwrap();
    schema(&db);
    for val in ["a", "b", "c"] {
        db.insert("test3", &values!["val", val]).unwrap();
    }

    let mut qb = QueryBuilder::new("test3");
    qb.add_select("id").and_gt("id", 1);
    assert_eq!(ids(&qb.query(&db).unwrap()), vec![2, 3]);
    assert_eq!(qb.count(&db).unwrap(), 2);

    let mut delete = litegen::DeleteBuilder::new("test3");
    delete.and_eq("val", "c");
    assert_eq!(delete.execute(&db).unwrap(), 1);
    assert_eq!(db.count("test3").unwrap(), 2);
}

#[test]
fn raw_escape_hatch() {
    let db = Database::open_in_memory().unwrap();
    db.execute_batch("CREATE TABLE kv (k TEXT, v INTEGER); INSERT INTO kv VALUES ('a', 1);")
        .unwrap();

    let rows = db.query_sql("SELECT k, v FROM kv").unwrap();
    assert_eq!(rows[0].get("k"), Some(&Value::from("a")));

    let total = db
        .query_scalar(&Statement::raw("SELECT SUM(v) FROM kv"))
        .unwrap();
    assert_eq!(total, Value::Integer(1));
}

#[test]
fn records_serialize_to_json() {
    let db = Database::open_in_memory().unwrap();
    schema(&db);
    db.insert("test3", &values!["val", "a"]).unwrap();

    let rows = db.select("test3", &["id", "val"], &[]).unwrap();
    let json = serde_json::to_string(&rows).unwrap();
    assert_eq!(json, r#"[{"id":1,"val":"a"}]"#);
}

#[test]
fn file_database_in_configured_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("nested").join("data");
    let config = DatabaseConfig::new().with_name("unit").with_dir(&dir);

    let mut db = Database::open(&config).unwrap();
    assert_eq!(db.name(), "unit.db3");
    assert_eq!(db.dir_path(), Some(dir.as_path()));
    assert_eq!(db.full_path(), Some(dir.join("unit.db3")));
    schema(&db);
    db.insert("test3", &values!["val", "kept"]).unwrap();
    db.close().unwrap();
    assert!(matches!(db.count("test3"), Err(LiteError::NotConnected(_))));

    let reopened = Database::open_path(dir.join("unit.db3")).unwrap();
    assert_eq!(reopened.count("test3").unwrap(), 1);
}

#[test]
fn resolver_is_injectable() {
    let tmp = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new();
    let db = Database::open_with(&config, &FixedDir(tmp.path().to_path_buf())).unwrap();
    assert_eq!(db.full_path(), Some(tmp.path().join("data_base.db3")));
    assert!(tmp.path().join("data_base.db3").exists());
}

#[test]
fn read_only_database_rejects_writes() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("ro.db3");
    {
        let db = Database::open_path(&path).unwrap();
        schema(&db);
    }

    let config = DatabaseConfig::new()
        .with_name(path.to_string_lossy())
        .read_only();
    let db = Database::open(&config).unwrap();
    assert!(db.table_exists("test3").unwrap());
    assert!(db.insert("test3", &values!["val", "x"]).is_err());
}
