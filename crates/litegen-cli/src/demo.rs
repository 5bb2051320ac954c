//! Walkthrough of the statement generators against a real database.
//!
//! Each step prints the generated SQL and binds, runs it, then dumps the
//! table so the effect is visible.

use crate::output::{print_banner, print_done, print_header, print_info, print_success};
use litegen::{
    AUTO_INCREMENT, Database, Executor, INTEGER, PRIMARY_KEY, Statement, TEXT, columns,
    conditions, values,
};

const TABLE: &str = "table_name";

fn show(stmt: &Statement) {
    let binds: Vec<String> = stmt.binds().iter().map(|v| format!("{v:?}")).collect();
    print_info(&format!("{stmt}  [{}]", binds.join(", ")));
}

fn step(db: &Database, title: &str, stmt: litegen::LiteResult<Statement>) -> anyhow::Result<()> {
    let stmt = stmt?;
    print_header(title);
    show(&stmt);
    let changed = db.execute(&stmt)?;
    print_success(&format!("{changed} row(s) affected"));
    dump(db)
}

fn dump(db: &Database) -> anyhow::Result<()> {
    db.dump_table(TABLE, &mut std::io::stdout().lock())?;
    Ok(())
}

fn report_exists(db: &Database) -> anyhow::Result<()> {
    if db.table_exists(TABLE)? {
        print_success("table exists");
    } else {
        print_success("table does not exist");
    }
    Ok(())
}

pub fn run(db: &Database) -> anyhow::Result<()> {
    print_banner("litegen walkthrough");
    print_info(&format!("database: {}", db.name()));

    // a previous run may have been interrupted
    db.drop_table(TABLE)?;

    let create = litegen::create_table(
        TABLE,
        &columns!["id", INTEGER, PRIMARY_KEY, AUTO_INCREMENT, "value", TEXT],
    )?;
    print_header("CREATE");
    show(&create);
    db.execute(&create)?;
    report_exists(db)?;
    dump(db)?;

    step(db, "INSERT id=0", litegen::insert(TABLE, &values!["id", "value", 0, "a"]))?;
    step(db, "INSERT", litegen::insert(TABLE, &values!["value", "b"]))?;
    step(db, "INSERT", litegen::insert_pairs(TABLE, [("value", "c")]))?;
    step(
        db,
        "UPDATE WHERE id=0",
        litegen::update(TABLE, &values!["value", "d"], "id", 0),
    )?;
    step(
        db,
        "UPDATE WHERE id>0",
        litegen::update_where(TABLE, &conditions![("id", ">", 0)]?, &values!["value", "e"]),
    )?;

    print_header("SELECT WHERE id>0");
    let select = litegen::select(TABLE, &["id", "value"], &conditions![("id", ">", 0)]?)?;
    show(&select);
    for row in db.query(&select)? {
        let id: i64 = row.try_get("id")?;
        let value: String = row.try_get("value")?;
        println!("  id: {id}\tvalue: {value}");
    }

    step(db, "DELETE WHERE id=2", litegen::delete(TABLE, "id", "=", 2))?;

    print_header("DROP");
    let drop = litegen::drop_table(TABLE)?;
    show(&drop);
    db.execute(&drop)?;
    report_exists(db)?;

    print_done();
    Ok(())
}
