mod cli;
mod demo;
mod output;

use litegen::Database;
use output::{print_field, print_header};

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    tracing::debug!(target: "litegen_cli", command = ?cmd, "dispatching");
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Demo(db_args) => {
            let db = Database::open(&db_args.load_config()?)?;
            demo::run(&db)
        }
        cli::Command::Dump(args) => dump(&args),
        cli::Command::Path(db_args) => path(&db_args),
    }
}

fn dump(args: &cli::DumpArgs) -> anyhow::Result<()> {
    let db = Database::open(&args.db.load_config()?)?;
    if !db.table_exists(&args.table)? {
        anyhow::bail!("no such table: {}", args.table);
    }

    if args.json {
        for row in db.select(&args.table, &[], &[])? {
            println!("{}", serde_json::to_string(&row)?);
        }
    } else {
        db.dump_table(&args.table, &mut std::io::stdout().lock())?;
    }
    Ok(())
}

fn path(db_args: &cli::DbArgs) -> anyhow::Result<()> {
    let location = db_args.load_config()?.location()?;
    let full_path = location.full_path();

    tracing::debug!(
        target: "litegen_cli",
        path = %full_path.display(),
        "resolved database location"
    );
    print_header("Database location");
    print_field("name", location.name());
    print_field("dir", &location.dir().display().to_string());
    print_field("path", &full_path.display().to_string());
    print_field("exists", if full_path.exists() { "yes" } else { "no" });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("litegen")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn demo_then_dump_on_file_database() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("demo.db3");
        let db_flag = format!("--db={}", db_path.display());

        run(args(&["demo", &db_flag])).unwrap();
        assert!(db_path.exists());

        let err = run(args(&["dump", "table_name", &db_flag])).unwrap_err();
        assert!(err.to_string().contains("no such table"));

        let config = litegen::DatabaseConfig::new().with_name(db_path.to_string_lossy());
        let db = Database::open(&config).unwrap();
        db.execute_batch("CREATE TABLE kept (id INTEGER)").unwrap();
        drop(db);
        run(args(&["dump", "kept", "--json", &db_flag])).unwrap();
        run(args(&["path", &db_flag])).unwrap();
    }

    #[test]
    fn help_needs_no_database() {
        run(args(&[])).unwrap();
        run(args(&["dump", "--help"])).unwrap();
    }
}
