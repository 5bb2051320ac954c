use litegen::DatabaseConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Demo,
    Dump,
    Path,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Demo(DbArgs),
    Dump(DumpArgs),
    Path(DbArgs),
}

/// Options shared by every command that opens a database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbArgs {
    pub config: Option<PathBuf>,
    pub db: Option<String>,
}

impl DbArgs {
    /// Config file (or defaults), with `--db` overriding the name.
    pub fn load_config(&self) -> anyhow::Result<DatabaseConfig> {
        let mut config = match &self.config {
            Some(path) => DatabaseConfig::load(path)?,
            None => DatabaseConfig::default(),
        };
        if let Some(db) = &self.db {
            config.name = db.clone();
            config.validate()?;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpArgs {
    pub db: DbArgs,
    pub table: String,
    pub json: bool,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "demo" => parse_db_command(HelpTopic::Demo, it.map(|s| s.as_str())),
        "dump" => parse_dump(it.map(|s| s.as_str())),
        "path" => parse_db_command(HelpTopic::Path, it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

/// Try to consume `--config` / `--db` (both `--flag value` and
/// `--flag=value`). Returns `Ok(false)` for any other token.
fn parse_db_flag<'a>(
    token: &'a str,
    it: &mut impl Iterator<Item = &'a str>,
    db: &mut DbArgs,
) -> anyhow::Result<bool> {
    match token {
        "--config" => {
            let Some(v) = it.next() else {
                anyhow::bail!("--config requires a value");
            };
            db.config = Some(PathBuf::from(v));
        }
        _ if token.starts_with("--config=") => {
            db.config = Some(PathBuf::from(token.trim_start_matches("--config=")));
        }
        "--db" => {
            let Some(v) = it.next() else {
                anyhow::bail!("--db requires a value");
            };
            db.db = Some(v.to_string());
        }
        _ if token.starts_with("--db=") => {
            db.db = Some(token.trim_start_matches("--db=").to_string());
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_db_command<'a>(
    topic: HelpTopic,
    mut it: impl Iterator<Item = &'a str>,
) -> anyhow::Result<Command> {
    let mut db = DbArgs::default();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(topic));
        }
        if !parse_db_flag(token, &mut it, &mut db)? {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    Ok(match topic {
        HelpTopic::Path => Command::Path(db),
        _ => Command::Demo(db),
    })
}

fn parse_dump<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut db = DbArgs::default();
    let mut table: Option<String> = None;
    let mut json = false;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Dump)),
            "--json" => json = true,
            _ if parse_db_flag(token, &mut it, &mut db)? => {}
            _ if token.starts_with('-') => anyhow::bail!("unknown argument: {token}"),
            _ if table.is_none() => table = Some(token.to_string()),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(table) = table else {
        anyhow::bail!("dump requires a table name");
    };
    Ok(Command::Dump(DumpArgs { db, table, json }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
litegen - SQLite statement generator demo

USAGE:
  litegen <COMMAND> [OPTIONS]

COMMANDS:
  demo          Run the create/insert/update/select/delete/drop walkthrough
  dump          Print every row of a table
  path          Print where the database lives

Run `litegen <command> --help` for more."
            );
        }
        HelpTopic::Demo => {
            println!(
                "\
USAGE:
  litegen demo [OPTIONS]

OPTIONS:
  --config <FILE>       Database config file (TOML)
  --db <NAME|PATH>      Database name or file path (default: data_base)
  -h, --help            Print help"
            );
        }
        HelpTopic::Dump => {
            println!(
                "\
USAGE:
  litegen dump <TABLE> [OPTIONS]

OPTIONS:
  --config <FILE>       Database config file (TOML)
  --db <NAME|PATH>      Database name or file path (default: data_base)
  --json                Print rows as JSON lines
  -h, --help            Print help"
            );
        }
        HelpTopic::Path => {
            println!(
                "\
USAGE:
  litegen path [OPTIONS]

OPTIONS:
  --config <FILE>       Database config file (TOML)
  --db <NAME|PATH>      Database name or file path (default: data_base)
  -h, --help            Print help"
            );
        }
    }
}
