use super::traits::{MutationBuilder, SqlBuilder};
use crate::error::{LiteError, LiteResult};
use crate::ident::Ident;
use crate::sql::Sql;
use std::fmt;
use std::str::FromStr;

/// Column type tag for `CREATE TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Text,
    Blob,
    PrimaryKey,
    AutoIncrement,
}

pub const INTEGER: ColumnType = ColumnType::Integer;
pub const TEXT: ColumnType = ColumnType::Text;
pub const BLOB: ColumnType = ColumnType::Blob;
pub const PRIMARY_KEY: ColumnType = ColumnType::PrimaryKey;
pub const AUTO_INCREMENT: ColumnType = ColumnType::AutoIncrement;

impl ColumnType {
    /// SQL keyword emitted after the column name.
    pub fn keyword(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::PrimaryKey => "PRIMARY KEY",
            ColumnType::AutoIncrement => "AUTOINCREMENT",
        }
    }
}

impl FromStr for ColumnType {
    type Err = LiteError;

    /// Accepts both tag names (`PRIMARY_KEY`) and keywords (`PRIMARY KEY`),
    /// case-insensitively.
    fn from_str(s: &str) -> LiteResult<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace(' ', "_");
        match normalized.as_str() {
            "INTEGER" => Ok(ColumnType::Integer),
            "TEXT" => Ok(ColumnType::Text),
            "BLOB" => Ok(ColumnType::Blob),
            "PRIMARY_KEY" => Ok(ColumnType::PrimaryKey),
            "AUTO_INCREMENT" | "AUTOINCREMENT" => Ok(ColumnType::AutoIncrement),
            _ => Err(LiteError::UnknownColumnType(s.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One element of a flat column list: either a column name or a type tag
/// that applies to the most recent name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnFragment {
    Name(String),
    Type(ColumnType),
}

impl ColumnFragment {
    /// `, <name>` for a name, ` <KEYWORD>` for a type tag.
    fn render(&self) -> String {
        match self {
            ColumnFragment::Name(name) => format!(", {name}"),
            ColumnFragment::Type(t) => format!(" {}", t.keyword()),
        }
    }
}

impl From<&str> for ColumnFragment {
    fn from(name: &str) -> Self {
        ColumnFragment::Name(name.to_string())
    }
}

impl From<String> for ColumnFragment {
    fn from(name: String) -> Self {
        ColumnFragment::Name(name)
    }
}

impl From<&String> for ColumnFragment {
    fn from(name: &String) -> Self {
        ColumnFragment::Name(name.clone())
    }
}

impl From<ColumnType> for ColumnFragment {
    fn from(t: ColumnType) -> Self {
        ColumnFragment::Type(t)
    }
}

/// Build a `Vec<ColumnFragment>` from names and type tags.
///
/// ```
/// use litegen::{columns, INTEGER, PRIMARY_KEY, TEXT};
///
/// let cols = columns!["id", INTEGER, PRIMARY_KEY, "val", TEXT];
/// assert_eq!(cols.len(), 5);
/// ```
#[macro_export]
macro_rules! columns {
    ($($c:expr),* $(,)?) => {
        ::std::vec![$($crate::ColumnFragment::from($c)),*]
    };
}

/// A column name with its type tags, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub types: Vec<ColumnType>,
}

impl ColumnDef {
    pub fn new(name: &str, types: &[ColumnType]) -> Self {
        Self {
            name: name.to_string(),
            types: types.to_vec(),
        }
    }
}

/// CREATE TABLE builder.
#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    table: String,
    columns: Vec<ColumnDef>,
}

impl CreateTableBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
        }
    }

    /// Add a column with its type tags.
    pub fn column(&mut self, name: &str, types: &[ColumnType]) -> &mut Self {
        self.columns.push(ColumnDef::new(name, types));
        self
    }

    /// Group a flat fragment list into columns.
    ///
    /// Every type tag attaches to the closest preceding name, so the list
    /// must start with a name.
    pub fn from_fragments(table: &str, fragments: &[ColumnFragment]) -> LiteResult<Self> {
        let mut builder = Self::new(table);
        for fragment in fragments {
            match fragment {
                ColumnFragment::Name(name) => {
                    builder.columns.push(ColumnDef::new(name, &[]));
                }
                ColumnFragment::Type(t) => match builder.columns.last_mut() {
                    Some(col) => col.types.push(*t),
                    None => {
                        return Err(LiteError::validation(format!(
                            "CREATE TABLE {table}: type tag {t} before any column name"
                        )));
                    }
                },
            }
        }
        Ok(builder)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    fn fragments(&self) -> impl Iterator<Item = ColumnFragment> + '_ {
        self.columns.iter().flat_map(|col| {
            std::iter::once(ColumnFragment::Name(col.name.clone()))
                .chain(col.types.iter().copied().map(ColumnFragment::Type))
        })
    }
}

impl SqlBuilder for CreateTableBuilder {
    fn render(&self) -> Sql {
        let body: String = self.fragments().map(|f| f.render()).collect();
        let body = body.strip_prefix(", ").unwrap_or(&body);
        Sql::new(format!("CREATE TABLE {} ({})", self.table, body))
    }

    fn validate(&self) -> LiteResult<()> {
        Ident::parse(&self.table)?;
        if self.columns.is_empty() {
            return Err(LiteError::validation(format!(
                "CREATE TABLE {}: at least one column is required",
                self.table
            )));
        }
        for col in &self.columns {
            Ident::parse(&col.name)?;
        }
        Ok(())
    }
}

impl MutationBuilder for CreateTableBuilder {}
