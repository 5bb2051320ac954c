//! SQL identifier validation.
//!
//! Table and column names cannot be bound as parameters, so every name that
//! ends up in generated SQL goes through [`Ident::parse`] first.
//!
//! - Each `.`-separated part must match `[A-Za-z_][A-Za-z0-9_]*`
//! - At most one dot (`schema.table` or `table.column`)

use crate::error::{LiteError, LiteResult};
use std::fmt;

/// A validated SQL identifier (table or column name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    /// Parse and validate an identifier.
    pub fn parse(s: &str) -> LiteResult<Self> {
        if s.is_empty() {
            return Err(LiteError::InvalidIdent("identifier cannot be empty".to_string()));
        }

        let mut segments = 0;
        for seg in s.split('.') {
            segments += 1;
            let mut chars = seg.chars();
            let Some(first) = chars.next() else {
                return Err(LiteError::InvalidIdent(format!("empty segment in '{s}'")));
            };
            if !(first == '_' || first.is_ascii_alphabetic()) {
                return Err(LiteError::InvalidIdent(format!(
                    "'{s}' must start with a letter or underscore"
                )));
            }
            if let Some(c) = chars.find(|c| !(*c == '_' || c.is_ascii_alphanumeric())) {
                return Err(LiteError::InvalidIdent(format!(
                    "invalid character '{c}' in '{s}'"
                )));
            }
        }

        if segments > 2 {
            return Err(LiteError::InvalidIdent(format!(
                "'{s}' has too many '.'-separated parts"
            )));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convert an input into an [`Ident`].
///
/// This is mainly for ergonomics in builder APIs.
pub trait IntoIdent {
    fn into_ident(self) -> LiteResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> LiteResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> LiteResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> LiteResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> LiteResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> LiteResult<Ident> {
        Ident::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_dotted() {
        assert_eq!(Ident::parse("users").unwrap().as_str(), "users");
        assert_eq!(Ident::parse("_tmp1").unwrap().as_str(), "_tmp1");
        assert_eq!(Ident::parse("main.users").unwrap().as_str(), "main.users");
    }

    #[test]
    fn rejects_unsafe() {
        assert!(Ident::parse("").is_err());
        assert!(Ident::parse("1users").is_err());
        assert!(Ident::parse("users name").is_err());
        assert!(Ident::parse("users; DROP TABLE users; --").is_err());
        assert!(Ident::parse("users..name").is_err());
        assert!(Ident::parse("a.b.c").is_err());
        assert!(Ident::parse("users.").is_err());
    }
}
