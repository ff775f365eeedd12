//! Custom SQL functions registered on every connection.

use std::sync::Arc;

use regex::Regex;
use rusqlite::{Connection, functions::FunctionFlags};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registers `regexp(pattern, text)`, which backs SQLite's `text REGEXP
/// pattern` operator. NULL text never matches. The compiled pattern is cached
/// per statement.
pub fn register_regexp(connection: &Connection) -> rusqlite::Result<()> {
    connection.create_scalar_function(
        "regexp",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let regex: Arc<Regex> = ctx.get_or_create_aux(0, |pattern| -> Result<_, BoxError> {
                Ok(Regex::new(pattern.as_str()?)?)
            })?;
            let text: Option<String> = ctx.get(1)?;
            Ok(text.is_some_and(|text| regex.is_match(&text)))
        },
    )
}
