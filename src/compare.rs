use std::fmt;
use std::future::Future;

use crate::change::Change;
use crate::diff::{find_breaking_changes, find_dangerous_changes};
use crate::loader::LoadError;
use crate::schema::{Schema, SchemaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("from"),
            Side::To => f.write_str("to"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid `{side}` schema: {source}")]
    Schema {
        side: Side,
        #[source]
        source: SchemaError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    InSync,
    Changed {
        dangerous: Vec<Change>,
        breaking: Vec<Change>,
    },
}

fn build(side: Side, sdl: &str) -> Result<Schema, CompareError> {
    Schema::parse(sdl).map_err(|source| CompareError::Schema { side, source })
}

/// Wait for both schema texts, then compare them. The first acquisition to
/// fail ends the comparison; the other one is dropped.
pub async fn diff_schemas<F, T>(from: F, to: T) -> Result<Comparison, CompareError>
where
    F: Future<Output = Result<String, LoadError>>,
    T: Future<Output = Result<String, LoadError>>,
{
    let (from_sdl, to_sdl) = tokio::try_join!(from, to)?;

    let from_schema = build(Side::From, &from_sdl)?;
    let to_schema = build(Side::To, &to_sdl)?;

    let dangerous = find_dangerous_changes(&from_schema, &to_schema);
    let breaking = find_breaking_changes(&from_schema, &to_schema);

    for change in breaking.iter().chain(&dangerous) {
        tracing::debug!(%change, severity = ?change.severity(), "schema change");
    }

    if dangerous.is_empty() && breaking.is_empty() {
        Ok(Comparison::InSync)
    } else {
        Ok(Comparison::Changed {
            dangerous,
            breaking,
        })
    }
}
