use rusqlite::params_from_iter;
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

use opsdeck_types::{Row, Value};

use crate::{Result, Store, StoreCatalog};

/// A positional query argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Real(f64),
    Text(String),
}

impl Param {
    /// SQLite datetime modifier covering the last `days` days. Negative
    /// inputs are treated as zero.
    pub fn days_back(days: i64) -> Param {
        Param::Text(format!("-{} days", days.max(0)))
    }

    /// SQLite datetime modifier covering the last `minutes` minutes.
    /// Negative inputs are treated as zero.
    pub fn minutes_back(minutes: i64) -> Param {
        Param::Text(format!("-{} minutes", minutes.max(0)))
    }
}

impl ToSql for Param {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Param::Int(v) => ToSqlOutput::from(*v),
            Param::Real(v) => ToSqlOutput::from(*v),
            Param::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Real(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

/// Runs read-only queries against the store catalog.
///
/// Three shapes cover every consumer: `rows` for lists, `one` for a single
/// row (empty row when nothing matches), `scalar` for a single value with a
/// caller-chosen default. A missing store always yields the empty shape;
/// only a present store that rejects the SQL produces an error. Each call
/// opens its own handle and drops it on every exit path.
pub struct StoreReader {
    catalog: StoreCatalog,
}

impl StoreReader {
    pub fn new(catalog: StoreCatalog) -> Self {
        StoreReader { catalog }
    }

    pub fn catalog(&self) -> &StoreCatalog {
        &self.catalog
    }

    pub fn rows(&self, store: Store, sql: &str, args: &[Param]) -> Result<Vec<Row>> {
        let Some(conn) = self.catalog.open(store)? else {
            return Ok(Vec::new());
        };
        let mut stmt = conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let mut rows = stmt.query(params_from_iter(args.iter()))?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(read_row(r, &names)?);
        }
        Ok(out)
    }

    pub fn one(&self, store: Store, sql: &str, args: &[Param]) -> Result<Row> {
        let Some(conn) = self.catalog.open(store)? else {
            return Ok(Row::new());
        };
        let mut stmt = conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let mut rows = stmt.query(params_from_iter(args.iter()))?;
        match rows.next()? {
            Some(r) => read_row(r, &names),
            None => Ok(Row::new()),
        }
    }

    /// `default` stands in for a missing store, an empty result, and a NULL
    /// value alike, so aggregate queries never surface SQL NULL.
    pub fn scalar(&self, store: Store, sql: &str, args: &[Param], default: Value) -> Result<Value> {
        let Some(conn) = self.catalog.open(store)? else {
            return Ok(default);
        };
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(args.iter()))?;
        match rows.next()? {
            Some(r) => {
                let value = value_at(r, 0)?;
                if value.is_null() { Ok(default) } else { Ok(value) }
            }
            None => Ok(default),
        }
    }

    /// Minutes since the newest store file changed, or `None` when the data
    /// directory holds nothing to read.
    pub fn freshness(&self) -> Option<u64> {
        crate::freshness::minutes_since_newest(self.catalog.base_dir())
    }
}

fn read_row(r: &rusqlite::Row<'_>, names: &[String]) -> Result<Row> {
    let mut row = Row::new();
    for (idx, name) in names.iter().enumerate() {
        row.push(name.clone(), value_at(r, idx)?);
    }
    Ok(row)
}

fn value_at(r: &rusqlite::Row<'_>, idx: usize) -> Result<Value> {
    let value = match r.get_ref(idx)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Integer(v),
        ValueRef::Real(v) => Value::Real(v),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        // Blobs have no JSON projection
        ValueRef::Blob(_) => Value::Null,
    };
    Ok(value)
}
