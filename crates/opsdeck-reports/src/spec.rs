//! The generic read-only projection every domain report is declared as.
//!
//! A report is a name, a store, one SQL statement, and a parameter schema.
//! Running one is the same everywhere: resolve arguments against the schema,
//! bind them positionally, hand the statement to the store reader, and wrap
//! the result in the declared shape. Domain modules contribute declarations,
//! never bespoke execution paths.

use std::collections::BTreeMap;

use serde::Serialize;

use opsdeck_store::{Param, Store, StoreReader};
use opsdeck_types::{Row, Value};

use crate::error::{Error, Result};

/// How a report's result is shaped for callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Ordered list of rows.
    Rows,
    /// First matching row, or the empty row.
    Row,
    /// First column of the first row, with a default covering null and no-row.
    Scalar(ScalarDefault),
}

/// Const-constructible default for scalar reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarDefault {
    Int(i64),
    Float(f64),
}

impl ScalarDefault {
    pub fn value(self) -> Value {
        match self {
            ScalarDefault::Int(n) => Value::Integer(n),
            ScalarDefault::Float(v) => Value::Real(v),
        }
    }
}

/// How a textual argument becomes a bound SQL parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Int,
    Float,
    Text,
    /// Bound as a `-N days` modifier for `datetime('now', ?)` windows.
    DaysBack,
    /// Bound as a `-N*7 days` modifier; callers think in weeks.
    WeeksBack,
    /// Bound as a `-N minutes` modifier.
    MinutesBack,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Text => "text",
            ParamKind::DaysBack => "days_back",
            ParamKind::WeeksBack => "weeks_back",
            ParamKind::MinutesBack => "minutes_back",
        }
    }

    fn bind(self, raw: &str) -> Option<Param> {
        match self {
            ParamKind::Int => raw.parse::<i64>().ok().map(Param::Int),
            ParamKind::Float => raw.parse::<f64>().ok().map(Param::Real),
            ParamKind::Text => Some(Param::Text(raw.to_string())),
            ParamKind::DaysBack => raw.parse::<i64>().ok().map(Param::days_back),
            ParamKind::WeeksBack => raw.parse::<i64>().ok().map(|w| Param::days_back(w * 7)),
            ParamKind::MinutesBack => raw.parse::<i64>().ok().map(Param::minutes_back),
        }
    }
}

/// One declared parameter of a report.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Textual default, parsed exactly like a supplied argument. `None`
    /// makes the parameter required.
    pub default: Option<&'static str>,
}

/// A named, parameterized read-only projection over one store.
///
/// The SQL is the single place a producer's schema is spelled out; when a
/// producer migrates, the statement here changes and nothing else does.
/// Window parameters bind as SQLite date modifiers (`?` inside
/// `datetime('now', ?)`), so the statement text never interpolates values.
#[derive(Debug, Clone, Copy)]
pub struct ReportSpec {
    pub name: &'static str,
    pub store: Store,
    pub description: &'static str,
    pub sql: &'static str,
    pub params: &'static [ParamSpec],
    pub shape: Shape,
}

/// The shaped result of one report run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    Rows(Vec<Row>),
    Row(Row),
    Scalar(Value),
}

/// Run a report against a reader with caller-supplied arguments.
///
/// Arguments are textual (they arrive from query strings); each is parsed
/// per its declared kind, defaults fill the gaps, and undeclared names are
/// rejected rather than ignored.
pub fn run(
    reader: &StoreReader,
    spec: &ReportSpec,
    args: &BTreeMap<String, String>,
) -> Result<ReportOutput> {
    for key in args.keys() {
        if !spec.params.iter().any(|p| p.name == key) {
            return Err(Error::UnknownParam {
                report: spec.name,
                param: key.clone(),
            });
        }
    }

    let mut bound = Vec::with_capacity(spec.params.len());
    for param in spec.params {
        let raw = match args.get(param.name).map(String::as_str).or(param.default) {
            Some(raw) => raw,
            None => {
                return Err(Error::MissingParam {
                    report: spec.name,
                    param: param.name,
                });
            }
        };
        let value = param.kind.bind(raw).ok_or_else(|| Error::InvalidParam {
            report: spec.name,
            param: param.name,
            value: raw.to_string(),
        })?;
        bound.push(value);
    }

    match spec.shape {
        Shape::Rows => Ok(ReportOutput::Rows(reader.rows(spec.store, spec.sql, &bound)?)),
        Shape::Row => Ok(ReportOutput::Row(reader.one(spec.store, spec.sql, &bound)?)),
        Shape::Scalar(default) => Ok(ReportOutput::Scalar(reader.scalar(
            spec.store,
            spec.sql,
            &bound,
            default.value(),
        )?)),
    }
}
