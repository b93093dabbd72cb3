//! Reshapes report rows into the `labels`/`values[/counts]` arrays the
//! dashboard's chart widgets consume.

use serde::Serialize;
use serde_json::Value as JsonValue;

use opsdeck_types::{Row, Value, round_dp};

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<JsonValue>,
    pub values: Vec<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<JsonValue>>,
}

/// Which columns feed which array. `round` applies to values only; the
/// money series all render at four decimal places.
pub struct SeriesColumns {
    pub label: &'static str,
    pub value: &'static str,
    pub count: Option<&'static str>,
    pub round: Option<i32>,
}

pub fn series_from_rows(rows: &[Row], columns: &SeriesColumns) -> ChartSeries {
    let mut series = ChartSeries {
        counts: columns.count.map(|_| Vec::with_capacity(rows.len())),
        ..ChartSeries::default()
    };

    for row in rows {
        series.labels.push(cell(row, columns.label));

        let value = match (columns.round, row.get(columns.value).and_then(Value::as_f64)) {
            (Some(places), Some(number)) => JsonValue::from(round_dp(number, places)),
            _ => cell(row, columns.value),
        };
        series.values.push(value);

        if let (Some(counts), Some(column)) = (series.counts.as_mut(), columns.count) {
            counts.push(cell(row, column));
        }
    }
    series
}

fn cell(row: &Row, column: &str) -> JsonValue {
    row.get(column)
        .map(JsonValue::from)
        .unwrap_or(JsonValue::Null)
}
