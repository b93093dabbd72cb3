//! Custom assertions for dashboard JSON payloads.
//!
//! Route-level tests mostly check payload shape rather than exact bodies;
//! these helpers keep those checks readable.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert a chart payload: `labels` and `values` arrays in step, with the
/// expected number of points.
pub fn assert_chart_series(json: &Value, expected_points: usize) -> Result<()> {
    let labels = json["labels"]
        .as_array()
        .context("Expected 'labels' array in chart payload")?;
    let values = json["values"]
        .as_array()
        .context("Expected 'values' array in chart payload")?;

    if labels.len() != expected_points {
        anyhow::bail!("Expected {} chart points, got {}", expected_points, labels.len());
    }
    if values.len() != labels.len() {
        anyhow::bail!(
            "Chart series out of step: {} labels vs {} values",
            labels.len(),
            values.len()
        );
    }
    Ok(())
}

/// Assert a row-list payload has the expected number of rows.
pub fn assert_row_count(json: &Value, expected: usize) -> Result<()> {
    let rows = json.as_array().context("Expected a JSON array of rows")?;
    if rows.len() != expected {
        anyhow::bail!("Expected {} rows, got {}", expected, rows.len());
    }
    Ok(())
}

/// Assert every row in a row-list payload carries a column.
pub fn assert_rows_have_column(json: &Value, column: &str) -> Result<()> {
    let rows = json.as_array().context("Expected a JSON array of rows")?;
    for (i, row) in rows.iter().enumerate() {
        if row.get(column).is_none() {
            anyhow::bail!("Row {} missing column '{}'", i, column);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_series_checks_both_arrays() {
        let good = json!({"labels": ["a", "b"], "values": [1, 2]});
        assert!(assert_chart_series(&good, 2).is_ok());

        let skewed = json!({"labels": ["a", "b"], "values": [1]});
        assert!(assert_chart_series(&skewed, 2).is_err());

        let missing = json!({"labels": ["a"]});
        assert!(assert_chart_series(&missing, 1).is_err());
    }

    #[test]
    fn row_checks_report_shape_problems() {
        let rows = json!([{"job_name": "backup"}, {"job_name": "sync"}]);
        assert!(assert_row_count(&rows, 2).is_ok());
        assert!(assert_rows_have_column(&rows, "job_name").is_ok());
        assert!(assert_rows_have_column(&rows, "status").is_err());
        assert!(assert_row_count(&json!({}), 0).is_err());
    }
}
