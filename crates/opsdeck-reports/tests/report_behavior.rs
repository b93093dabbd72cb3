//! Registry-wide behavior against real store files on disk.
//!
//! The per-domain modules test their own SQL; these tests pin the contract
//! every report shares: absent stores read as empty, bad arguments fail
//! before any file is touched, and one broken store never bleeds into
//! another.

use std::collections::BTreeMap;

use opsdeck_reports::{Error, ReportOutput, Shape, all_reports, find_report, run};
use opsdeck_store::Store;
use opsdeck_testing::TestDeck;
use opsdeck_types::Value;

#[test]
fn absent_stores_read_as_empty_shapes() {
    let deck = TestDeck::new();
    let reader = deck.reader();

    for spec in all_reports() {
        if spec.params.iter().any(|p| p.default.is_none()) {
            continue;
        }
        let out = run(&reader, spec, &BTreeMap::new())
            .unwrap_or_else(|err| panic!("{} errored on an empty dir: {err}", spec.name));
        match (spec.shape, out) {
            (Shape::Rows, ReportOutput::Rows(rows)) => {
                assert!(rows.is_empty(), "{} returned rows", spec.name);
            }
            (Shape::Row, ReportOutput::Row(row)) => {
                assert!(row.is_empty(), "{} returned columns", spec.name);
            }
            (Shape::Scalar(default), ReportOutput::Scalar(value)) => {
                assert_eq!(value, default.value(), "{} scalar default", spec.name);
            }
            (_, other) => panic!("{} output family drifted: {other:?}", spec.name),
        }
    }
}

#[test]
fn every_report_runs_against_the_producer_schemas() {
    let deck = TestDeck::new();
    for store in Store::ALL {
        deck.seed_schema(store);
    }
    let reader = deck.reader();

    for spec in all_reports() {
        // required params get a placeholder that parses for every kind
        let args: BTreeMap<String, String> = spec
            .params
            .iter()
            .filter(|p| p.default.is_none())
            .map(|p| (p.name.to_string(), "1".to_string()))
            .collect();
        run(&reader, spec, &args).unwrap_or_else(|err| {
            panic!("{} rejects its producer schema: {err}", spec.name)
        });
    }
}

#[test]
fn required_arguments_fail_before_any_store_is_read() {
    let deck = TestDeck::new();
    let spec = find_report("briefings.detail").unwrap();

    let err = run(&deck.reader(), spec, &BTreeMap::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingParam {
            report: "briefings.detail",
            param: "id",
        }
    ));
}

#[test]
fn undeclared_arguments_are_rejected() {
    let deck = TestDeck::new();
    let spec = find_report("cron.jobs_summary").unwrap();
    let args = BTreeMap::from([("bogus".to_string(), "1".to_string())]);

    let err = run(&deck.reader(), spec, &args).unwrap_err();
    assert!(matches!(err, Error::UnknownParam { .. }));
    assert!(err.to_string().contains("'bogus'"));
}

#[test]
fn unparseable_arguments_name_the_offender() {
    let deck = TestDeck::new();
    let spec = find_report("jobs.all").unwrap();
    let args = BTreeMap::from([("limit".to_string(), "soon".to_string())]);

    let err = run(&deck.reader(), spec, &args).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidParam {
            param: "limit",
            ..
        }
    ));
}

#[test]
fn schema_drift_on_a_present_store_is_loud() {
    let deck = TestDeck::new();
    // the store file exists but the producer renamed its table
    deck.seed(
        Store::CronLog,
        "CREATE TABLE cron_runs_v2 (id INTEGER PRIMARY KEY);",
    );

    let spec = find_report("cron.total_jobs").unwrap();
    let err = run(&deck.reader(), spec, &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(err.to_string().contains("Store schema mismatch"));
}

#[test]
fn stores_degrade_independently() {
    let deck = TestDeck::new();
    deck.seed_schema(Store::JobMarket).seed(
        Store::JobMarket,
        "INSERT INTO job_scores (job_title, match_score, created_at)
         VALUES ('only row', 90, datetime('now'));",
    );
    let reader = deck.reader();

    let jobs = run(&reader, find_report("jobs.total").unwrap(), &BTreeMap::new()).unwrap();
    assert_eq!(jobs, ReportOutput::Scalar(Value::Integer(1)));

    let recipes = run(
        &reader,
        find_report("meals.recipe_count").unwrap(),
        &BTreeMap::new(),
    )
    .unwrap();
    assert_eq!(recipes, ReportOutput::Scalar(Value::Integer(0)));
}

#[test]
fn null_scalars_fall_back_to_the_default() {
    let deck = TestDeck::new();
    deck.seed_schema(Store::UsageTracking);

    let spec = find_report("costs.monthly_projection").unwrap();
    let out = run(&deck.reader(), spec, &BTreeMap::new()).unwrap();
    assert_eq!(out, ReportOutput::Scalar(Value::Real(0.0)));
}
