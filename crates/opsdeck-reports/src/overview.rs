//! The landing snapshot: one or two glanceable numbers from every domain.
//!
//! Each component reads its own store and degrades independently, so one
//! missing file blanks one card instead of the whole page. The shapes here
//! are typed rather than table-driven because several fold multiple scalars
//! or post-process in ways a single statement can't express.

use std::collections::BTreeMap;

use serde::Serialize;

use opsdeck_store::{Store, StoreReader};
use opsdeck_types::{Row, Value, round_dp, round1};

use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct OverviewSnapshot {
    pub cron: CronHealth,
    pub cost: SpendToday,
    pub content: BTreeMap<String, i64>,
    pub kb: KnowledgeTotals,
    pub briefing: Row,
    pub jobs: i64,
    pub youtube: i64,
    pub projects: ProjectPulse,
}

/// Last-24-hours cron gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CronHealth {
    pub rate: f64,
    pub total: i64,
    pub failed: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendToday {
    pub cost: f64,
    pub active_alerts: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeTotals {
    pub sources: i64,
    pub chunks: i64,
    pub flagged: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPulse {
    pub active: i64,
    pub overdue: i64,
}

/// Assemble the full snapshot in store order.
pub fn overview(reader: &StoreReader) -> Result<OverviewSnapshot> {
    Ok(OverviewSnapshot {
        cron: cron_health(reader)?,
        cost: spend_today(reader)?,
        content: content_counts(reader)?,
        kb: knowledge_totals(reader)?,
        briefing: latest_briefing(reader)?,
        jobs: high_match_jobs_week(reader)?,
        youtube: youtube_trending_week(reader)?,
        projects: project_pulse(reader)?,
    })
}

/// Success rate over the last 24 hours of runs.
///
/// The scheduler wrapper writes `failure` for this gauge's failures; the
/// per-job history tables write `failed`. Both spellings are live in
/// production data, so this must stay on `failure`.
pub fn cron_health(reader: &StoreReader) -> Result<CronHealth> {
    let total = count(
        reader,
        Store::CronLog,
        "SELECT COUNT(*) FROM cron_runs WHERE started_at >= datetime('now', '-24 hours')",
    )?;
    if total == 0 {
        return Ok(CronHealth {
            rate: 0.0,
            total: 0,
            failed: 0,
        });
    }
    let failed = count(
        reader,
        Store::CronLog,
        "SELECT COUNT(*) FROM cron_runs \
         WHERE started_at >= datetime('now', '-24 hours') AND status = 'failure'",
    )?;
    let rate = round1((total - failed) as f64 / total as f64 * 100.0);
    Ok(CronHealth {
        rate,
        total,
        failed,
    })
}

/// Today's API spend and the alert badge, which never shows more than 3.
pub fn spend_today(reader: &StoreReader) -> Result<SpendToday> {
    let cost = reader.scalar(
        Store::UsageTracking,
        "SELECT COALESCE(SUM(cost_usd), 0) FROM usage_log WHERE date(timestamp) = date('now')",
        &[],
        Value::Real(0.0),
    )?;
    let active_alerts = count(
        reader,
        Store::UsageTracking,
        "SELECT COUNT(*) FROM (SELECT id FROM cost_alerts \
         WHERE acknowledged = 0 ORDER BY created_at DESC LIMIT 3)",
    )?;
    Ok(SpendToday {
        cost: round_dp(cost.as_f64().unwrap_or(0.0), 4),
        active_alerts,
    })
}

/// Idea counts keyed by pipeline status. Rows with a null status are skipped.
pub fn content_counts(reader: &StoreReader) -> Result<BTreeMap<String, i64>> {
    let rows = reader.rows(
        Store::ContentIdeas,
        "SELECT status, COUNT(*) AS cnt FROM content_ideas GROUP BY status",
        &[],
    )?;

    let mut counts = BTreeMap::new();
    for row in rows {
        let Some(status) = row.get("status").and_then(Value::as_str) else {
            continue;
        };
        let cnt = row.get("cnt").and_then(Value::as_i64).unwrap_or(0);
        counts.insert(status.to_string(), cnt);
    }
    Ok(counts)
}

/// Source and chunk totals. The flagged counter is reserved wiring for the
/// review queue and reads zero until that producer lands.
pub fn knowledge_totals(reader: &StoreReader) -> Result<KnowledgeTotals> {
    Ok(KnowledgeTotals {
        sources: count(reader, Store::KnowledgeBase, "SELECT COUNT(*) FROM sources")?,
        chunks: count(reader, Store::KnowledgeBase, "SELECT COUNT(*) FROM chunks")?,
        flagged: 0,
    })
}

/// Headline of the newest themed briefing, or the empty row.
pub fn latest_briefing(reader: &StoreReader) -> Result<Row> {
    Ok(reader.one(
        Store::Briefings,
        "SELECT momentum_weekly, theme, created_at FROM briefings \
         WHERE theme IS NOT NULL ORDER BY created_at DESC LIMIT 1",
        &[],
    )?)
}

/// Strong job matches scanned in the last week.
pub fn high_match_jobs_week(reader: &StoreReader) -> Result<i64> {
    count(
        reader,
        Store::JobMarket,
        "SELECT COUNT(*) FROM job_scores \
         WHERE match_score >= 80 AND date(created_at) >= date('now', '-7 days')",
    )
}

/// Distinct phrases the channel scans surfaced in the last week.
pub fn youtube_trending_week(reader: &StoreReader) -> Result<i64> {
    count(
        reader,
        Store::YoutubeChannels,
        "SELECT COUNT(DISTINCT phrase) FROM phrases \
         WHERE date(created_at) >= date('now', '-7 days')",
    )
}

/// Working-set size and the overdue-milestone badge.
pub fn project_pulse(reader: &StoreReader) -> Result<ProjectPulse> {
    Ok(ProjectPulse {
        active: count(
            reader,
            Store::ProjectHub,
            "SELECT COUNT(*) FROM projects WHERE status = 'active'",
        )?,
        overdue: count(
            reader,
            Store::ProjectHub,
            "SELECT COUNT(*) FROM milestones \
             WHERE due_date < date('now') AND completed_at IS NULL",
        )?,
    })
}

fn count(reader: &StoreReader, store: Store, sql: &str) -> Result<i64> {
    let value = reader.scalar(store, sql, &[], Value::Integer(0))?;
    Ok(value.as_i64().unwrap_or(0))
}
