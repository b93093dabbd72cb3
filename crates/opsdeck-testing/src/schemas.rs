//! Producer-schema DDL for every known store.
//!
//! The dashboard never creates tables itself, so tests have to stand in for
//! the producer services. Each constant mirrors the columns the current
//! producers write; when a producer migrates, the report SQL and the schema
//! here change together.

use opsdeck_store::Store;

/// The full DDL batch for one store.
pub fn ddl(store: Store) -> &'static str {
    match store {
        Store::CronLog => CRON_LOG,
        Store::UsageTracking => USAGE_TRACKING,
        Store::ContentIdeas => CONTENT_IDEAS,
        Store::KnowledgeBase => KNOWLEDGE_BASE,
        Store::JobMarket => JOB_MARKET,
        Store::YoutubeChannels => YOUTUBE_CHANNELS,
        Store::Briefings => BRIEFINGS,
        Store::ProjectHub => PROJECT_HUB,
        Store::TwitterTrends => TWITTER_TRENDS,
        Store::Crm => CRM,
        Store::MealPlanning => MEAL_PLANNING,
        Store::ChoreSchedule => CHORE_SCHEDULE,
    }
}

pub const CRON_LOG: &str = "
CREATE TABLE cron_runs (
    id INTEGER PRIMARY KEY,
    job_name TEXT NOT NULL,
    started_at TEXT,
    status TEXT,
    duration_seconds REAL,
    error_message TEXT
);
";

pub const USAGE_TRACKING: &str = "
CREATE TABLE usage_log (
    id INTEGER PRIMARY KEY,
    timestamp TEXT,
    model TEXT,
    skill TEXT,
    cost_usd REAL
);
CREATE TABLE cost_alerts (
    id INTEGER PRIMARY KEY,
    alert_type TEXT,
    threshold_usd REAL,
    current_value_usd REAL,
    triggered_at TEXT,
    acknowledged INTEGER DEFAULT 0,
    created_at TEXT
);
";

pub const CONTENT_IDEAS: &str = "
CREATE TABLE content_ideas (
    id INTEGER PRIMARY KEY,
    title TEXT,
    status TEXT,
    post_type TEXT,
    source_type TEXT,
    duplicate_of INTEGER,
    created_at TEXT,
    updated_at TEXT
);
";

pub const KNOWLEDGE_BASE: &str = "
CREATE TABLE sources (
    id INTEGER PRIMARY KEY,
    title TEXT,
    source_type TEXT,
    url TEXT,
    summary TEXT,
    created_at TEXT
);
CREATE TABLE chunks (
    id INTEGER PRIMARY KEY,
    source_id INTEGER,
    content TEXT
);
CREATE TABLE acquisition_metadata (
    id INTEGER PRIMARY KEY,
    source_id INTEGER,
    scan_source TEXT,
    discovery_date TEXT,
    created_at TEXT
);
";

pub const JOB_MARKET: &str = "
CREATE TABLE job_scores (
    id INTEGER PRIMARY KEY,
    job_title TEXT,
    company TEXT,
    location TEXT,
    work_type TEXT,
    experience_level TEXT,
    match_score REAL,
    skill_match REAL,
    experience_match REAL,
    opportunity_quality REAL,
    portfolio_alignment REAL,
    related_projects TEXT,
    email_date TEXT,
    created_at TEXT
);
CREATE TABLE market_trends (
    id INTEGER PRIMARY KEY,
    week_start TEXT,
    total_jobs_scanned INTEGER,
    new_jobs_this_week INTEGER,
    avg_match_score REAL,
    high_matches INTEGER,
    medium_matches INTEGER,
    top_skills TEXT,
    top_companies TEXT,
    top_locations TEXT
);
";

pub const YOUTUBE_CHANNELS: &str = "
CREATE TABLE phrases (
    id INTEGER PRIMARY KEY,
    phrase TEXT,
    category TEXT,
    occurrence_count INTEGER,
    trending INTEGER DEFAULT 0,
    first_seen_channel TEXT,
    first_seen_date TEXT,
    created_at TEXT
);
CREATE TABLE channels (
    id INTEGER PRIMARY KEY,
    name TEXT,
    category TEXT,
    domain_tags TEXT,
    active INTEGER DEFAULT 1,
    last_scan_date TEXT,
    total_videos_tracked INTEGER
);
CREATE TABLE videos (
    id INTEGER PRIMARY KEY,
    title TEXT,
    channel_name TEXT,
    upload_date TEXT,
    view_count INTEGER,
    content_flag INTEGER DEFAULT 0,
    domain_tags TEXT,
    video_url TEXT,
    created_at TEXT
);
";

pub const BRIEFINGS: &str = "
CREATE TABLE briefings (
    id INTEGER PRIMARY KEY,
    date TEXT,
    momentum_weekly REAL,
    momentum_monthly REAL,
    theme TEXT,
    content TEXT,
    estimated_cost REAL,
    created_at TEXT
);
CREATE TABLE signals (
    id INTEGER PRIMARY KEY,
    briefing_id INTEGER,
    source TEXT,
    signal_name TEXT,
    value TEXT,
    direction TEXT,
    category TEXT
);
";

pub const PROJECT_HUB: &str = "
CREATE TABLE projects (
    id INTEGER PRIMARY KEY,
    name TEXT,
    classification TEXT,
    status TEXT,
    health_score REAL,
    progress_pct REAL,
    tech_stack TEXT,
    last_updated TEXT,
    description TEXT
);
CREATE TABLE milestones (
    id INTEGER PRIMARY KEY,
    project_id INTEGER,
    title TEXT,
    due_date TEXT,
    completed_at TEXT,
    status TEXT
);
CREATE TABLE time_entries (
    id INTEGER PRIMARY KEY,
    project_id INTEGER,
    description TEXT,
    hours REAL,
    logged_at TEXT
);
";

pub const TWITTER_TRENDS: &str = "
CREATE TABLE accounts (
    id INTEGER PRIMARY KEY,
    handle TEXT,
    display_name TEXT,
    category TEXT,
    domain_tags TEXT,
    active INTEGER DEFAULT 1,
    last_scan_date TEXT,
    total_tweets_tracked INTEGER
);
CREATE TABLE tweets (
    id INTEGER PRIMARY KEY,
    account_id INTEGER,
    text TEXT,
    content_angle TEXT,
    likes INTEGER,
    retweets INTEGER,
    domain_tags TEXT,
    posted_at TEXT,
    tweet_url TEXT,
    content_flag INTEGER DEFAULT 0,
    created_at TEXT
);
CREATE TABLE themes (
    id INTEGER PRIMARY KEY,
    name TEXT,
    description TEXT,
    mention_count INTEGER,
    unique_accounts INTEGER,
    velocity REAL,
    acceleration REAL,
    status TEXT,
    first_seen_date TEXT,
    updated_at TEXT
);
CREATE TABLE theme_history (
    id INTEGER PRIMARY KEY,
    theme_id INTEGER,
    date TEXT,
    velocity REAL,
    mention_count INTEGER
);
CREATE TABLE cross_source_themes (
    id INTEGER PRIMARY KEY,
    theme_name TEXT,
    twitter_count INTEGER,
    youtube_count INTEGER,
    kb_count INTEGER,
    source_types TEXT,
    correlation_score REAL,
    first_detected TEXT,
    last_updated TEXT
);
";

pub const CRM: &str = "
CREATE TABLE contacts (
    id INTEGER PRIMARY KEY,
    firstname TEXT,
    lastname TEXT,
    company_name TEXT,
    job_title TEXT,
    email TEXT
);
CREATE TABLE companies (
    id INTEGER PRIMARY KEY,
    name TEXT,
    industry TEXT,
    num_employees INTEGER,
    domain TEXT,
    research_summary TEXT,
    research_date TEXT
);
CREATE TABLE deals (
    id INTEGER PRIMARY KEY,
    deal_name TEXT,
    deal_stage TEXT,
    amount REAL,
    close_date TEXT,
    deal_type TEXT,
    contact_id INTEGER,
    company_id INTEGER
);
CREATE TABLE relationship_scores (
    id INTEGER PRIMARY KEY,
    contact_id INTEGER,
    total_score REAL,
    engagement REAL,
    strategic_fit REAL,
    opportunity_potential REAL,
    network_value REAL,
    days_since_contact INTEGER,
    nudge_status TEXT
);
CREATE TABLE follow_up_drafts (
    id INTEGER PRIMARY KEY,
    contact_id INTEGER,
    draft_subject TEXT,
    draft_status TEXT,
    context_summary TEXT,
    created_at TEXT
);
CREATE TABLE sync_log (
    id INTEGER PRIMARY KEY,
    sync_type TEXT,
    records_fetched INTEGER,
    records_created INTEGER,
    records_updated INTEGER,
    status TEXT,
    error_message TEXT,
    started_at TEXT,
    completed_at TEXT
);
";

pub const MEAL_PLANNING: &str = "
CREATE TABLE recipes (
    id INTEGER PRIMARY KEY,
    name TEXT,
    meal_type TEXT,
    rating REAL,
    times_made INTEGER DEFAULT 0,
    prep_time_min INTEGER
);
CREATE TABLE meal_plans (
    id INTEGER PRIMARY KEY,
    week_start TEXT,
    status TEXT
);
CREATE TABLE planned_meals (
    id INTEGER PRIMARY KEY,
    plan_id INTEGER,
    recipe_id INTEGER,
    day_of_week INTEGER,
    meal_type TEXT,
    freetext_meal TEXT,
    notes TEXT
);
CREATE TABLE preferences (
    id INTEGER PRIMARY KEY,
    description TEXT,
    active INTEGER DEFAULT 1
);
";

pub const CHORE_SCHEDULE: &str = "
CREATE TABLE kids (
    id INTEGER PRIMARY KEY,
    name TEXT,
    active INTEGER DEFAULT 1
);
CREATE TABLE chores (
    id INTEGER PRIMARY KEY,
    name TEXT,
    difficulty TEXT,
    active INTEGER DEFAULT 1
);
CREATE TABLE assignments (
    id INTEGER PRIMARY KEY,
    kid_id INTEGER,
    chore_id INTEGER,
    assigned_date TEXT,
    status TEXT,
    completed_at TEXT
);
";

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn every_store_ddl_executes_cleanly() {
        for store in Store::ALL {
            let conn = Connection::open_in_memory().unwrap();
            conn.execute_batch(ddl(store))
                .unwrap_or_else(|e| panic!("DDL for {store} failed: {e}"));
        }
    }
}
