//! Tweet-scan corpus: tracked accounts, theme lifecycle, cross-source echo.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "twitter.account_count",
        store: Store::TwitterTrends,
        description: "Accounts on the active scan roster",
        sql: "SELECT COUNT(*) FROM accounts WHERE active = 1",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "twitter.tweet_count",
        store: Store::TwitterTrends,
        description: "Tweets captured across every scan",
        sql: "SELECT COUNT(*) FROM tweets",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "twitter.tweets_today",
        store: Store::TwitterTrends,
        description: "Tweets captured since midnight",
        sql: "SELECT COUNT(*) FROM tweets WHERE date(created_at) >= date('now')",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "twitter.trending_theme_count",
        store: Store::TwitterTrends,
        description: "Themes currently marked trending",
        sql: "SELECT COUNT(*) FROM themes WHERE status = 'trending'",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "twitter.cross_source_count",
        store: Store::TwitterTrends,
        description: "Cross-source themes above the correlation floor",
        sql: "SELECT COUNT(*) FROM cross_source_themes WHERE correlation_score >= 0.3",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "twitter.themes_by_status",
        store: Store::TwitterTrends,
        description: "Theme counts per lifecycle stage, hottest stage first",
        sql: "\
SELECT status, COUNT(*) AS count
FROM themes
GROUP BY status
ORDER BY CASE status
    WHEN 'trending' THEN 1
    WHEN 'active' THEN 2
    WHEN 'emerging' THEN 3
    WHEN 'declining' THEN 4
    WHEN 'stale' THEN 5
END",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "twitter.themes",
        store: Store::TwitterTrends,
        description: "Every theme, lifecycle stage then velocity",
        sql: "\
SELECT name, description, mention_count, unique_accounts,
       velocity, acceleration, status, first_seen_date, updated_at
FROM themes
ORDER BY CASE status
    WHEN 'trending' THEN 1
    WHEN 'active' THEN 2
    WHEN 'emerging' THEN 3
    WHEN 'declining' THEN 4
    WHEN 'stale' THEN 5
END, velocity DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "twitter.flagged_tweets",
        store: Store::TwitterTrends,
        description: "Content-flagged tweets with their account, newest first",
        sql: "\
SELECT t.text, t.content_angle, t.likes, t.retweets,
       t.domain_tags, t.posted_at, t.tweet_url, t.created_at,
       a.handle, a.category
FROM tweets t
JOIN accounts a ON t.account_id = a.id
WHERE t.content_flag = 1
ORDER BY t.created_at DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("30"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "twitter.cross_source_themes",
        store: Store::TwitterTrends,
        description: "Themes echoing across sources, strongest correlation first",
        sql: "\
SELECT theme_name, twitter_count, youtube_count, kb_count,
       source_types, correlation_score, first_detected, last_updated
FROM cross_source_themes
ORDER BY correlation_score DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "twitter.accounts",
        store: Store::TwitterTrends,
        description: "Every tracked account by category then handle",
        sql: "\
SELECT handle, display_name, category, domain_tags, active,
       last_scan_date, total_tweets_tracked
FROM accounts
ORDER BY category, handle",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "twitter.accounts_by_category",
        store: Store::TwitterTrends,
        description: "Active-account tallies and tweet volume per category",
        sql: "\
SELECT category, COUNT(*) AS count,
       SUM(total_tweets_tracked) AS total_tweets
FROM accounts
WHERE active = 1
GROUP BY category
ORDER BY count DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "twitter.theme_velocity",
        store: Store::TwitterTrends,
        description: "Daily velocity points for live themes over the window",
        sql: "\
SELECT th.date, t.name, th.velocity, th.mention_count
FROM theme_history th
JOIN themes t ON th.theme_id = t.id
WHERE t.status IN ('trending', 'active')
  AND th.date >= date('now', ?1)
ORDER BY th.date, t.name",
        params: &[ParamSpec {
            name: "days",
            kind: ParamKind::DaysBack,
            default: Some("14"),
        }],
        shape: Shape::Rows,
    },
];
