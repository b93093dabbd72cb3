//! Channel-scan corpus: trending phrases, tracked channels, discovered videos.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "youtube.trending_phrases",
        store: Store::YoutubeChannels,
        description: "Phrases ranked by how often the scans hit them",
        sql: "\
SELECT phrase, category, occurrence_count, trending,
       first_seen_channel, first_seen_date, created_at
FROM phrases
ORDER BY occurrence_count DESC, created_at DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "youtube.phrases_by_category",
        store: Store::YoutubeChannels,
        description: "Phrase tallies per category with the trending share",
        sql: "\
SELECT category, COUNT(*) AS count,
       SUM(CASE WHEN trending = 1 THEN 1 ELSE 0 END) AS trending_count
FROM phrases
GROUP BY category
ORDER BY count DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "youtube.channels",
        store: Store::YoutubeChannels,
        description: "Every tracked channel, alphabetical",
        sql: "\
SELECT name, category, domain_tags, active, last_scan_date,
       total_videos_tracked
FROM channels
ORDER BY name",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "youtube.recent_videos",
        store: Store::YoutubeChannels,
        description: "Most recently discovered videos",
        sql: "\
SELECT title, channel_name, upload_date, view_count,
       content_flag, domain_tags, video_url
FROM videos
ORDER BY created_at DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("20"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "youtube.video_count",
        store: Store::YoutubeChannels,
        description: "Videos discovered across every scan",
        sql: "SELECT COUNT(*) FROM videos",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "youtube.channel_count",
        store: Store::YoutubeChannels,
        description: "Channels on the scan roster",
        sql: "SELECT COUNT(*) FROM channels",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
];
