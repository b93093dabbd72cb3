use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::Result;

/// The closed set of databases the dashboard reads. Each one is produced by
/// a different upstream service and lands as a single file in the data
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    CronLog,
    UsageTracking,
    ContentIdeas,
    KnowledgeBase,
    JobMarket,
    YoutubeChannels,
    Briefings,
    ProjectHub,
    TwitterTrends,
    Crm,
    MealPlanning,
    ChoreSchedule,
}

impl Store {
    pub const ALL: [Store; 12] = [
        Store::CronLog,
        Store::UsageTracking,
        Store::ContentIdeas,
        Store::KnowledgeBase,
        Store::JobMarket,
        Store::YoutubeChannels,
        Store::Briefings,
        Store::ProjectHub,
        Store::TwitterTrends,
        Store::Crm,
        Store::MealPlanning,
        Store::ChoreSchedule,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Store::CronLog => "cron_log",
            Store::UsageTracking => "usage_tracking",
            Store::ContentIdeas => "content_ideas",
            Store::KnowledgeBase => "knowledge_base",
            Store::JobMarket => "job_market",
            Store::YoutubeChannels => "youtube_channels",
            Store::Briefings => "briefings",
            Store::ProjectHub => "projecthub",
            Store::TwitterTrends => "twitter_trends",
            Store::Crm => "crm",
            Store::MealPlanning => "meal_planning",
            Store::ChoreSchedule => "chore_schedule",
        }
    }

    pub fn from_name(name: &str) -> Option<Store> {
        Store::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Producer convention: `<store name>.db`.
    pub fn default_filename(self) -> String {
        format!("{}.db", self.name())
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps stores to files under one data directory and opens read-only
/// handles to them.
#[derive(Debug, Clone, Default)]
pub struct StoreCatalog {
    base_dir: PathBuf,
    filenames: HashMap<Store, String>,
}

impl StoreCatalog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        StoreCatalog {
            base_dir: base_dir.into(),
            filenames: HashMap::new(),
        }
    }

    /// Override the filename for one store.
    pub fn with_filename(mut self, store: Store, filename: impl Into<String>) -> Self {
        self.filenames.insert(store, filename.into());
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, store: Store) -> PathBuf {
        match self.filenames.get(&store) {
            Some(name) => self.base_dir.join(name),
            None => self.base_dir.join(store.default_filename()),
        }
    }

    /// Open a read-only handle to a store, or `None` when its file is
    /// absent. The immutable URI keeps SQLite from taking any lock, so a
    /// producer mid-write is never blocked by a dashboard read.
    pub fn open(&self, store: Store) -> Result<Option<Connection>> {
        let path = self.path_for(store);
        if !path.exists() {
            return Ok(None);
        }
        let uri = format!("file:{}?nolock=1&immutable=1", path.display());
        let conn = Connection::open_with_flags(
            uri,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Some(conn))
    }
}
