use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use gridfall_engine::{HIGH_SCORE_KEY, ScoreStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScoreRecord {
    high_score: u64,
    updated_at: DateTime<Utc>,
}

/// High-score persistence in a small JSON file.
///
/// The file is read once when the store opens; a missing or unreadable file
/// starts from an empty record. Writes are best-effort: the store sits behind
/// a fullscreen terminal UI, so a failed write is dropped instead of being
/// surfaced mid-game, and the next high score retries.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    record: Option<ScoreRecord>,
}

impl FileScoreStore {
    pub fn open(path: PathBuf) -> Self {
        let record = Self::read(&path).ok();
        Self { path, record }
    }

    fn read(path: &Path) -> anyhow::Result<ScoreRecord> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open score file: {}", path.display()))?;
        let record = serde_json::from_reader(io::BufReader::new(file))
            .with_context(|| format!("Failed to parse score file: {}", path.display()))?;
        Ok(record)
    }

    fn write(&self, record: &ScoreRecord) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create score file: {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, record)
            .with_context(|| format!("Failed to write JSON to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush score file: {}", self.path.display()))?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self, key: &str) -> Option<u64> {
        if key != HIGH_SCORE_KEY {
            return None;
        }
        self.record.as_ref().map(|record| record.high_score)
    }

    fn set(&mut self, key: &str, value: u64) {
        if key != HIGH_SCORE_KEY {
            return;
        }
        let record = ScoreRecord {
            high_score: value,
            updated_at: Utc::now(),
        };
        _ = self.write(&record);
        self.record = Some(record);
    }
}
