use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::{MatchStats, PlayerStats};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read match stats: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid match CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid match JSON data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads match stats exported by the match-stats collaborator.
pub struct MatchImporter;

impl MatchImporter {
    /// One header row, then one row per participant in roster order.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        game_id: u64,
        duration_secs: u32,
    ) -> Result<MatchStats, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut players = Vec::new();
        for record in csv_reader.deserialize::<PlayerStats>() {
            players.push(record?);
        }

        Ok(MatchStats {
            game_id,
            duration_secs,
            players,
        })
    }

    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        game_id: u64,
        duration_secs: u32,
    ) -> Result<MatchStats, ImportError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file, game_id, duration_secs)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<MatchStats, ImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<MatchStats, ImportError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }
}
