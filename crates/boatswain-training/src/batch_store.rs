use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use crate::example::TrainingExample;

/// Failure while persisting or recalling one run batch.
///
/// An unreadable batch only costs the examples of that run; callers skip
/// the run and report it rather than aborting a training round.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum BatchStoreError {
    #[display("batch I/O failed: {_0}")]
    Io(io::Error),
    #[display("batch JSON is invalid: {_0}")]
    Json(serde_json::Error),
}

/// Per-run persistence of training examples, one batch per completed run.
pub trait BatchStore {
    fn save_batch(&mut self, run: u64, examples: &[TrainingExample]) -> Result<(), BatchStoreError>;

    fn load_batch(&self, run: u64) -> Result<Vec<TrainingExample>, BatchStoreError>;
}

/// Stores each run batch as a pretty-printed JSON file `run_<n>.json`
/// under a data directory.
#[derive(Debug, Clone)]
pub struct JsonBatchStore {
    dir: PathBuf,
}

impl JsonBatchStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, BatchStoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn batch_path(&self, run: u64) -> PathBuf {
        self.dir.join(format!("run_{run}.json"))
    }
}

impl BatchStore for JsonBatchStore {
    fn save_batch(&mut self, run: u64, examples: &[TrainingExample]) -> Result<(), BatchStoreError> {
        let file = File::create(self.batch_path(run))?;
        serde_json::to_writer_pretty(BufWriter::new(file), examples)?;
        Ok(())
    }

    fn load_batch(&self, run: u64) -> Result<Vec<TrainingExample>, BatchStoreError> {
        let file = File::open(self.batch_path(run))?;
        let examples = serde_json::from_reader(BufReader::new(file))?;
        Ok(examples)
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBatchStore {
    batches: HashMap<u64, Vec<TrainingExample>>,
}

impl MemoryBatchStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BatchStore for MemoryBatchStore {
    fn save_batch(&mut self, run: u64, examples: &[TrainingExample]) -> Result<(), BatchStoreError> {
        self.batches.insert(run, examples.to_vec());
        Ok(())
    }

    fn load_batch(&self, run: u64) -> Result<Vec<TrainingExample>, BatchStoreError> {
        self.batches.get(&run).cloned().ok_or_else(|| {
            BatchStoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no batch recorded for run {run}"),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use boatswain_engine::{Board, score_plane};

    use super::*;

    fn sample_batch() -> Vec<TrainingExample> {
        let board = Board::from_ascii(
            "
            666.....
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let plane = board.plane(6);
        vec![TrainingExample::new(plane, score_plane(&plane))]
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryBatchStore::new();
        let batch = sample_batch();
        store.save_batch(3, &batch).unwrap();
        assert_eq!(store.load_batch(3).unwrap(), batch);
        assert!(matches!(
            store.load_batch(4),
            Err(BatchStoreError::Io(_))
        ));
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "boatswain-batch-store-{}",
            std::process::id()
        ));
        let mut store = JsonBatchStore::open(&dir).unwrap();
        let batch = sample_batch();
        store.save_batch(7, &batch).unwrap();
        assert_eq!(store.load_batch(7).unwrap(), batch);
        assert!(store.load_batch(8).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
