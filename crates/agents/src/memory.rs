use rail_gameroom::OpponentMemory;
use rail_gameroom::ProfileView;
use rail_records::HandExport;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Append-only JSONL sink for completed hands.
///
/// The optional persistence hook behind the opponent-memory port: one
/// hand export per line, written after settlement. Profiling is left to
/// external tooling over the file; `profile` reports nothing.
#[derive(Debug)]
pub struct JsonlMemory {
    path: PathBuf,
    file: Mutex<std::fs::File>,
}

impl JsonlMemory {
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait::async_trait]
impl OpponentMemory for JsonlMemory {
    async fn record_hand(&self, hand: &HandExport) -> anyhow::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("memory file lock poisoned"))?;
        writeln!(file, "{}", hand.to_json())?;
        Ok(())
    }
    async fn profile(&self, _: &str) -> anyhow::Result<Option<ProfileView>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export() -> HandExport {
        HandExport {
            hand_id: 1,
            started_at: 0,
            seed: 9,
            blinds: (1, 2),
            ante: 0,
            button_seat: 0,
            players: Vec::new(),
            actions: Vec::new(),
            board: Vec::new(),
            pots: Vec::new(),
            aborted: false,
        }
    }

    #[tokio::test]
    async fn appends_one_line_per_hand() {
        let path = std::env::temp_dir().join(format!("railbird-mem-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let memory = JsonlMemory::open(path.clone()).unwrap();
        memory.record_hand(&export()).await.unwrap();
        memory.record_hand(&export()).await.unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().all(|l| l.contains("\"seed\":9")));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn profile_is_empty() {
        let path = std::env::temp_dir().join(format!("railbird-prof-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let memory = JsonlMemory::open(path.clone()).unwrap();
        assert!(memory.profile("villain").await.unwrap().is_none());
        let _ = std::fs::remove_file(&path);
    }
}
