//! Topic-partitioned paper store.
//!
//! Layout on disk:
//!
//! ```text
//! <papers_dir>/
//!   quantum_computing/
//!     papers_info.json      { "<id>": { title, authors, summary, pdf_url, published } }
//!   graph_neural_networks/
//!     papers_info.json
//! ```
//!
//! Each namespace is read, merged and rewritten as a whole. Writes go to a
//! sibling temp file that is renamed over `papers_info.json`, so a reader
//! sees either the previous or the next mapping. A single writer is assumed;
//! concurrent upserts to one topic race and the last rename wins.

mod index;

pub use index::Lookup;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::storage::PAPERS_FILE;
use crate::error::{StoreError, StoreResult, ToolResult};
use crate::models::{PaperMap, PaperRecord, RawSearchResult, TopicName};

/// Suffix given to an unparseable papers file before it is replaced,
/// followed by a timestamp.
const QUARANTINE_EXTENSION: &str = "json.corrupt";

/// Suffix of the temp file used for atomic replacement.
const TEMP_EXTENSION: &str = "json.tmp";

/// Persistent store of paper records, one namespace per topic.
#[derive(Debug, Clone)]
pub struct TopicStore {
    root: PathBuf,
}

impl TopicStore {
    /// Create a store rooted at `root`. Nothing is created until the first upsert.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The papers root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of one namespace.
    #[must_use]
    pub fn topic_dir(&self, topic: &TopicName) -> PathBuf {
        self.root.join(topic.as_str())
    }

    /// `papers_info.json` of one namespace.
    #[must_use]
    pub fn papers_file(&self, topic: &TopicName) -> PathBuf {
        self.topic_dir(topic).join(PAPERS_FILE)
    }

    /// Load a namespace's mapping, restoring each record's id from its key.
    pub async fn load(&self, topic: &TopicName) -> StoreResult<PaperMap> {
        let path = self.papers_file(topic);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::Missing { path }),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let papers: PaperMap = match serde_json::from_slice(&bytes) {
            Ok(papers) => papers,
            Err(source) => return Err(StoreError::Corrupt { path, source }),
        };

        Ok(papers.into_iter().map(|(id, record)| (id.clone(), record.with_id(id))).collect())
    }

    /// Merge search results into a topic's namespace.
    ///
    /// All results are validated before storage is touched, so one malformed
    /// result fails the call without writing anything. Existing records with
    /// the same id are replaced wholesale. Returns the ids in input order.
    pub async fn upsert(&self, topic: &str, results: Vec<RawSearchResult>) -> ToolResult<Vec<String>> {
        let topic = TopicName::new(topic)?;
        let records = results
            .into_iter()
            .map(PaperRecord::try_from)
            .collect::<ToolResult<Vec<_>>>()?;

        let dir = self.topic_dir(&topic);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| StoreError::io(&dir, e))?;

        let mut papers = match self.load(&topic).await {
            Ok(papers) => papers,
            Err(StoreError::Missing { .. }) => PaperMap::new(),
            Err(StoreError::Corrupt { path, source }) => {
                tracing::warn!(
                    topic = %topic,
                    path = %path.display(),
                    error = %source,
                    "Papers file is corrupt, starting from an empty namespace"
                );
                if let Err(e) = quarantine(&path).await {
                    tracing::warn!(topic = %topic, error = %e, "Could not move corrupt papers file aside");
                }
                PaperMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(record.id.clone());
            papers.insert(record.id.clone(), record);
        }

        let path = self.write(&topic, &papers).await?;
        tracing::info!(
            topic = %topic,
            path = %path.display(),
            stored = ids.len(),
            total = papers.len(),
            "Results are saved"
        );

        Ok(ids)
    }

    async fn write(&self, topic: &TopicName, papers: &PaperMap) -> StoreResult<PathBuf> {
        let path = self.papers_file(topic);
        let tmp = path.with_extension(TEMP_EXTENSION);

        let json = serde_json::to_string_pretty(papers)
            .map_err(|source| StoreError::Serialize { path: path.clone(), source })?;

        tokio::fs::write(&tmp, json).await.map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| StoreError::io(&path, e))?;

        Ok(path)
    }
}

/// Move a corrupt papers file aside so the next write does not destroy it.
///
/// Every quarantined copy gets its own timestamped name; earlier copies are
/// never replaced.
async fn quarantine(path: &Path) -> StoreResult<PathBuf> {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f").to_string();
    let mut target = path.with_extension(format!("{QUARANTINE_EXTENSION}-{stamp}"));
    let mut attempt = 1u32;
    while tokio::fs::try_exists(&target).await.map_err(|e| StoreError::io(&target, e))? {
        target = path.with_extension(format!("{QUARANTINE_EXTENSION}-{stamp}-{attempt}"));
        attempt += 1;
    }

    tokio::fs::rename(path, &target).await.map_err(|e| StoreError::io(path, e))?;
    tracing::warn!(path = %target.display(), "Corrupt papers file moved aside");
    Ok(target)
}
