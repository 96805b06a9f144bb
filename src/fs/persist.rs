use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;

use crate::{
    candidates::{BoundedRankedSet, Candidate},
    error::{Result, ResultError},
    network::{EdgeSet, NodeSet},
    result::ResultCollection,
    statistics::{RunLog, RunRecord},
};

const FORMAT_TAG: &str = "netresult";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format: &'a str,
    version: u32,
    nodes: &'a NodeSet,
    capacity: usize,
    candidates: Vec<StoredCandidateRef<'a>>,
    runs: &'a RunLog,
}

#[derive(Serialize)]
struct StoredCandidateRef<'a> {
    edges: &'a EdgeSet,
    score: f64,
}

#[derive(Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    nodes: NodeSet,
    capacity: usize,
    candidates: Vec<StoredCandidate>,
    runs: Vec<RunRecord>,
}

#[derive(Deserialize)]
struct StoredCandidate {
    edges: EdgeSet,
    score: f64,
}

impl ResultCollection {
    /// Writes the whole collection (node set, candidates worst first, runs) as JSON.
    ///
    /// # Errors
    /// - [`ResultError::Serialization`] if a value has no JSON form, e.g. a run that
    ///   started before the Unix epoch.
    /// - [`ResultError::Io`] if writing fails.
    pub fn persist<W: Write>(&self, writer: W) -> Result<()> {
        let envelope = EnvelopeRef {
            format: FORMAT_TAG,
            version: FORMAT_VERSION,
            nodes: self.nodes(),
            capacity: self.capacity(),
            candidates: self
                .candidates()
                .map(|c| StoredCandidateRef {
                    edges: c.edges(),
                    score: c.score(),
                })
                .collect(),
            runs: self.runs(),
        };

        let mut writer = BufWriter::new(writer);
        serde_json::to_writer(&mut writer, &envelope).map_err(|err| {
            if err.is_io() {
                ResultError::Io(err.into())
            } else {
                ResultError::Serialization(err.to_string())
            }
        })?;
        writer.flush()?;
        Ok(())
    }

    /// Rebuilds a collection written by [`ResultCollection::persist`].
    ///
    /// # Errors
    /// - [`ResultError::Io`] if reading fails.
    /// - [`ResultError::CorruptData`] if the stream is not a persisted collection or
    ///   describes one that breaks the collection invariants.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let envelope: Envelope =
            serde_json::from_reader(BufReader::new(reader)).map_err(|err| {
                if err.is_io() {
                    ResultError::Io(err.into())
                } else {
                    ResultError::corrupt(err.to_string())
                }
            })?;

        if envelope.format != FORMAT_TAG {
            return Err(ResultError::corrupt(format!(
                "unexpected format tag {:?}",
                envelope.format
            )));
        }
        if envelope.version != FORMAT_VERSION {
            return Err(ResultError::corrupt(format!(
                "unsupported format version {}",
                envelope.version
            )));
        }
        if let Some(pos) = envelope.runs.iter().position(|r| !r.is_consistent()) {
            return Err(ResultError::corrupt(format!("run {pos} ends before it starts")));
        }

        // a single node set shared by every candidate, as when the collection was filled
        let nodes = Arc::new(envelope.nodes);
        let members = envelope
            .candidates
            .into_iter()
            .map(|stored| {
                Candidate::new(Arc::clone(&nodes), stored.edges, stored.score)
                    .map_err(|err| ResultError::corrupt(err.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        let ranked = BoundedRankedSet::from_sorted(envelope.capacity, members)?;

        Ok(ResultCollection::from_parts(
            nodes,
            ranked,
            RunLog::from_records(envelope.runs),
        ))
    }

    /// Persists to `path`, going through a temporary file in the same directory so an
    /// interrupted write never leaves a truncated result behind. The temporary file is
    /// removed when any step fails.
    pub fn persist_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        self.persist(tmp.as_file())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|err| ResultError::Io(err.error))?;

        info!(
            path = %path.display(),
            candidates = self.len(),
            runs = self.runs().len(),
            "persisted result collection"
        );
        Ok(())
    }

    /// # Errors
    /// [`ResultError::NotFound`] if nothing exists at `path`, otherwise as
    /// [`ResultCollection::load`].
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ResultError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ResultError::Io(err),
        })?;

        let result = Self::load(file).map_err(|err| match err {
            ResultError::CorruptData { reason } => {
                ResultError::corrupt(format!("{}: {reason}", path.display()))
            }
            other => other,
        })?;

        info!(
            path = %path.display(),
            candidates = result.len(),
            runs = result.runs().len(),
            "loaded result collection"
        );
        Ok(result)
    }
}
