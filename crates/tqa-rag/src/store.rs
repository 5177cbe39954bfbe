//! Flat-file artifact store: chunk sequence, metadata sequence, paths

use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tqa_core::{Chunk, CourseDocument, Error, ForumThread, Result};

/// Locations of the three persisted retrieval artifacts plus the cleaned
/// input collections.
///
/// The chunk store, index, and metadata store are positionally aligned:
/// entry `i` in each describes the same logical chunk. They are always
/// rewritten together by a full rebuild.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub chunks: PathBuf,
    pub index: PathBuf,
    pub metadata: PathBuf,
    pub course_input: PathBuf,
    pub forum_input: PathBuf,
}

impl Default for StorePaths {
    fn default() -> Self {
        Self {
            chunks: PathBuf::from("data/chunks/chunks.json"),
            index: PathBuf::from("data/index/chunks.index"),
            metadata: PathBuf::from("data/metadata/metadata.json"),
            course_input: PathBuf::from("data/processed/course_content_clean.json"),
            forum_input: PathBuf::from("data/processed/forum_posts_clean.json"),
        }
    }
}

impl StorePaths {
    /// Default paths with environment-variable overrides
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut paths = Self::default();
        if let Ok(p) = env::var("TQA_CHUNKS_FILE") {
            paths.chunks = PathBuf::from(p);
        }
        if let Ok(p) = env::var("TQA_INDEX_FILE") {
            paths.index = PathBuf::from(p);
        }
        if let Ok(p) = env::var("TQA_METADATA_FILE") {
            paths.metadata = PathBuf::from(p);
        }
        if let Ok(p) = env::var("TQA_COURSE_FILE") {
            paths.course_input = PathBuf::from(p);
        }
        if let Ok(p) = env::var("TQA_FORUM_FILE") {
            paths.forum_input = PathBuf::from(p);
        }
        paths
    }

    /// Root all paths under a directory (used by tests)
    pub fn under(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            chunks: dir.join("chunks/chunks.json"),
            index: dir.join("index/chunks.index"),
            metadata: dir.join("metadata/metadata.json"),
            course_input: dir.join("processed/course_content_clean.json"),
            forum_input: dir.join("processed/forum_posts_clean.json"),
        }
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        Error::ChunkStore(format!("cannot open {} file {}: {}", what, path.display(), e))
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        Error::ChunkStore(format!("malformed {} file {}: {}", what, path.display(), e))
    })
}

/// Write the ordered chunk sequence; insertion order is significant
pub fn save_chunks(path: impl AsRef<Path>, chunks: &[Chunk]) -> Result<()> {
    write_json(path.as_ref(), chunks)
}

/// Load the ordered chunk sequence
pub fn load_chunks(path: impl AsRef<Path>) -> Result<Vec<Chunk>> {
    read_json(path.as_ref(), "chunk")
}

/// Write the ordered source-tag sequence
pub fn save_metadata(path: impl AsRef<Path>, metadata: &[String]) -> Result<()> {
    write_json(path.as_ref(), metadata)
}

/// Load the ordered source-tag sequence
pub fn load_metadata(path: impl AsRef<Path>) -> Result<Vec<String>> {
    read_json(path.as_ref(), "metadata")
}

/// Load cleaned course sections produced by the content-cleaning collaborator
pub fn load_course_documents(path: impl AsRef<Path>) -> Result<Vec<CourseDocument>> {
    read_json(path.as_ref(), "course content")
}

/// Load cleaned forum threads produced by the forum-cleaning collaborator
pub fn load_forum_threads(path: impl AsRef<Path>) -> Result<Vec<ForumThread>> {
    read_json(path.as_ref(), "forum posts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tqa_core::Origin;

    #[test]
    fn chunk_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks/chunks.json");

        let chunks = vec![
            Chunk::new(Origin::Course, "Docker", 0, "first".to_string()),
            Chunk::new(Origin::Course, "Docker", 1, "second".to_string()),
            Chunk::new(Origin::Forum, "help", 0, "third".to_string()),
        ];

        save_chunks(&path, &chunks).unwrap();
        let loaded = load_chunks(&path).unwrap();
        assert_eq!(loaded, chunks);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_chunks(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::ChunkStore(_)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.json");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();
        let err = load_chunks(&path).unwrap_err();
        assert!(matches!(err, Error::ChunkStore(_)));
    }

    #[test]
    fn course_input_tolerates_missing_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        std::fs::write(&path, r#"[{"content": "some course text"}]"#).unwrap();

        let docs = load_course_documents(&path).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Untitled");
        assert_eq!(docs[0].slug, "");
    }
}
