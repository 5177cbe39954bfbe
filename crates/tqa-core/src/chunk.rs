//! Chunk and cleaned-document types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a chunk originated: course material or a forum thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Course,
    Forum,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Course => write!(f, "course"),
            Origin::Forum => write!(f, "forum"),
        }
    }
}

/// A bounded word-window of source text with its provenance tag.
///
/// `source` has the form `"<origin>:<title>#<index>"` where `index` is the
/// zero-based position of the chunk within its parent document. The position
/// of a chunk in the persisted chunk sequence is the implicit key joining it
/// to its embedding vector and metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub source: String,
    pub text: String,
}

impl Chunk {
    /// Create a chunk tagged with its origin, parent title, and position
    pub fn new(origin: Origin, title: &str, index: usize, text: String) -> Self {
        Self {
            source: format!("{}:{}#{}", origin, title, index),
            text,
        }
    }
}

fn default_title() -> String {
    "Untitled".to_string()
}

/// A cleaned course section, as produced by the content-cleaning collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDocument {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: String,
}

/// A single post within a forum thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
}

/// A cleaned forum thread, as produced by the forum-cleaning collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumThread {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub discussion: Vec<ForumPost>,
}
