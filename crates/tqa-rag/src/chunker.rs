//! Splitting cleaned documents into overlapping word-window chunks

use serde::{Deserialize, Serialize};

use tqa_core::{Chunk, CourseDocument, Error, ForumThread, Origin, Result};

/// Configuration for the word-window chunker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum words per chunk
    pub max_words: usize,
    /// Words shared between consecutive chunks of the same document
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_words: 300,
            overlap: 50,
        }
    }
}

impl ChunkerConfig {
    fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            return Err(Error::InvalidInput("max_words must be positive".to_string()));
        }
        if self.overlap >= self.max_words {
            return Err(Error::InvalidInput(format!(
                "overlap ({}) must be smaller than max_words ({})",
                self.overlap, self.max_words
            )));
        }
        Ok(())
    }
}

/// Split text into word windows of at most `max_words` words, each window
/// starting `max_words - overlap` words after the previous one.
///
/// The last window may be shorter than `max_words`. Empty input yields an
/// empty sequence: there is no word to place in a window, so no chunk is
/// emitted.
pub fn split_into_chunks(text: &str, config: &ChunkerConfig) -> Result<Vec<String>> {
    config.validate()?;

    let words: Vec<&str> = text.split_whitespace().collect();
    let stride = config.max_words - config.overlap;
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < words.len() {
        let end = (i + config.max_words).min(words.len());
        chunks.push(words[i..end].join(" "));
        i += stride;
    }

    Ok(chunks)
}

/// Chunk cleaned course sections, tagging each chunk `course:<title>#<i>`
pub fn course_chunks(documents: &[CourseDocument], config: &ChunkerConfig) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();

    for document in documents {
        let section_chunks = split_into_chunks(&document.content, config)?;
        for (i, text) in section_chunks.into_iter().enumerate() {
            chunks.push(Chunk::new(Origin::Course, &document.title, i, text));
        }
    }

    Ok(chunks)
}

/// Chunk forum threads, tagging each chunk `forum:<title>#<i>`.
///
/// A thread is flattened to one `"<username>: <post text>"` line per post
/// (posts with empty text are skipped), newline-joined, and chunked as a
/// single unit so replies stay in context with the posts they answer.
pub fn forum_chunks(threads: &[ForumThread], config: &ChunkerConfig) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();

    for thread in threads {
        let all_text = thread
            .discussion
            .iter()
            .filter(|post| !post.text.is_empty())
            .map(|post| format!("{}: {}", post.username, post.text))
            .collect::<Vec<_>>()
            .join("\n");

        let thread_chunks = split_into_chunks(&all_text, config)?;
        for (i, text) in thread_chunks.into_iter().enumerate() {
            chunks.push(Chunk::new(Origin::Forum, &thread.title, i, text));
        }
    }

    Ok(chunks)
}

/// Chunk the full corpus: course sections first, then forum threads
pub fn chunk_corpus(
    documents: &[CourseDocument],
    threads: &[ForumThread],
    config: &ChunkerConfig,
) -> Result<Vec<Chunk>> {
    let mut chunks = course_chunks(documents, config)?;
    chunks.extend(forum_chunks(threads, config)?);
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tqa_core::ForumPost;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    fn config(max_words: usize, overlap: usize) -> ChunkerConfig {
        ChunkerConfig { max_words, overlap }
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunks = split_into_chunks("", &ChunkerConfig::default()).unwrap();
        assert!(chunks.is_empty());

        let chunks = split_into_chunks("   \n\t ", &ChunkerConfig::default()).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split_into_chunks("just a few words", &ChunkerConfig::default()).unwrap();
        assert_eq!(chunks, vec!["just a few words".to_string()]);
    }

    #[test]
    fn chunk_sizing() {
        // 250 words, windows of 100 with stride 70: offsets 0, 70, 140, 210
        let text = words(250);
        let chunks = split_into_chunks(&text, &config(100, 30)).unwrap();
        assert_eq!(chunks.len(), 4);

        let counts: Vec<usize> = chunks.iter().map(|c| c.split_whitespace().count()).collect();
        assert_eq!(counts, vec![100, 100, 100, 40]);
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let text = words(500);
        let cfg = config(100, 30);
        let chunks = split_into_chunks(&text, &cfg).unwrap();

        for pair in chunks.windows(2) {
            let left: Vec<&str> = pair[0].split_whitespace().collect();
            let right: Vec<&str> = pair[1].split_whitespace().collect();
            if left.len() == cfg.max_words && right.len() >= cfg.overlap {
                assert_eq!(left[left.len() - cfg.overlap..], right[..cfg.overlap]);
            }
        }
    }

    #[test]
    fn chunks_cover_the_whole_input_in_order() {
        let text = words(731);
        let cfg = config(100, 30);
        let chunks = split_into_chunks(&text, &cfg).unwrap();
        let stride = cfg.max_words - cfg.overlap;

        // Each chunk starts `stride` words after the previous one, so taking
        // the first `stride` words of every chunk (all of the last) yields
        // the original word sequence with overlaps removed.
        let mut reconstructed: Vec<String> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let chunk_words: Vec<&str> = chunk.split_whitespace().collect();
            let take = if i + 1 == chunks.len() { chunk_words.len() } else { stride };
            reconstructed.extend(chunk_words[..take].iter().map(|w| w.to_string()));
        }
        let original: Vec<String> = text.split_whitespace().map(|w| w.to_string()).collect();
        assert_eq!(reconstructed, original);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(split_into_chunks("a b c", &config(0, 0)).is_err());
        assert!(split_into_chunks("a b c", &config(10, 10)).is_err());
        assert!(split_into_chunks("a b c", &config(10, 20)).is_err());
    }

    #[test]
    fn course_chunks_are_tagged_sequentially() {
        let documents = vec![
            CourseDocument {
                title: "Docker".to_string(),
                slug: "docker".to_string(),
                content: words(150),
            },
            CourseDocument {
                title: "Git".to_string(),
                slug: "git".to_string(),
                content: words(10),
            },
        ];

        let chunks = course_chunks(&documents, &config(100, 30)).unwrap();
        let sources: Vec<&str> = chunks.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["course:Docker#0", "course:Docker#1", "course:Git#0"]);
    }

    #[test]
    fn forum_thread_flattens_posts_and_skips_empty_ones() {
        let threads = vec![ForumThread {
            title: "GA2 deadline".to_string(),
            discussion: vec![
                ForumPost {
                    username: "alice".to_string(),
                    text: "When is GA2 due?".to_string(),
                },
                ForumPost {
                    username: "ghost".to_string(),
                    text: "".to_string(),
                },
                ForumPost {
                    username: "bob".to_string(),
                    text: "Friday midnight.".to_string(),
                },
            ],
        }];

        let chunks = forum_chunks(&threads, &ChunkerConfig::default()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source, "forum:GA2 deadline#0");
        assert_eq!(chunks[0].text, "alice: When is GA2 due? bob: Friday midnight.");
    }

    #[test]
    fn empty_thread_yields_no_chunks() {
        let threads = vec![ForumThread {
            title: "silence".to_string(),
            discussion: vec![],
        }];
        let chunks = forum_chunks(&threads, &ChunkerConfig::default()).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn corpus_orders_course_before_forum() {
        let documents = vec![CourseDocument {
            title: "Docker".to_string(),
            slug: String::new(),
            content: "Docker is a containerization tool".to_string(),
        }];
        let threads = vec![ForumThread {
            title: "help".to_string(),
            discussion: vec![ForumPost {
                username: "alice".to_string(),
                text: "how do I install docker".to_string(),
            }],
        }];

        let chunks = chunk_corpus(&documents, &threads, &ChunkerConfig::default()).unwrap();
        let sources: Vec<&str> = chunks.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["course:Docker#0", "forum:help#0"]);
    }
}
