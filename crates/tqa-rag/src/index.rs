//! Flat (exhaustive) L2 nearest-neighbor index with binary persistence

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tqa_core::{Error, Result};

/// File magic for the persisted index format
const MAGIC: &[u8; 8] = b"TQAINDEX";
/// Persisted format version
const FORMAT_VERSION: u32 = 1;

/// An exact nearest-neighbor index over fixed-dimension `f32` vectors.
///
/// Search is exhaustive squared-L2, linear in the number of vectors; there
/// is no approximate structure and no clustering, so results are exact. The
/// vector at position `i` corresponds to the chunk and metadata entry at
/// position `i` — the index is append-only during construction and
/// read-only afterwards, and the only supported mutation is a full rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    model_id: String,
    dimension: usize,
    /// Row-major vector data, `len * dimension` values
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimension
    pub fn new(model_id: impl Into<String>, dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::Index("vector dimension must be positive".to_string()));
        }
        Ok(Self {
            model_id: model_id.into(),
            dimension,
            data: Vec::new(),
        })
    }

    /// Build an index from a non-empty batch of vectors, inferring the
    /// dimension from the first vector
    pub fn from_vectors(model_id: impl Into<String>, vectors: &[Vec<f32>]) -> Result<Self> {
        let first = vectors
            .first()
            .ok_or_else(|| Error::Index("cannot build an index from zero vectors".to_string()))?;

        let mut index = Self::new(model_id, first.len())?;
        index.add_batch(vectors)?;
        Ok(index)
    }

    /// Append vectors in order; a dimension mismatch aborts without
    /// appending anything
    pub fn add_batch(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        for (i, vector) in vectors.iter().enumerate() {
            if vector.len() != self.dimension {
                return Err(Error::Index(format!(
                    "vector {} has dimension {}, index expects {}",
                    i,
                    vector.len(),
                    self.dimension
                )));
            }
        }
        for vector in vectors {
            self.data.extend_from_slice(vector);
        }
        Ok(())
    }

    /// Number of vectors in the index
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Whether the index holds no vectors
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vector dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Identifier of the embedding model the vectors came from
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn vector(&self, i: usize) -> &[f32] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Return up to `k` `(position, squared_distance)` pairs ranked by
    /// ascending distance; equal distances rank by lower position
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dimension {
            return Err(Error::Index(format!(
                "query has dimension {}, index expects {}",
                query.len(),
                self.dimension
            )));
        }

        let mut hits: Vec<(usize, f32)> = (0..self.len())
            .map(|i| (i, squared_l2(query, self.vector(i))))
            .collect();

        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        hits.truncate(k);
        Ok(hits)
    }

    /// Write the index to disk, overwriting any existing file.
    ///
    /// Layout: magic, format version, model id, dimension, vector count,
    /// then the row-major `f32` payload, all little-endian.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(MAGIC)?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;

        let model_bytes = self.model_id.as_bytes();
        writer.write_all(&(model_bytes.len() as u32).to_le_bytes())?;
        writer.write_all(model_bytes)?;

        writer.write_all(&(self.dimension as u64).to_le_bytes())?;
        writer.write_all(&(self.len() as u64).to_le_bytes())?;

        for value in &self.data {
            writer.write_all(&value.to_le_bytes())?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Read an index back from disk, validating the header and payload
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Index(format!("cannot open index file {}: {}", path.display(), e))
        })?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 8];
        read_exact(&mut reader, &mut magic, path)?;
        if &magic != MAGIC {
            return Err(Error::Index(format!(
                "{} is not an index file (bad magic)",
                path.display()
            )));
        }

        let version = read_u32(&mut reader, path)?;
        if version != FORMAT_VERSION {
            return Err(Error::Index(format!(
                "unsupported index format version {} in {}",
                version,
                path.display()
            )));
        }

        let model_len = read_u32(&mut reader, path)? as usize;
        let mut model_bytes = vec![0u8; model_len];
        read_exact(&mut reader, &mut model_bytes, path)?;
        let model_id = String::from_utf8(model_bytes)
            .map_err(|_| Error::Index(format!("invalid model id in {}", path.display())))?;

        let dimension = read_u64(&mut reader, path)? as usize;
        let count = read_u64(&mut reader, path)? as usize;
        if dimension == 0 {
            return Err(Error::Index(format!(
                "index {} declares zero dimension",
                path.display()
            )));
        }

        let value_count = dimension.checked_mul(count).ok_or_else(|| {
            Error::Index(format!("index {} declares an oversized payload", path.display()))
        })?;

        let mut data = Vec::with_capacity(value_count);
        let mut buf = [0u8; 4];
        for _ in 0..value_count {
            read_exact(&mut reader, &mut buf, path)?;
            let value = f32::from_le_bytes(buf);
            if !value.is_finite() {
                return Err(Error::Index(format!(
                    "index {} contains non-finite values",
                    path.display()
                )));
            }
            data.push(value);
        }

        // Trailing bytes mean the file does not match its header
        let mut trailing = [0u8; 1];
        if reader.read(&mut trailing)? != 0 {
            return Err(Error::Index(format!(
                "index {} has trailing data beyond the declared payload",
                path.display()
            )));
        }

        Ok(Self {
            model_id,
            dimension,
            data,
        })
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn read_exact(reader: &mut impl Read, buf: &mut [u8], path: &Path) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        Error::Index(format!("truncated index file {}: {}", path.display(), e))
    })
}

fn read_u32(reader: &mut impl Read, path: &Path) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf, path)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64(reader: &mut impl Read, path: &Path) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_exact(reader, &mut buf, path)?;
    Ok(u64::from_le_bytes(buf))
}
