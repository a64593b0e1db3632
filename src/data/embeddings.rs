// ============================================================
// Layer 4 — GloVe Embedding Loader
// ============================================================
// Reads a pretrained word-vector file and produces the two
// structures every later stage shares read-only:
//
//   EmbeddingTable — a dense rows × dim matrix of f32
//   Vocabulary     — token → row index
//
// File format (no header, one vector per line):
//
//   the 0.418 0.24968 -0.41242 ...
//   ,   0.013441 0.23682 -0.16899 ...
//
// Rows 0 (<PAD>) and 1 (<UNK>) are prepended before the first
// file line, so the first file token lands on index 2.
//
// Reference: Pennington et al. (2014) GloVe
//            Kim (2014) CNNs for Sentence Classification
//            (uniform [-0.25, 0.25] init for unknown words)

use std::{fmt, path::Path, str::FromStr};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    error::DataError,
    text::{read_text, TextEncoding},
    vocab::{SpecialToken, Vocabulary},
};

/// Half-width of the uniform range used for a random <UNK> row
const UNK_INIT_RANGE: f32 = 0.25;

/// How the <UNK> row of the table is initialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnkInit {
    /// Same zero vector as <PAD>
    Zero,
    /// Uniform in [-0.25, 0.25], drawn from the run seed
    #[default]
    Random,
}

impl FromStr for UnkInit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(UnkInit::Zero),
            "random" => Ok(UnkInit::Random),
            other => Err(format!("unknown <UNK> init '{other}' (expected zero or random)")),
        }
    }
}

impl fmt::Display for UnkInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnkInit::Zero => f.write_str("zero"),
            UnkInit::Random => f.write_str("random"),
        }
    }
}

// ─── EmbeddingTable ───────────────────────────────────────────────────────────
/// Row-major matrix of word vectors, one row per vocabulary index.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTable {
    dim:    usize,
    values: Vec<f32>,
}

impl EmbeddingTable {
    /// A table holding only the <PAD> and <UNK> rows
    pub fn with_reserved_rows(dim: usize, unk_init: UnkInit, seed: u64) -> Self {
        let mut values = vec![0.0f32; dim]; // <PAD>
        match unk_init {
            UnkInit::Zero => values.extend(std::iter::repeat(0.0).take(dim)),
            UnkInit::Random => {
                let mut rng = StdRng::seed_from_u64(seed);
                values.extend((0..dim).map(|_| rng.gen_range(-UNK_INIT_RANGE..=UNK_INIT_RANGE)));
            }
        }
        Self { dim, values }
    }

    fn push_row(&mut self, row: &[f32]) {
        debug_assert_eq!(row.len(), self.dim);
        self.values.extend_from_slice(row);
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rows(&self) -> usize {
        if self.dim == 0 { 0 } else { self.values.len() / self.dim }
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dim)?;
        self.values.get(start..start + self.dim)
    }

    /// All values, row after row
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

// ─── GloveLoader ──────────────────────────────────────────────────────────────
/// Loads a GloVe-format file into a table and vocabulary.
pub struct GloveLoader {
    dim:      usize,
    encoding: TextEncoding,
    unk_init: UnkInit,
    seed:     u64,
}

impl GloveLoader {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            encoding: TextEncoding::default(),
            unk_init: UnkInit::default(),
            seed:     0,
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_unk_init(mut self, unk_init: UnkInit, seed: u64) -> Self {
        self.unk_init = unk_init;
        self.seed = seed;
        self
    }

    /// Read and parse the file at `path`
    pub fn load(&self, path: &Path) -> Result<(EmbeddingTable, Vocabulary), DataError> {
        tracing::info!("Loading {}-d embeddings from '{}'", self.dim, path.display());
        let contents = read_text(path, self.encoding)?;
        let (table, vocab) = self.parse(&contents, path)?;
        tracing::info!(
            "Loaded {} vectors ({} rows incl. reserved)",
            vocab.len() - SpecialToken::ALL.len(),
            table.rows()
        );
        Ok((table, vocab))
    }

    /// Parse already-decoded file contents. `path` is only used in errors.
    pub fn parse(
        &self,
        contents: &str,
        path:     &Path,
    ) -> Result<(EmbeddingTable, Vocabulary), DataError> {
        let mut table = EmbeddingTable::with_reserved_rows(self.dim, self.unk_init, self.seed);
        let mut vocab = Vocabulary::new();
        let mut row   = Vec::with_capacity(self.dim);

        for (i, raw_line) in contents.lines().enumerate() {
            let line_no = i + 1;
            let line    = raw_line.trim_end();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split(' ');
            // split always yields at least one item
            let token = parts.next().unwrap_or_default();

            row.clear();
            for part in parts {
                let value = part.parse::<f32>().map_err(|_| DataError::InvalidComponent {
                    path:  path.to_path_buf(),
                    line:  line_no,
                    value: part.to_string(),
                })?;
                row.push(value);
            }
            if row.len() != self.dim {
                return Err(DataError::DimensionMismatch {
                    path:     path.to_path_buf(),
                    line:     line_no,
                    expected: self.dim,
                    found:    row.len(),
                });
            }

            if vocab.insert(token).is_none() {
                return Err(DataError::DuplicateToken {
                    path:  path.to_path_buf(),
                    line:  line_no,
                    token: token.to_string(),
                });
            }
            table.push_row(&row);
        }

        debug_assert_eq!(table.rows(), vocab.len());
        Ok((table, vocab))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GLOVE: &str = "good 0.1 0.2 0.3\nmovie -1 0.5 2\n";

    fn loader() -> GloveLoader {
        GloveLoader::new(3).with_unk_init(UnkInit::Zero, 0)
    }

    #[test]
    fn test_reserved_rows_come_first() {
        let (table, vocab) = loader().parse(GLOVE, Path::new("g.txt")).unwrap();
        assert_eq!(table.rows(), 4);
        assert_eq!(vocab.len(), 4);
        assert_eq!(table.row(0), Some(&[0.0, 0.0, 0.0][..]));
        assert_eq!(table.row(1), Some(&[0.0, 0.0, 0.0][..]));
        assert_eq!(vocab.get("good"), Some(2));
        assert_eq!(table.row(2), Some(&[0.1, 0.2, 0.3][..]));
        assert_eq!(vocab.get("movie"), Some(3));
        assert_eq!(table.row(3), Some(&[-1.0, 0.5, 2.0][..]));
        assert_eq!(table.row(4), None);
    }

    #[test]
    fn test_trailing_newlines_and_blank_lines_are_ignored() {
        let contents = "good 1 2 3\r\n\n  \nbad 4 5 6 \n";
        let (table, vocab) = loader().parse(contents, Path::new("g.txt")).unwrap();
        assert_eq!(vocab.len(), 4);
        assert_eq!(table.row(3), Some(&[4.0, 5.0, 6.0][..]));
    }

    #[test]
    fn test_wrong_dimension_is_rejected() {
        let err = loader()
            .parse("good 0.1 0.2\n", Path::new("g.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::DimensionMismatch { line: 1, expected: 3, found: 2, .. }
        ));
    }

    #[test]
    fn test_bad_component_is_rejected() {
        let err = loader()
            .parse("good 0.1 x 0.3\n", Path::new("g.txt"))
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidComponent { ref value, .. } if value == "x"));
    }

    #[test]
    fn test_duplicate_token_is_rejected() {
        let err = loader()
            .parse("good 1 1 1\nfine 2 2 2\ngood 3 3 3\n", Path::new("g.txt"))
            .unwrap_err();
        assert!(matches!(err, DataError::DuplicateToken { line: 3, ref token, .. } if token == "good"));
    }

    #[test]
    fn test_reserved_token_in_file_is_a_duplicate() {
        let err = loader().parse("<UNK> 1 1 1\n", Path::new("g.txt")).unwrap_err();
        assert!(matches!(err, DataError::DuplicateToken { .. }));
    }

    #[test]
    fn test_random_unk_row_is_seeded_and_non_zero() {
        let a = EmbeddingTable::with_reserved_rows(8, UnkInit::Random, 7);
        let b = EmbeddingTable::with_reserved_rows(8, UnkInit::Random, 7);
        assert_eq!(a, b);
        let unk = a.row(1).unwrap();
        assert!(unk.iter().any(|&v| v != 0.0));
        assert!(unk.iter().all(|&v| (-UNK_INIT_RANGE..=UNK_INIT_RANGE).contains(&v)));
        assert!(a.row(0).unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GLOVE.as_bytes()).unwrap();
        let (table, vocab) = loader().load(file.path()).unwrap();
        assert_eq!(table.dim(), 3);
        assert_eq!(vocab.index_of("movie"), 3);
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(matches!(
            loader().load(Path::new("/no/such/glove.txt")),
            Err(DataError::Io { .. })
        ));
    }
}
