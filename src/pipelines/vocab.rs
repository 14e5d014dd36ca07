use std::{
    cmp::Reverse,
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// The padding token, always index 0
pub const PAD: &str = "<pad>";

/// The unknown token, always index 1
pub const UNK: &str = "<unk>";

/// Accumulates token counts from the fitting split
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    min_freq: usize,

    /// Token -> (count, order of first appearance)
    counts: HashMap<String, (usize, usize)>,
}

impl VocabularyBuilder {
    /// Creates a builder that keeps tokens seen at least `min_freq` times
    pub fn new(min_freq: usize) -> Self {
        Self {
            min_freq,
            counts: HashMap::new(),
        }
    }

    /// Count a single token
    pub fn add(&mut self, word: &str) {
        let next = self.counts.len();

        self.counts
            .entry(word.to_string())
            .or_insert((0, next))
            .0 += 1;
    }

    /// Count every token in `words`
    pub fn add_all<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add(word.as_ref());
        }

        self
    }

    /// Freeze the counts into a vocabulary. Tokens are ordered by descending
    /// frequency, ties broken by first appearance.
    pub fn build(self) -> Vocabulary {
        let mut kept: Vec<_> = self
            .counts
            .into_iter()
            .filter(|(word, (count, _))| {
                *count >= self.min_freq && word != PAD && word != UNK
            })
            .collect();

        kept.sort_by_key(|(_, (count, first))| (Reverse(*count), *first));

        let mut words = vec![PAD.to_string(), UNK.to_string()];
        words.extend(kept.into_iter().map(|(word, _)| word));

        log::info!(
            "Built vocabulary of {} tokens (min_freq = {})",
            words.len(),
            self.min_freq
        );

        Vocabulary::from_words(words)
    }
}

/// A frozen mapping between tokens and indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    idx2word: Vec<String>,
    word2idx: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_words(idx2word: Vec<String>) -> Self {
        let word2idx = idx2word
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        Self { idx2word, word2idx }
    }

    /// The index of `word`, or the unknown index when it is absent
    pub fn to_index(&self, word: &str) -> usize {
        self.word2idx
            .get(word)
            .copied()
            .unwrap_or_else(|| self.unknown_index())
    }

    /// The token at `index`, if any
    pub fn to_word(&self, index: usize) -> Option<&str> {
        self.idx2word.get(index).map(String::as_str)
    }

    /// Whether `word` has its own index
    pub fn contains(&self, word: &str) -> bool {
        self.word2idx.contains_key(word)
    }

    /// The padding index
    pub fn pad_index(&self) -> usize {
        0
    }

    /// The unknown token index
    pub fn unknown_index(&self) -> usize {
        1
    }

    /// Number of tokens, reserved ones included
    pub fn len(&self) -> usize {
        self.idx2word.len()
    }

    /// Always false, since the reserved tokens are present
    pub fn is_empty(&self) -> bool {
        self.idx2word.is_empty()
    }

    /// All tokens in index order
    pub fn words(&self) -> &[String] {
        &self.idx2word
    }

    /// Write the vocabulary as a JSON array of tokens in index order
    pub fn save(&self, path: &Path) -> Result<(), VocabularyError> {
        let file = File::create(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::to_writer_pretty(BufWriter::new(file), self)?;

        Ok(())
    }

    /// Read a vocabulary written by [`Vocabulary::save`]
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let file = File::open(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = String;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        if words.first().map(String::as_str) != Some(PAD)
            || words.get(1).map(String::as_str) != Some(UNK)
        {
            return Err(format!("vocabulary must start with {} and {}", PAD, UNK));
        }

        let vocab = Self::from_words(words);
        if vocab.word2idx.len() != vocab.idx2word.len() {
            return Err("vocabulary contains duplicate tokens".to_string());
        }

        Ok(vocab)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.idx2word
    }
}

/// Vocabulary Error
#[derive(thiserror::Error, Debug)]
pub enum VocabularyError {
    /// The vocabulary file could not be opened or created
    #[error("unable to access {path}: {source}")]
    Io {
        /// The vocabulary file
        path: PathBuf,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The vocabulary file is not valid JSON or is missing reserved tokens
    #[error("invalid vocabulary file: {0}")]
    Json(#[from] serde_json::Error),
}
