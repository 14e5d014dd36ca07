use std::{fmt::Display, path::PathBuf, str::FromStr};

use derive_new::new;
use serde::{Deserialize, Serialize};

/// The Stanford Sentiment Treebank
pub mod sst;

/// The Yelp sentiment transfer corpus
pub mod yelp;

/// Ad-hoc trial files
pub mod trial;

/// A raw text/label pair as read from disk, before any tokenization
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RawItem {
    /// Surface tokens, lower-cased
    pub words: Vec<String>,

    /// The class label
    pub label: usize,
}

/// Lower-case a line of text and split it on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// The supported dataset variants
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Stanford Sentiment Treebank trees
    Sst,

    /// Line-paired Yelp text and label files
    Yelp,

    /// Ad-hoc positive/negative trial files
    Trial,
}

impl DatasetKind {
    /// Read every raw item for this dataset from the given root directory
    pub fn load_raw(&self, root: &str, seq_len: usize) -> Result<Vec<RawItem>, DatasetError> {
        match self {
            DatasetKind::Sst => sst::load(root, seq_len),
            DatasetKind::Yelp => yelp::load(root),
            DatasetKind::Trial => trial::load(root),
        }
    }
}

impl TryFrom<&str> for DatasetKind {
    type Error = DatasetError;

    /// Try to convert a string to a DatasetKind
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            sst::DATASET => Ok(DatasetKind::Sst),
            yelp::DATASET => Ok(DatasetKind::Yelp),
            // "test" is accepted for the trial files as well
            trial::DATASET | "test" => Ok(DatasetKind::Trial),
            _ => Err(DatasetError::Unknown(value.to_string())),
        }
    }
}

impl FromStr for DatasetKind {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DatasetKind::Sst => sst::DATASET,
            DatasetKind::Yelp => yelp::DATASET,
            DatasetKind::Trial => trial::DATASET,
        };

        write!(f, "{}", name)
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}")]
    Unknown(String),

    /// A dataset file could not be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// The file being read
        path: PathBuf,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Paired text and label files disagree on their number of lines
    #[error("{text} has {text_lines} lines but {labels} has {label_lines}")]
    LineCountMismatch {
        /// The text file
        text: PathBuf,

        /// Lines in the text file
        text_lines: usize,

        /// The label file
        labels: PathBuf,

        /// Lines in the label file
        label_lines: usize,
    },

    /// A label could not be parsed as an integer class
    #[error("invalid label {value:?} at {path}:{line}")]
    InvalidLabel {
        /// The label file
        path: PathBuf,

        /// 1-based line number
        line: usize,

        /// The offending label text
        value: String,
    },

    /// A sentiment tree could not be parsed
    #[error("malformed tree at {path}:{line}: {reason}")]
    MalformedTree {
        /// The tree file
        path: PathBuf,

        /// 1-based line number
        line: usize,

        /// What went wrong
        reason: String,
    },
}
