use std::path::Path;

use crate::utils::files::read_lines;

use super::{DatasetError, RawItem};

/// The name of the Stanford Sentiment Treebank dataset
pub const DATASET: &str = "sst";

/// The tree files that make up the treebank, all of which are read
pub const SPLITS: [&str; 3] = ["train.txt", "dev.txt", "test.txt"];

/// The polarity of a tree root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    /// Fine-grained labels 0 and 1
    Negative,

    /// Fine-grained label 2
    Neutral,

    /// Fine-grained labels 3 and 4
    Positive,
}

impl Sentiment {
    /// Map a fine-grained root label onto a polarity
    pub fn from_label(fine_grained: &str) -> Option<Self> {
        match fine_grained {
            "0" | "1" => Some(Sentiment::Negative),
            "2" => Some(Sentiment::Neutral),
            "3" | "4" => Some(Sentiment::Positive),
            _ => None,
        }
    }

    /// The binary class id, `None` for neutral trees
    pub fn class(&self) -> Option<usize> {
        match self {
            Sentiment::Negative => Some(0),
            Sentiment::Neutral => None,
            Sentiment::Positive => Some(1),
        }
    }
}

/// Load all splits, keeping non-neutral trees with at most `seq_len` leaves
pub fn load(root: &str, seq_len: usize) -> Result<Vec<RawItem>, DatasetError> {
    let root = Path::new(root);

    let mut items = Vec::new();
    for split in SPLITS {
        let path = root.join(split);
        let lines = read_lines(&path)?;

        let mut dropped = 0;
        for (i, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let malformed = |reason: String| DatasetError::MalformedTree {
                path: path.clone(),
                line: i + 1,
                reason,
            };

            let tree = Tree::parse(line).map_err(malformed)?;
            let sentiment = Sentiment::from_label(&tree.label)
                .ok_or_else(|| malformed(format!("unknown sentiment label {:?}", tree.label)))?;

            match sentiment.class() {
                Some(label) if tree.leaves.len() <= seq_len => {
                    let words = tree.leaves.iter().map(|w| w.to_lowercase()).collect();
                    items.push(RawItem::new(words, label));
                }
                _ => dropped += 1,
            }
        }

        log::debug!(
            "{}: dropped {} neutral or over-length trees",
            path.display(),
            dropped
        );
    }

    log::info!("Loaded {} sst items from {}", items.len(), root.display());

    Ok(items)
}

/// The parts of a PTB-style sentiment tree the loader needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// The fine-grained label of the root node
    pub label: String,

    /// The words at the leaves, left to right
    pub leaves: Vec<String>,
}

impl Tree {
    /// Parse a single line such as `(3 (2 It) (4 (2 's) (3 good)))`
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut label = None;
        let mut leaves = Vec::new();

        // Children seen so far by each open node, innermost last
        let mut open: Vec<usize> = Vec::new();
        let mut expect_label = false;
        let mut closed = false;

        for (pos, token) in lex(line).into_iter().enumerate() {
            if closed {
                return Err(format!("unexpected trailing input at token {}", pos));
            }

            match token {
                "(" => {
                    if expect_label {
                        return Err(format!("expected a label at token {}", pos));
                    }
                    if let Some(children) = open.last_mut() {
                        *children += 1;
                    }

                    open.push(0);
                    expect_label = true;
                }
                ")" => {
                    if expect_label {
                        return Err(format!("expected a label at token {}", pos));
                    }

                    match open.pop() {
                        None => return Err(format!("unbalanced ')' at token {}", pos)),
                        Some(0) => return Err(format!("node without children at token {}", pos)),
                        Some(_) => closed = open.is_empty(),
                    }
                }
                word if expect_label => {
                    if open.len() == 1 {
                        label = Some(word.to_string());
                    }
                    expect_label = false;
                }
                word => match open.last_mut() {
                    Some(children) => {
                        *children += 1;
                        leaves.push(word.to_string());
                    }
                    None => return Err(format!("expected '(' at token {}", pos)),
                },
            }
        }

        if !open.is_empty() {
            return Err("unbalanced parentheses".to_string());
        }

        let label = label.ok_or_else(|| "empty tree".to_string())?;

        Ok(Self { label, leaves })
    }
}

fn lex(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&line[s..i]);
            }
            if !c.is_whitespace() {
                tokens.push(&line[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(&line[s..]);
    }

    tokens
}
