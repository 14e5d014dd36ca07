use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::datasets::RawItem;

use super::vocab::{Vocabulary, PAD};

/// Marks the start of every sequence
pub const START: &str = "<start>";

/// Marks the end of every sequence
pub const EOS: &str = "<eos>";

/// A padded record that has not yet been indexed against a vocabulary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct PaddedItem {
    /// `<start>`, the tokens, `<eos>`, then `<pad>` up to the fixed length
    pub words: Vec<String>,

    /// The class label
    pub label: usize,
}

impl PaddedItem {
    /// Wrap and pad a raw item, or `None` when it holds more than `seq_len` tokens
    pub fn from_raw(item: RawItem, seq_len: usize) -> Option<Self> {
        if item.words.len() > seq_len {
            return None;
        }

        let mut words = Vec::with_capacity(seq_len + 2);
        words.push(START.to_string());
        words.extend(item.words);
        words.push(EOS.to_string());
        words.resize(seq_len + 2, PAD.to_string());

        Some(Self::new(words, item.label))
    }
}

/// A fully indexed record, ready for batching
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Record {
    /// The padded surface tokens
    pub words: Vec<String>,

    /// The padded tokens mapped to vocabulary indices
    pub word_seq: Vec<usize>,

    /// `word_seq` shifted left by one, ending in the pad index
    pub dec_target: Vec<usize>,

    /// The integer class target
    pub label_seq: usize,
}

impl Record {
    /// Index a padded item against a frozen vocabulary
    pub fn index(item: PaddedItem, vocab: &Vocabulary) -> Self {
        let word_seq: Vec<usize> = item.words.iter().map(|w| vocab.to_index(w)).collect();

        let mut dec_target = word_seq.iter().skip(1).copied().collect::<Vec<_>>();
        dec_target.push(vocab.pad_index());

        Self {
            words: item.words,
            word_seq,
            dec_target,
            label_seq: item.label,
        }
    }
}

/// Wrap and pad raw items, dropping any longer than `seq_len` tokens
pub fn pad_all(items: Vec<RawItem>, seq_len: usize) -> Vec<PaddedItem> {
    let total = items.len();

    let padded: Vec<_> = items
        .into_iter()
        .filter_map(|item| PaddedItem::from_raw(item, seq_len))
        .collect();

    log::debug!(
        "Dropped {} of {} items longer than {} tokens",
        total - padded.len(),
        total,
        seq_len
    );

    padded
}
