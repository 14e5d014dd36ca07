use std::sync::Arc;

use burn::{
    data::dataset::{Dataset, InMemDataset},
    tensor::backend::Backend,
};

use crate::datasets::{DatasetError, DatasetKind};

use super::{
    batcher::{Batch, Batcher, Train},
    cyclic::CyclicBatches,
    record::{pad_all, Record},
    split::split,
    vocab::{Vocabulary, VocabularyBuilder},
};

/// Define configuration struct for dataset preparation
#[derive(burn::config::Config)]
pub struct Config {
    /// The dataset root directory
    #[config(default = "\"data/sst/trees\".to_string()")]
    pub path: String,

    /// The dataset variant to load
    #[config(default = "DatasetKind::Sst")]
    pub data_type: DatasetKind,

    /// Batch size
    #[config(default = 32)]
    pub batch_size: usize,

    /// Share of records held out by each split, in (0, 1)
    #[config(default = 0.1)]
    pub split_ratio: f64,

    /// Maximum number of raw tokens; padded sequences hold `seq_len + 2`
    #[config(default = 15)]
    pub seq_len: usize,

    /// Minimum count for a token to enter the vocabulary
    #[config(default = 2)]
    pub min_freq: usize,

    /// Seed for the split shuffles
    #[config(default = 42)]
    pub seed: u64,
}

impl Config {
    /// Check the parameters that can be rejected before touching the disk
    pub fn validate(&self) -> Result<(), FastDataError> {
        if !(self.split_ratio > 0.0 && self.split_ratio < 1.0) {
            return Err(FastDataError::InvalidSplitRatio(self.split_ratio));
        }

        if self.batch_size == 0 {
            return Err(FastDataError::InvalidBatchSize);
        }

        if self.min_freq == 0 {
            return Err(FastDataError::InvalidMinFreq);
        }

        Ok(())
    }
}

/// Prepared train/test records, their vocabulary, and a cyclic training sampler
pub struct FastData {
    /// Records used for training, shared with the sampler
    pub train_data: Arc<InMemDataset<Record>>,

    /// Held-out records
    pub test_data: InMemDataset<Record>,

    /// Vocabulary fitted on the first split
    pub vocab: Vocabulary,

    /// Number of records per batch
    pub batch_size: usize,

    train_iter: CyclicBatches<Arc<InMemDataset<Record>>, Record>,
}

impl FastData {
    /// Load, pad, index and split the configured dataset
    pub fn new(config: &Config) -> Result<Self, FastDataError> {
        config.validate()?;

        log::info!("Loading {} dataset from {}", config.data_type, config.path);

        let raw = config.data_type.load_raw(&config.path, config.seq_len)?;
        let raw_len = raw.len();
        if raw_len == 0 {
            return Err(FastDataError::NoInput {
                path: config.path.clone(),
            });
        }

        let padded = pad_all(raw, config.seq_len);
        if padded.is_empty() {
            return Err(FastDataError::Empty {
                path: config.path.clone(),
                raw: raw_len,
                seq_len: config.seq_len,
            });
        }

        let (fit, _) = split(padded.clone(), config.split_ratio, config.seed);

        let vocab = fit
            .iter()
            .fold(VocabularyBuilder::new(config.min_freq), |builder, item| {
                builder.add_all(&item.words)
            })
            .build();

        let records: Vec<Record> = padded
            .into_iter()
            .map(|item| Record::index(item, &vocab))
            .collect();

        // The second split uses an independent shuffle, as the first partition is discarded
        let (train, test) = split(records, config.split_ratio, config.seed.wrapping_add(1));

        log::info!(
            "Prepared {} train / {} test records, vocabulary of {}",
            train.len(),
            test.len(),
            vocab.len()
        );

        let train_len = train.len();
        let train_data = Arc::new(InMemDataset::new(train));
        let test_data = InMemDataset::new(test);

        let train_iter = CyclicBatches::new(train_data.clone(), config.batch_size).ok_or(
            FastDataError::TooFewRecords {
                train: train_len,
                batch_size: config.batch_size,
            },
        )?;

        Ok(Self {
            train_data,
            test_data,
            vocab,
            batch_size: config.batch_size,
            train_iter,
        })
    }

    /// The next full training batch, restarting from the first record when a
    /// pass is exhausted
    pub fn next_batch(&mut self) -> Batch {
        Batch::from_records(&self.train_iter.next_batch())
    }

    /// The next full training batch as tensors
    pub fn next_batch_tensors<B: Backend>(&mut self, batcher: &Batcher<B>) -> Train<B> {
        batcher.tensors(&self.next_batch())
    }

    /// Number of completed passes over the training set
    pub fn epoch(&self) -> usize {
        self.train_iter.epoch()
    }

    /// Full batches per pass over the training set
    pub fn batches_per_epoch(&self) -> usize {
        self.train_iter.batches_per_epoch()
    }

    /// Restart batching from the first training record
    pub fn reset(&mut self) {
        self.train_iter.reset();
    }

    /// Number of training records
    pub fn train_len(&self) -> usize {
        self.train_data.len()
    }

    /// Number of held-out records
    pub fn test_len(&self) -> usize {
        self.test_data.len()
    }
}

/// FastData Error
#[derive(thiserror::Error, Debug)]
pub enum FastDataError {
    /// The dataset could not be read
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The split ratio must leave both partitions a share
    #[error("split ratio must be strictly between 0 and 1, got {0}")]
    InvalidSplitRatio(f64),

    /// A batch size of zero was requested
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// A minimum frequency of zero was requested
    #[error("minimum vocabulary frequency must be at least 1")]
    InvalidMinFreq,

    /// The input files hold no records at all
    #[error("no records found in {path}")]
    NoInput {
        /// The dataset root directory
        path: String,
    },

    /// No records survived the length filter
    #[error("no records in {path} ({raw} read, none with at most {seq_len} tokens)")]
    Empty {
        /// The dataset root directory
        path: String,

        /// Raw records read before the length filter
        raw: usize,

        /// The length cap
        seq_len: usize,
    },

    /// The training split cannot fill a single batch
    #[error("training split has {train} records, fewer than one batch of {batch_size}")]
    TooFewRecords {
        /// Records in the training split
        train: usize,

        /// The configured batch size
        batch_size: usize,
    },
}
