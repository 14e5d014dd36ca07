use burn::{
    data::dataloader,
    tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor},
};
use derive_new::new;

use super::record::Record;

/// A batch of indexed records, with inputs and targets aligned by position
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct Batch {
    /// Input sequences: [batch_size, seq_len + 2]
    pub word_seq: Vec<Vec<usize>>,

    /// Next-token targets: [batch_size, seq_len + 2]
    pub dec_target: Vec<Vec<usize>>,

    /// Class targets: [batch_size]
    pub label_seq: Vec<usize>,
}

impl Batch {
    /// Collect records into a batch
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            word_seq: records.iter().map(|r| r.word_seq.clone()).collect(),
            dec_target: records.iter().map(|r| r.dec_target.clone()).collect(),
            label_seq: records.iter().map(|r| r.label_seq).collect(),
        }
    }

    /// The number of records in the batch
    pub fn len(&self) -> usize {
        self.label_seq.len()
    }

    /// Whether the batch holds no records
    pub fn is_empty(&self) -> bool {
        self.label_seq.is_empty()
    }
}

/// A training batch as tensors
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Token ids as 2D tensor: [batch_size, seq_len + 2]
    pub word_seq: Tensor<B, 2, Int>,

    /// Next-token ids as 2D tensor: [batch_size, seq_len + 2]
    pub dec_target: Tensor<B, 2, Int>,

    /// Class ids for the batch
    pub label_seq: Tensor<B, 1, Int>,
}

/// Struct for batching indexed records into tensors
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Convert an already collected batch into tensors
    pub fn tensors(&self, batch: &Batch) -> Train<B> {
        Train {
            word_seq: self.matrix(&batch.word_seq),
            dec_target: self.matrix(&batch.dec_target),
            label_seq: Tensor::from_data(
                Data::<B::IntElem, 1>::new(
                    batch.label_seq.iter().map(|&l| (l as i64).elem()).collect(),
                    Shape::new([batch.len()]),
                ),
                &self.device,
            ),
        }
    }

    /// Every row must already be padded to the same length
    fn matrix(&self, rows: &[Vec<usize>]) -> Tensor<B, 2, Int> {
        let width = rows.first().map(Vec::len).unwrap_or(0);

        Tensor::from_data(
            Data::<B::IntElem, 2>::new(
                rows.iter()
                    .flat_map(|row| row.iter().map(|&id| (id as i64).elem()))
                    .collect(),
                Shape::new([rows.len(), width]),
            ),
            &self.device,
        )
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<Record, Train<B>> for Batcher<B> {
    /// Collects a vector of records into a training batch
    fn batch(&self, items: Vec<Record>) -> Train<B> {
        self.tensors(&Batch::from_records(&items))
    }
}
