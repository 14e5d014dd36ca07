use std::marker::PhantomData;

use burn::data::dataset::Dataset;

/// A sequential sampler that yields fixed-size batches forever.
///
/// When fewer than `batch_size` items remain in the current pass, that short
/// tail is dropped and a new pass starts from the first item, so every batch
/// holds exactly `batch_size` items.
pub struct CyclicBatches<D, I> {
    dataset: D,
    batch_size: usize,
    cursor: usize,
    epoch: usize,
    item: PhantomData<I>,
}

impl<D: Dataset<I>, I> CyclicBatches<D, I> {
    /// Creates a sampler, or `None` when the dataset cannot fill a single batch
    pub fn new(dataset: D, batch_size: usize) -> Option<Self> {
        if batch_size == 0 || dataset.len() < batch_size {
            return None;
        }

        Some(Self {
            dataset,
            batch_size,
            cursor: 0,
            epoch: 0,
            item: PhantomData,
        })
    }

    /// Returns the next full batch, wrapping to the start of the dataset when
    /// the current pass cannot fill one
    pub fn next_batch(&mut self) -> Vec<I> {
        if self.cursor + self.batch_size > self.dataset.len() {
            log::debug!(
                "Pass {} done, dropping {} trailing items",
                self.epoch,
                self.dataset.len() - self.cursor
            );

            self.cursor = 0;
            self.epoch += 1;
        }

        let batch: Vec<I> = (self.cursor..self.cursor + self.batch_size)
            .filter_map(|i| self.dataset.get(i))
            .collect();

        self.cursor += self.batch_size;

        batch
    }

    /// Restart from the first item
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.epoch = 0;
    }

    /// Number of completed passes over the dataset
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Full batches produced per pass
    pub fn batches_per_epoch(&self) -> usize {
        self.dataset.len() / self.batch_size
    }

    /// The configured batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The underlying dataset
    pub fn dataset(&self) -> &D {
        &self.dataset
    }
}

impl<D: Dataset<I>, I> Iterator for CyclicBatches<D, I> {
    type Item = Vec<I>;

    /// Never returns `None`
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_batch())
    }
}
