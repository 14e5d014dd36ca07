/// Dataset preparation and the cyclic batch accessor
pub mod fast_data;

/// Padded and indexed records
pub mod record;

/// Vocabulary construction
pub mod vocab;

/// Seeded ratio splits
pub mod split;

/// Host and tensor batches
pub mod batcher;

/// Repeating sequential sampler
pub mod cyclic;

pub use batcher::{Batch, Batcher};
pub use cyclic::CyclicBatches;
pub use fast_data::{Config, FastData, FastDataError};
pub use record::Record;
pub use vocab::{Vocabulary, VocabularyBuilder};
