use std::path::Path;

use crate::utils::files::read_lines;

use super::{tokenize, DatasetError, RawItem};

/// The name of the trial dataset
pub const DATASET: &str = "trial";

/// Positive examples, one per line
pub const POSITIVE_FILE: &str = "fasttrial1.pos";

/// Negative examples, one per line
pub const NEGATIVE_FILE: &str = "fasttrial1.neg";

/// Load the positive file (label 1) followed by the negative file (label 0)
pub fn load(root: &str) -> Result<Vec<RawItem>, DatasetError> {
    let root = Path::new(root);

    let mut items = Vec::new();
    for (file, label) in [(POSITIVE_FILE, 1), (NEGATIVE_FILE, 0)] {
        let lines = read_lines(&root.join(file))?;

        items.extend(
            lines
                .iter()
                .map(|text| RawItem::new(tokenize(text), label)),
        );
    }

    log::info!("Loaded {} trial items from {}", items.len(), root.display());

    Ok(items)
}
