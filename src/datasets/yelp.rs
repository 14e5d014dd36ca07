use std::path::Path;

use crate::utils::files::read_lines;

use super::{tokenize, DatasetError, RawItem};

/// The name of the Yelp dataset
pub const DATASET: &str = "yelp";

/// The splits of the corpus that are read
pub const SPLITS: [&str; 1] = ["train"];

/// Load every split as paired `sentiment.<split>.text` / `sentiment.<split>.labels` files
pub fn load(root: &str) -> Result<Vec<RawItem>, DatasetError> {
    let root = Path::new(root);

    let mut items = Vec::new();
    for split in SPLITS {
        items.extend(load_split(root, split)?);
    }

    log::info!("Loaded {} yelp items from {}", items.len(), root.display());

    Ok(items)
}

/// Load a single split, pairing text and label files line by line
pub fn load_split(root: &Path, split: &str) -> Result<Vec<RawItem>, DatasetError> {
    let text_path = root.join(format!("sentiment.{}.text", split));
    let label_path = root.join(format!("sentiment.{}.labels", split));

    let texts = read_lines(&text_path)?;
    let labels = read_lines(&label_path)?;

    if texts.len() != labels.len() {
        return Err(DatasetError::LineCountMismatch {
            text: text_path,
            text_lines: texts.len(),
            labels: label_path,
            label_lines: labels.len(),
        });
    }

    texts
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(i, (text, label))| {
            let label = label
                .trim()
                .parse::<usize>()
                .map_err(|_| DatasetError::InvalidLabel {
                    path: label_path.clone(),
                    line: i + 1,
                    value: label.clone(),
                })?;

            Ok(RawItem::new(tokenize(text), label))
        })
        .collect()
}
