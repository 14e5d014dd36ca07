use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::datasets::DatasetError;

/// Read a file from the given path into a list of lines
pub fn read_lines(path: &Path) -> Result<Vec<String>, DatasetError> {
    let io_error = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line.map_err(io_error)?);
    }

    log::debug!("Read {} lines from {}", lines.len(), path.display());

    Ok(lines)
}
