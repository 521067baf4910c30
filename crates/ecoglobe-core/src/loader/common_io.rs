// crates/ecoglobe-core/src/loader/common_io.rs
use crate::error::{GlobeError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a local dataset, gunzipping it when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GlobeError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(GlobeError::InvalidData(format!(
                "{} is gzipped but 'compact' is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// Reads a whole local dataset as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    let mut reader = open_stream(path)?;
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
