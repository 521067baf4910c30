// crates/ecoglobe-core/src/loader/remote.rs

// ---------------------------------------------------------------------------
// FILE GUARD: only compiled with the 'fetch' feature.
// ---------------------------------------------------------------------------
#![cfg(feature = "fetch")]

use crate::error::{GlobeError, Result};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;

static CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// GETs `url` and returns the body. A non-2xx answer is a [`GlobeError::Fetch`].
pub fn get_text(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(GlobeError::Fetch {
            source_name: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text()?)
}
