//! Obtaining the raw sheet text for a source.
//!
//! This is the only fallible step before parsing: every failure here becomes
//! `SheetError::ResourceUnavailable` and is shown to the user as-is. There
//! are no retries.

use std::time::Duration;

use eventsheet_core::config::Source;
use eventsheet_core::{SheetError, SheetResult};
use tracing::debug;
use url::Url;

use crate::utils::tui::loading_spinner;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

pub async fn fetch_text(source: &Source) -> SheetResult<String> {
    let spinner = loading_spinner(&source.name);
    let result = if source.is_remote() {
        fetch_remote(&source.location).await
    } else {
        fetch_local(&source.location).await
    };
    spinner.finish_and_clear();

    if let Ok(text) = &result {
        debug!(source = %source.name, bytes = text.len(), "loaded sheet");
    }
    result
}

async fn fetch_local(path: &str) -> SheetResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SheetError::unavailable(path, e))
}

async fn fetch_remote(location: &str) -> SheetResult<String> {
    let url = Url::parse(location).map_err(|e| SheetError::unavailable(location, e))?;

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| SheetError::unavailable(location, e))?;

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SheetError::unavailable(location, e))?;

    response
        .text()
        .await
        .map_err(|e| SheetError::unavailable(location, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventsheet_core::Schema;

    fn source(location: &str) -> Source {
        Source {
            name: "test".to_string(),
            location: location.to_string(),
            schema: Schema::venues(),
        }
    }

    #[tokio::test]
    async fn reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("venues.csv");
        std::fs::write(&path, "Name,TYPE,Status,ACTIVIDADES,URL\n").unwrap();

        let text = fetch_text(&source(&path.to_string_lossy())).await.unwrap();
        assert!(text.starts_with("Name,TYPE"));
    }

    #[tokio::test]
    async fn missing_file_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let err = fetch_text(&source(&path.to_string_lossy())).await.unwrap_err();
        assert!(matches!(err, SheetError::ResourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn malformed_url_is_resource_unavailable() {
        let err = fetch_text(&source("https://")).await.unwrap_err();
        assert!(matches!(err, SheetError::ResourceUnavailable { .. }));
    }
}
