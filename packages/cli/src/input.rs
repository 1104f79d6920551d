//! Reading feed documents from files and URLs, writing results.

use std::path::Path;

use serde::Serialize;

/// Errors that can occur while reading input or writing output.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether `input` should be fetched over HTTP rather than read from disk.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Reads `input`, fetching it when it is an `http(s)://` URL.
pub async fn read_input(input: &str) -> Result<String, InputError> {
    if !is_url(input) {
        log::debug!("Reading {input}");
        return Ok(tokio::fs::read_to_string(input).await?);
    }

    log::info!("Fetching {input}");
    let resp = reqwest::Client::new().get(input).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(InputError::Status {
            url: input.to_string(),
            status,
        });
    }

    Ok(resp.text().await?)
}

/// Serializes `value` to `output`, or to stdout when `output` is `None`.
pub async fn write_output<T: Serialize>(
    value: &T,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), InputError> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');

    match output {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            use tokio::io::AsyncWriteExt as _;

            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_urls() {
        assert!(is_url("https://www.rfs.nsw.gov.au/feeds/majorIncidents.json"));
        assert!(is_url("http://localhost:8080/feed.json"));
        assert!(!is_url("feeds/majorIncidents.json"));
        assert!(!is_url("/tmp/https.json"));
    }

    #[tokio::test]
    async fn writes_then_reads_a_file() {
        let path = std::env::temp_dir().join(format!("fire_feed_io_{}.json", std::process::id()));

        write_output(&serde_json::json!({ "features": [] }), Some(&path), false)
            .await
            .unwrap();
        let text = read_input(path.to_str().unwrap()).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(text, "{\"features\":[]}\n");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = read_input("/nonexistent/fire_feed.json").await.unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }
}
