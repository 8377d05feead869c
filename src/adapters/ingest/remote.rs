//! Remote media acquisition via a yt-dlp subprocess.

use crate::domain::video::MediaHandle;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub struct YtDlpFetcher {
    download_dir: PathBuf,
}

impl YtDlpFetcher {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    /// Download the media behind `url` into the download directory and
    /// return its handle with the metadata yt-dlp reports.
    pub async fn fetch(&self, url: &str) -> Result<MediaHandle> {
        let output_template = self.download_dir.join("%(id)s.%(ext)s");
        let output = Command::new("yt-dlp")
            .arg(url)
            .arg("--no-warnings")
            .arg("--quiet")
            .arg("--print")
            .arg("title")
            .arg("--print")
            .arg("duration")
            .arg("--print")
            .arg("thumbnail")
            .arg("--print")
            .arg("after_move:filepath")
            .arg("--no-simulate")
            .arg("-f")
            .arg("best[ext=mp4]/best")
            .arg("-o")
            .arg(&output_template)
            .output()
            .await
            .map_err(|e| Error::Ingestion(format!("failed to spawn yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(Error::Ingestion(format!(
                "download failed for {}: {}",
                url,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_fetch_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// yt-dlp prints one line per `--print` template, in argument order:
/// title, duration, thumbnail, then the final file path.
fn parse_fetch_output(stdout: &str) -> Result<MediaHandle> {
    let lines: Vec<&str> = stdout.lines().map(str::trim).collect();
    let [title, duration, thumbnail, filepath] = lines.as_slice() else {
        return Err(Error::Ingestion(format!(
            "unexpected yt-dlp output ({} lines)",
            lines.len()
        )));
    };
    if filepath.is_empty() {
        return Err(Error::Ingestion("yt-dlp reported no output file".to_string()));
    }
    Ok(MediaHandle {
        file_path: Path::new(filepath).to_path_buf(),
        title: non_placeholder(title).map(str::to_string),
        duration_secs: duration.parse().unwrap_or(0.0),
        thumbnail: non_placeholder(thumbnail).map(str::to_string),
    })
}

// yt-dlp prints "NA" for fields the extractor did not fill in.
fn non_placeholder(field: &str) -> Option<&str> {
    match field {
        "" | "NA" => None,
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_metadata() {
        let stdout = "Intro to Rust\n312.0\nhttps://i.example.com/t.jpg\n/data/dl/abc123.mp4\n";
        let handle = parse_fetch_output(stdout).unwrap();
        assert_eq!(handle.title.as_deref(), Some("Intro to Rust"));
        assert_eq!(handle.duration_secs, 312.0);
        assert_eq!(handle.thumbnail.as_deref(), Some("https://i.example.com/t.jpg"));
        assert_eq!(handle.file_path, Path::new("/data/dl/abc123.mp4"));
    }

    #[test]
    fn placeholder_fields_become_none() {
        let stdout = "NA\nNA\nNA\n/data/dl/abc123.mp4\n";
        let handle = parse_fetch_output(stdout).unwrap();
        assert!(handle.title.is_none());
        assert_eq!(handle.duration_secs, 0.0);
        assert!(handle.thumbnail.is_none());
    }

    #[test]
    fn truncated_output_is_an_ingestion_error() {
        let err = parse_fetch_output("Intro to Rust\n").unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)));
    }
}
