// ============================================================
// Layer 4 — Dataset Fetcher
// ============================================================
// Makes sure the census file is available locally.
//
//   file exists      → reuse it, no network access
//   file is missing  → download to <file>.tmp, then rename
//
// Writing to a temporary name first means an interrupted
// download never leaves a truncated file that a later run would
// mistake for the real dataset.

use anyhow::{bail, Context, Result};
use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

use crate::infra::http;

/// Where the adult census training file is published.
pub const ADULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/dotnet/machinelearning/master/test/data/adult.train";

/// Local file name for the downloaded dataset.
pub const ADULT_FILE_NAME: &str = "adult.txt";

/// The adult file is a few MB; anything past this is not the file we want.
const MAX_DATASET_BYTES: u64 = 64 * 1024 * 1024;

pub struct DatasetFetcher {
    url:       String,
    dir:       PathBuf,
    file_name: String,
}

impl DatasetFetcher {
    pub fn new(url: impl Into<String>, dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            url:       url.into(),
            dir:       dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Path the dataset is (or will be) stored at
    pub fn target_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Return the local path of the dataset, downloading it first if needed.
    pub fn ensure_local(&self) -> Result<PathBuf> {
        let dest = self.target_path();
        if dest.exists() {
            tracing::info!("Using cached dataset '{}'", dest.display());
            return Ok(dest);
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create data directory '{}'", self.dir.display()))?;

        tracing::info!("Downloading dataset from {}", self.url);
        let response = match http::agent().get(&self.url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                bail!("Failed to download {}: HTTP {}", self.url, code)
            }
            Err(e) => bail!("Failed to download {}: {}", self.url, e),
        };

        let tmp = dest.with_file_name(format!("{}.tmp", self.file_name));
        let mut file = File::create(&tmp)
            .with_context(|| format!("Cannot write '{}'", tmp.display()))?;
        let bytes = http::copy_response_to_writer(response, &mut file, MAX_DATASET_BYTES)
            .with_context(|| format!("Cannot write '{}'", tmp.display()))?;
        file.flush()
            .with_context(|| format!("Cannot flush '{}'", tmp.display()))?;
        drop(file);

        fs::rename(&tmp, &dest)
            .with_context(|| format!("Cannot move '{}' to '{}'", tmp.display(), dest.display()))?;

        tracing::info!("Saved {} bytes to '{}'", bytes, dest.display());
        Ok(dest)
    }
}
