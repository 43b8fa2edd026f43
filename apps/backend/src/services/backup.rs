//! Progress export and backup helpers.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use vocab_core::dates::format_day;
use vocab_core::{export_history, ParseError, WordRecord};

use crate::services::storage::StorageService;

/// A serialized collection ready to download or upload.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub file_name: String,
    pub content: String,
    pub content_hash: String,
    pub word_count: usize,
}

impl ProgressSnapshot {
    /// Serialize `words` as a progress file named after `day`.
    pub fn new(words: &[WordRecord], day: NaiveDate) -> Result<Self, ParseError> {
        let content = export_history(words)?;
        Ok(Self {
            file_name: progress_file_name(day),
            content_hash: hash_content(&content),
            content,
            word_count: words.len(),
        })
    }

    /// Object key under the device's prefix.
    pub fn object_key(&self, device_id: &str) -> String {
        StorageService::make_key(device_id, &self.file_name)
    }
}

/// File name of a progress snapshot taken on `day`.
pub fn progress_file_name(day: NaiveDate) -> String {
    format!("progress_{}.json", format_day(day))
}

/// Compute SHA256 hash of content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
