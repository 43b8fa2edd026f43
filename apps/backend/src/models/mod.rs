//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from vocab-core
pub use vocab_core::types::{DraftWord, EngineSettings, WordRecord};
pub use vocab_core::{CollectionStats, EngineError, QuizQuestion, SessionSummary};

// === Database Entity Types ===

/// Device registration info
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Word record stored in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbWord {
    pub device_id: Uuid,
    pub id: String,
    pub position: i32,
    pub word: String,
    pub part_of_speech: Option<String>,
    pub answer_form: String,
    pub meaning: String,
    pub sentence: String,
    pub cloze_sentence: String,
    pub streak: i32,
    pub last_seen: Option<NaiveDate>,
    pub weight: f64,
    pub total_attempts: i32,
    pub total_correct: i32,
    pub is_graduated: bool,
}

impl DbWord {
    /// Convert to the engine's record type
    pub fn to_word_record(&self) -> WordRecord {
        WordRecord {
            id: self.id.clone(),
            lemma: self.word.clone(),
            part_of_speech: self.part_of_speech.clone(),
            answer_form: self.answer_form.clone(),
            meaning: self.meaning.clone(),
            sentence: self.sentence.clone(),
            cloze_sentence: self.cloze_sentence.clone(),
            streak: self.streak.max(0) as u32,
            last_seen: self.last_seen,
            weight: self.weight,
            total_attempts: self.total_attempts.max(0) as u32,
            total_correct: self.total_correct.max(0) as u32,
            is_graduated: self.is_graduated,
        }
    }
}

/// Uploaded progress backup
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBackup {
    pub id: Uuid,
    pub device_id: Uuid,
    pub object_key: String,
    pub content_hash: String,
    pub word_count: i32,
    pub created_at: DateTime<Utc>,
}

// === API Request/Response Types ===

/// Device registration request
#[derive(Debug, Deserialize)]
pub struct DeviceRegisterRequest {
    pub name: Option<String>,
}

/// Device registration response
#[derive(Debug, Serialize)]
pub struct DeviceRegisterResponse {
    pub device_id: Uuid,
    pub token: String,
}

/// Device status response
#[derive(Debug, Serialize)]
pub struct DeviceStatusResponse {
    pub device_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
    pub word_count: i64,
    pub last_backup_at: Option<DateTime<Utc>>,
}

/// Collection listing
#[derive(Debug, Serialize)]
pub struct WordsResponse {
    pub words: Vec<WordRecord>,
}

/// Import request. Any combination of the three sources may be sent.
#[derive(Debug, Default, Deserialize)]
pub struct ImportRequest {
    /// A saved progress file. Replaces the stored collection as the merge base.
    #[serde(default)]
    pub history: Option<Vec<WordRecord>>,
    /// Lines of `word # meaning # sentence`.
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub drafts: Option<Vec<DraftWord>>,
}

/// Import response
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub words: Vec<WordRecord>,
    pub added: usize,
    pub skipped: usize,
    pub rejected: Vec<RejectedWord>,
}

/// A draft left out of an import, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedWord {
    pub word: String,
    pub reason: String,
}

impl From<&EngineError> for RejectedWord {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::InvalidRecord { lemma, reason } => Self {
                word: lemma.clone(),
                reason: reason.clone(),
            },
            EngineError::InvalidArgument(msg) => Self {
                word: String::new(),
                reason: msg.clone(),
            },
        }
    }
}

/// Content edit for one word. Progress fields are not editable here.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWordRequest {
    pub word: Option<String>,
    pub part_of_speech: Option<String>,
    pub answer_form: Option<String>,
    pub meaning: Option<String>,
    pub sentence: Option<String>,
    pub cloze_sentence: Option<String>,
}

/// Session start request
#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    pub count: Option<i64>,
}

/// Custom session request
#[derive(Debug, Deserialize)]
pub struct CustomSessionRequest {
    pub word_ids: Vec<String>,
}

/// Words picked for a session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub words: Vec<WordRecord>,
    pub today: NaiveDate,
}

/// Answer submission. Either the verdict or the chosen option is required.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub word_id: String,
    pub was_correct: Option<bool>,
    pub chosen: Option<String>,
}

/// Answer response
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub word: WordRecord,
    pub was_correct: bool,
    pub correct_answer: String,
}

/// Session summary request
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub started: Vec<WordRecord>,
    pub finished: Vec<WordRecord>,
}

/// Collection statistics response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CollectionStats,
    pub today: NaiveDate,
}

/// Effective settings response
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub engine: EngineSettings,
    pub daily_reset_hour: u32,
    pub default_session_size: usize,
}

/// Backup upload response
#[derive(Debug, Serialize)]
pub struct BackupResponse {
    pub key: String,
    pub content_hash: String,
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
}
