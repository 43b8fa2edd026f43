//! Core vocabulary trainer library shared by the service and its clients.
//!
//! Provides:
//! - Word record model and engine settings
//! - Progress tracking after each answer (streak, weight, graduation)
//! - Session selection over cold and review pools
//! - Merging saved progress with newly imported word lists
//! - Word list and progress file parsing, cloze construction
//! - Quiz option building and session statistics

pub mod algorithm;
pub mod cloze;
pub mod dates;
pub mod enrich;
pub mod error;
pub mod merge;
pub mod parser;
pub mod quiz;
pub mod selector;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::{get_algorithm, record_answer, ProgressAlgorithm, StreakWeight};
pub use enrich::{fill_defaults, OfflineGenerator, TextGenerator};
pub use error::{EngineError, GenerationError, ParseError, Result};
pub use merge::{merge, merge_with_report, MergeReport};
pub use parser::{export_history, parse_history, parse_raw};
pub use quiz::{build_question, check_answer, OptionSource, QuizQuestion};
pub use selector::{select_by_ids, select_session, SessionSelector};
pub use session::{apply_update, Session};
pub use stats::{CollectionStats, SessionSummary};
pub use types::{DraftWord, EngineSettings, RawWord, WordRecord};
