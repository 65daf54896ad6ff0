//! Leitner spaced-repetition scheduling.
//!
//! This module provides:
//! - Due-item selection and box transitions (`algorithm`)
//! - Review session coordination (`session`)
//! - Progress summaries (`progress`)
//! - Card state persistence (`storage`)

pub mod algorithm;
pub mod config;
pub mod models;
pub mod progress;
pub mod session;
pub mod storage;

pub use algorithm::{format_interval, grade, select_due};
pub use config::{SchedulerConfig, BOX_COUNT};
pub use models::{CardState, LearnerId, ProgressSummary};
pub use progress::summarize;
pub use session::{ReviewSession, SessionState};
pub use storage::{CardStateStore, FileStore, MemoryStore, StoreError};
