//! # Visadesk Engine
//!
//! View-state machines behind the Visadesk dashboard. Nothing in this crate
//! renders or blocks: the terminal UI feeds it events and timer ticks and
//! reads back plain state and typed outcomes.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use visadesk_engine::{FixedClock, TimesheetManager};
//! use visadesk_types::{FileMeta, WeekId};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");
//! let mut manager = TimesheetManager::with_sample_data(Arc::new(FixedClock(today)));
//! let report = manager
//!     .upload_files(WeekId(3), vec![FileMeta::new("hours.pdf", "application/pdf", 4096)])
//!     .expect("known week");
//! assert_eq!(report.accepted.len(), 1);
//!
//! while manager.tick().is_none() {}
//! assert_eq!(manager.book.week(WeekId(3)).map(|week| week.documents.len()), Some(1));
//! ```
//!
//! ## Architecture
//!
//! - **`location_field`**: the city/state search field state machine
//! - **`timesheets`**: the week list, deletion and review transitions
//! - **`uploads`**: validation gate and the sequential progress queue
//! - **`manager`**: the book and the queue sharing one id generator
//! - **`ids`** / **`clock`**: monotonic identifiers and the source of "today"

pub mod clock;
pub mod ids;
pub mod location_field;
pub mod manager;
pub mod seed;
pub mod timesheets;
pub mod uploads;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::IdGenerator;
pub use location_field::{FieldKey, FieldOutcome, LocationFieldState, MIN_QUERY_CHARS, Panel, lookup_locations};
pub use manager::TimesheetManager;
pub use timesheets::TimesheetBook;
pub use uploads::{PROGRESS_STEP, UPLOAD_TICK, UploadProgress, UploadQueue, validate_file};
