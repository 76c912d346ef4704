//! Core types for impacters.
//!
//! This crate holds everything the shell operates on:
//! - `Member`, `Event` and the in-memory `Store` that owns them
//! - reminder, upcoming-event and attendance computations
//! - CSV import and attendance report export

pub mod attendance;
pub mod config;
pub mod csv_import;
pub mod date;
pub mod error;
pub mod event;
pub mod export;
pub mod member;
pub mod reminder;
pub mod seed;
pub mod store;
pub mod upcoming;

pub use attendance::{AttendanceReport, AttendanceRow};
pub use error::{ImpactersError, ImpactersResult};
pub use event::{Event, EventDraft, EventId};
pub use member::{DateField, Member, MemberDraft, MemberId};
pub use store::Store;
