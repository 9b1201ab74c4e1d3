//! `roster` - A console roster of student records
//!
//! This library keeps an ordered list of students (name, roll number, grade)
//! in memory and mirrors it to a single file after every change.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod storage;
pub mod store;
pub mod student;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use service::Roster;
pub use storage::{Storage, StorageStats};
pub use store::RecordStore;
pub use student::Student;
