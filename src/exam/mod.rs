//! Mock-exam support: per-bank settings, question draws, results and
//! the filtered review of an attempt.

mod config;
mod result;
mod review;
mod selection;

pub use config::ExamConfig;
pub use result::{CategoryScore, ExamResult};
pub use review::ReviewFilter;
pub use selection::{select_balanced, select_in_order, select_random};
