//! Run settings gathered from the command line and environment.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::exam::ExamConfig;

/// Environment variable naming the default log file for `run`.
pub const LOG_FILE_ENV: &str = "COURSE_QUIZ_LOG";

/// Settings for one `run` of the terminal quiz.
///
/// Exam fields set here win over the bank file's `exam` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub bank_path: PathBuf,
    pub questions: Option<usize>,
    pub shuffle: bool,
    pub time_limit: Option<u64>,
    pub pass_threshold: Option<u8>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn apply_to(&self, exam: &mut ExamConfig) {
        if let Some(questions) = self.questions {
            exam.total_questions = Some(questions);
        }
        if self.shuffle {
            exam.shuffle = true;
        }
        if let Some(time_limit) = self.time_limit {
            exam.time_limit = Some(time_limit);
        }
        if let Some(pass_threshold) = self.pass_threshold {
            exam.pass_threshold = Some(pass_threshold);
        }
    }

    /// Seeded when a seed is configured, so a draw can be reproduced.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
