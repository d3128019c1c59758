pub mod dataset;
pub mod domain;
mod evaluator;
pub mod report;

pub use dataset::{load_cutoffs, parse_cutoffs, DatasetError};
pub use domain::{AdmissionMatch, CutoffRecord, Evaluation, EvaluationError, Subject};
pub use evaluator::{evaluate, MAX_MATCHES};
