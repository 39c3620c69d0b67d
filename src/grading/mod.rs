pub mod engine;
pub mod tier;

pub use engine::{grade, GradeReport, QuestionOutcome};
pub use tier::PerformanceTier;
