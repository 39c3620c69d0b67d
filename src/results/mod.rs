pub mod storage;
pub mod types;

pub use storage::{get_scores_path, load_score_book, save_score_book};
pub use types::{ScoreBook, ScoreRecord};
