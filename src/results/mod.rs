pub mod storage;
pub mod types;

pub use storage::{get_results_path, load_results, save_results, ResultsFile};
pub use types::{MatchRecord, ResultSink, ResultsLog};
