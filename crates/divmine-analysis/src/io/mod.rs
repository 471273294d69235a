//! Line-oriented dataset/pattern/result files and JSON outputs.

pub mod reader;
pub mod writer;

pub use reader::{read_dataset, read_pairwise, read_pattern_list, read_results};
pub use writer::{write_json, write_results};
