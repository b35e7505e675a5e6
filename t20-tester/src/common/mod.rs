pub mod scenario;
pub mod util;

pub use util::{load_json, merge_overrides, split_csv};
