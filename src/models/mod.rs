pub mod rubric;
pub mod report;

pub use rubric::*;
pub use report::*;
