pub mod vfs;
pub mod context;
pub mod enumerator;
pub mod classifier;
pub mod matcher;
pub mod diff_tool;
pub mod report;
pub mod comparison;

pub use vfs::LocalVfs;
pub use context::RunContext;
pub use enumerator::TreeEnumerator;
pub use classifier::FileClassifier;
pub use matcher::PairMatcher;
pub use diff_tool::{DiffInvoker, ExternalDiff};
pub use report::{format_pair_line, PairReporter, MISSING_LABEL};
pub use comparison::ComparisonEngine;
