pub mod detector;
pub mod parallel;
pub mod patterns;
pub mod project_scanner;

pub use detector::{scan_file, scan_file_with_progress, InstrumentDetector};
pub use parallel::{DetectionOutcome, ParallelDetector};
pub use project_scanner::ProjectPathScanner;
