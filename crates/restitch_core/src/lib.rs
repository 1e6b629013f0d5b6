mod error;
pub mod filename;
pub mod report;
pub mod selector;
mod traits;

pub use error::{CoreError, Result};
pub use report::{CopyFailure, RecoveredFile, RecoveryReport};
pub use selector::{select, Cutoff, RevisionCandidate, SelectionOutcome};
pub use traits::{BackupStore, FileEnumerator, RevisionCopier};
