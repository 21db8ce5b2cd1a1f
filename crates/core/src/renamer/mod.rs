//! Rename run orchestration.
//!
//! [`MediaRenamer`] owns everything a run needs: the resolved config, the
//! provider handle, the placer and a [`CancellationFlag`]. Files are
//! processed strictly one after another so provider requests are never
//! concurrent.
//!
//! Routing after a successful match:
//!
//! ```text
//! <media_base>/<upload_folder>/<Movies|TV Shows>/...     direct upload extensions
//! <media_base>/<transcode_folder>/<Movies|TV Shows>/...  everything else
//! <media_base>/<error_folder>/processing_errors/         lookup failures
//! <media_base>/<error_folder>/renaming_errors/           move failures
//! ```

mod pipeline;
mod types;

pub use pipeline::{setup_directories, MediaRenamer};
pub use types::{CancellationFlag, FileError, FileOutcome, Route, RunSummary};
