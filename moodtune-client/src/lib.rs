//! moodtune-client library - image-to-playlist workflow controller
//!
//! Drives one workflow: stage an image, submit it to the recommendation
//! service, then render the returned analysis next to a paginated playlist.
//!
//! The whole workflow lives in one owned [`WorkflowSession`]. User actions go
//! through [`WorkflowSession::dispatch`]; the views are pure functions of the
//! session ([`view::ViewModel`]).

pub mod error;
pub mod error_presenter;
pub mod models;
pub mod pagination;
pub mod render;
pub mod selection;
pub mod session;
pub mod upload;
pub mod view;

pub use error::{SelectionError, UploadError};
pub use models::{AnalysisResult, Song};
pub use pagination::{PageDirection, PlaylistState, PAGE_SIZE};
pub use selection::{CandidateFile, StagedFile};
pub use session::{Effect, SubmitOutcome, UserAction, WorkflowSession, WorkflowState};
pub use upload::{RecommendBackend, RecommendClient, Recommendation};
