//! Workflow session state machine
//!
//! Idle → FileStaged → Uploading → {ResultsReady | Failed}. "Change image" and
//! "new search" return to Idle and clear every result and error. No state is
//! terminal.
//!
//! User actions go through [`WorkflowSession::dispatch`], which applies the
//! synchronous part of a transition and hands back at most one [`Effect`] for
//! the host to run. Suspending work (preview decode, upload) is completed
//! with [`WorkflowSession::complete_preview`] and
//! [`WorkflowSession::complete_submit`], each keyed by the [`Ticket`] that
//! started it. Outcomes for a superseded ticket are dropped.

use crate::error::{SelectionError, UploadError};
use crate::error_presenter::ErrorPresenter;
use crate::models::AnalysisResult;
use crate::pagination::{PageDirection, PlaylistState};
use crate::selection::{self, CandidateFile, StagedFile};
use crate::upload::{RecommendBackend, Recommendation};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Workflow state; exactly one at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Nothing staged (initial state)
    Idle,
    /// Valid image staged, submission enabled
    FileStaged,
    /// Submission in flight
    Uploading,
    /// Analysis and playlist available
    ResultsReady,
    /// Last submission failed; selection stage shown with the error
    Failed,
}

/// Monotonically increasing id for one preview decode or one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// User-triggered commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Click on the upload area
    ChooseFile,
    /// File picked in the dialog (`None` when the dialog was dismissed)
    FileSelected(Option<CandidateFile>),
    /// File dropped onto the upload area
    FileDropped(Option<CandidateFile>),
    ChangeImage,
    Submit,
    PreviousPage,
    NextPage,
    NewSearch,
}

/// Work the host must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenFilePicker,
    /// Encode the preview, then call `complete_preview`
    DecodePreview { ticket: Ticket, file: CandidateFile },
    /// Submit the image, then call `complete_submit`
    Upload { ticket: Ticket, file: StagedFile },
    ScrollToTop,
}

/// Whether a completion was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Ticket superseded by a newer selection, submission, or reset
    Stale,
}

/// Result of a whole submission round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing staged or an upload already in flight
    Skipped,
    ResultsReady { song_count: usize },
    Failed(UploadError),
    Stale,
}

/// One workflow instance: the only owner of workflow state
#[derive(Debug)]
pub struct WorkflowSession {
    session_id: Uuid,
    state: WorkflowState,
    staged: Option<StagedFile>,
    analysis: Option<AnalysisResult>,
    playlist: Option<PlaylistState>,
    errors: ErrorPresenter,
    last_ticket: u64,
    pending_preview: Option<Ticket>,
    in_flight: Option<Ticket>,
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state: WorkflowState::Idle,
            staged: None,
            analysis: None,
            playlist: None,
            errors: ErrorPresenter::new(),
            last_ticket: 0,
            pending_preview: None,
            in_flight: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn playlist(&self) -> Option<&PlaylistState> {
        self.playlist.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.errors.message()
    }

    /// A preview decode has been started and not yet completed
    pub fn is_decoding(&self) -> bool {
        self.pending_preview.is_some()
    }

    /// Submission is possible: a file is staged and nothing is in flight
    pub fn can_submit(&self) -> bool {
        self.staged.is_some() && self.state != WorkflowState::Uploading
    }

    /// Busy indicator, derived from state
    pub fn is_busy(&self) -> bool {
        self.state == WorkflowState::Uploading
    }

    fn next_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        Ticket(self.last_ticket)
    }

    fn transition(&mut self, new_state: WorkflowState) {
        if self.state != new_state {
            debug!(
                session_id = %self.session_id,
                from = ?self.state,
                to = ?new_state,
                "Workflow transition"
            );
        }
        self.state = new_state;
    }

    /// Drop results, errors, staged file and any outstanding work
    fn reset(&mut self) {
        self.staged = None;
        self.analysis = None;
        self.playlist = None;
        self.errors.clear();
        self.pending_preview = None;
        self.in_flight = None;
        self.transition(WorkflowState::Idle);
    }

    /// Apply a user action
    ///
    /// Only file selection can fail: a non-image candidate yields
    /// `InvalidFileType` and leaves the session untouched.
    pub fn dispatch(&mut self, action: UserAction) -> Result<Option<Effect>, SelectionError> {
        match action {
            UserAction::ChooseFile => Ok(self.choose_file()),
            UserAction::FileSelected(candidate) | UserAction::FileDropped(candidate) => {
                self.accept_candidate(candidate)
            }
            UserAction::ChangeImage => {
                info!(session_id = %self.session_id, "Image cleared");
                self.reset();
                Ok(None)
            }
            UserAction::Submit => Ok(self.begin_submit()),
            UserAction::PreviousPage => Ok(self.navigate(PageDirection::Previous)),
            UserAction::NextPage => Ok(self.navigate(PageDirection::Next)),
            UserAction::NewSearch => {
                info!(session_id = %self.session_id, "New search");
                self.reset();
                Ok(None)
            }
        }
    }

    fn choose_file(&mut self) -> Option<Effect> {
        if self.state == WorkflowState::Uploading {
            return None;
        }
        Some(Effect::OpenFilePicker)
    }

    fn accept_candidate(
        &mut self,
        candidate: Option<CandidateFile>,
    ) -> Result<Option<Effect>, SelectionError> {
        let Some(candidate) = candidate else {
            return Ok(None);
        };
        let candidate = selection::validate(candidate)?;

        // A new image replaces everything shown before it
        self.reset();
        let ticket = self.next_ticket();
        self.pending_preview = Some(ticket);
        debug!(
            session_id = %self.session_id,
            ticket = ticket.value(),
            name = %candidate.name,
            "Decoding preview"
        );

        Ok(Some(Effect::DecodePreview {
            ticket,
            file: candidate,
        }))
    }

    /// Finish a preview decode started by `DecodePreview`
    pub fn complete_preview(
        &mut self,
        ticket: Ticket,
        result: Result<StagedFile, SelectionError>,
    ) -> Result<Completion, SelectionError> {
        if self.pending_preview != Some(ticket) {
            debug!(ticket = ticket.value(), "Ignoring stale preview");
            return Ok(Completion::Stale);
        }
        self.pending_preview = None;

        match result {
            Ok(staged) => {
                info!(
                    session_id = %self.session_id,
                    name = %staged.name(),
                    content_type = %staged.content_type(),
                    "Image staged"
                );
                self.staged = Some(staged);
                self.transition(WorkflowState::FileStaged);
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Preview failed");
                self.errors.show(e.user_message());
                self.transition(WorkflowState::Idle);
                Err(e)
            }
        }
    }

    fn begin_submit(&mut self) -> Option<Effect> {
        if !self.can_submit() {
            debug!(state = ?self.state, "Submit ignored");
            return None;
        }
        let file = self.staged.clone()?;

        let ticket = self.next_ticket();
        self.in_flight = Some(ticket);
        self.analysis = None;
        self.playlist = None;
        self.errors.clear();
        self.transition(WorkflowState::Uploading);
        info!(
            session_id = %self.session_id,
            submission = ticket.value(),
            "Submitting image"
        );

        Some(Effect::Upload { ticket, file })
    }

    /// Finish a submission started by `Upload`
    ///
    /// Only the outcome for the current submission is applied.
    pub fn complete_submit(
        &mut self,
        ticket: Ticket,
        result: Result<Recommendation, UploadError>,
    ) -> SubmitOutcome {
        if self.in_flight != Some(ticket) {
            warn!(
                session_id = %self.session_id,
                submission = ticket.value(),
                "Discarding stale submission response"
            );
            return SubmitOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(recommendation) => {
                let song_count = recommendation.songs.len();
                self.analysis = Some(recommendation.analysis);
                self.playlist = Some(PlaylistState::new(recommendation.songs));
                self.transition(WorkflowState::ResultsReady);
                info!(session_id = %self.session_id, song_count, "Results ready");
                SubmitOutcome::ResultsReady { song_count }
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Submission failed");
                self.errors.show(e.user_message());
                self.transition(WorkflowState::Failed);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn navigate(&mut self, direction: PageDirection) -> Option<Effect> {
        if self.state != WorkflowState::ResultsReady {
            return None;
        }
        let playlist = self.playlist.as_mut()?;
        let next = playlist.page(direction);
        if next.current_page() == playlist.current_page() {
            return None;
        }
        debug!(page = next.current_page(), "Page changed");
        *playlist = next;
        Some(Effect::ScrollToTop)
    }

    /// Select a file and wait for its preview
    pub async fn select_file(
        &mut self,
        candidate: Option<CandidateFile>,
    ) -> Result<Completion, SelectionError> {
        match self.dispatch(UserAction::FileSelected(candidate))? {
            Some(Effect::DecodePreview { ticket, file }) => {
                let result = selection::stage(file).await;
                self.complete_preview(ticket, result)
            }
            _ => Ok(Completion::Applied),
        }
    }

    /// Submit the staged file through `backend` and apply the outcome
    pub async fn submit<B>(&mut self, backend: &B) -> SubmitOutcome
    where
        B: RecommendBackend + ?Sized,
    {
        match self.dispatch(UserAction::Submit) {
            Ok(Some(Effect::Upload { ticket, file })) => {
                let result = backend.recommend(&file).await;
                self.complete_submit(ticket, result)
            }
            _ => SubmitOutcome::Skipped,
        }
    }
}
