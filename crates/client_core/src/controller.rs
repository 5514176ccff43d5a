//! Article form controller: owns one form's state, derives its view, loads the
//! user's project folders and hands the finished submission to the embedder.

use std::sync::Arc;

use shared::{
    domain::{Choice, ProjectFolder, ProjectFolderId},
    protocol::ArticleSubmission,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::{
    folders::{lookup_folders, FolderFetchOutcome, FolderRequests, FolderSource},
    form::{FormAction, FormState, SubmitError},
};

pub const INSUFFICIENT_WORDS_WARNING: &str =
    "Ikke nok ord igjen. Vennligst oppgrader pakken din eller kjøp flere ord.";

pub type SubmitCallback = Box<dyn FnMut(ArticleSubmission) + Send>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormProps {
    pub words_remaining: i64,
    pub total_words: i64,
    pub user_identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn from_choices<C: Choice>() -> Vec<SelectOption> {
        C::ALL
            .iter()
            .map(|choice| SelectOption {
                value: choice.as_str().to_string(),
                label: choice.label().to_string(),
            })
            .collect()
    }

    fn from_folder(folder: &ProjectFolder) -> Self {
        Self {
            value: folder.id.to_string(),
            label: folder.name.clone(),
        }
    }
}

/// Derived, render-ready state of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub estimated_word_count: u32,
    pub submit_enabled: bool,
    pub quota_warning: Option<&'static str>,
    pub quota_label: String,
    pub web_search_locked: bool,
    pub show_source_count: bool,
    pub project_options: Vec<SelectOption>,
}

pub struct ArticleFormController {
    state: FormState,
    props: FormProps,
    on_submit: SubmitCallback,
    source: Arc<dyn FolderSource>,
    folders: Vec<ProjectFolder>,
    requests: FolderRequests,
    outcomes_tx: mpsc::UnboundedSender<FolderFetchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<FolderFetchOutcome>,
}

impl ArticleFormController {
    pub fn new(
        props: FormProps,
        source: Arc<dyn FolderSource>,
        on_submit: impl FnMut(ArticleSubmission) + Send + 'static,
    ) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            state: FormState::default(),
            props,
            on_submit: Box::new(on_submit),
            source,
            folders: Vec::new(),
            requests: FolderRequests::default(),
            outcomes_tx,
            outcomes_rx,
        }
    }

    /// Starts the initial folder fetch. Must be called inside a tokio runtime.
    pub fn mount(&mut self) -> JoinHandle<()> {
        self.refresh_folders()
    }

    /// Switches the owning user and refetches folders. Returns `None` when the
    /// identity did not change.
    pub fn set_user_identity(&mut self, identity: impl Into<String>) -> Option<JoinHandle<()>> {
        let identity = identity.into();
        if identity == self.props.user_identity {
            return None;
        }
        self.props.user_identity = identity;
        Some(self.refresh_folders())
    }

    pub fn set_word_quota(&mut self, words_remaining: i64, total_words: i64) {
        self.props.words_remaining = words_remaining;
        self.props.total_words = total_words;
    }

    fn refresh_folders(&mut self) -> JoinHandle<()> {
        let token = self.requests.issue();
        let owner = self.props.user_identity.clone();
        let source = Arc::clone(&self.source);
        let outcomes_tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let folders = lookup_folders(source.as_ref(), &owner).await;
            let _ = outcomes_tx.send(FolderFetchOutcome {
                token,
                owner,
                folders,
            });
        })
    }

    /// Waits for the next folder fetch to finish and returns whether its result
    /// was applied. Waits indefinitely when no fetch is in flight.
    pub async fn next_folder_update(&mut self) -> bool {
        match self.outcomes_rx.recv().await {
            Some(outcome) => self.apply_folder_outcome(outcome),
            None => false,
        }
    }

    /// Applies every finished fetch without waiting; returns how many were applied.
    pub fn drain_folder_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            if self.apply_folder_outcome(outcome) {
                applied += 1;
            }
        }
        applied
    }

    fn apply_folder_outcome(&mut self, outcome: FolderFetchOutcome) -> bool {
        if !self.requests.is_current(outcome.token) {
            debug!(owner = %outcome.owner, "discarding superseded folder list");
            return false;
        }
        self.folders = outcome.folders;
        true
    }

    pub fn dispatch(&mut self, action: FormAction) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    /// Handles a project selection given as the option value; empty clears it.
    pub fn select_project_by_value(&mut self, value: &str) {
        if value.is_empty() {
            self.dispatch(FormAction::SetSelectedProject(None));
        } else if let Ok(id) = value.parse::<ProjectFolderId>() {
            self.dispatch(FormAction::SetSelectedProject(Some(id)));
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn props(&self) -> &FormProps {
        &self.props
    }

    pub fn folders(&self) -> &[ProjectFolder] {
        &self.folders
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit(self.props.words_remaining)
    }

    pub fn view(&self) -> FormView {
        let submit_enabled = self.can_submit();
        FormView {
            estimated_word_count: self.state.estimated_word_count(),
            submit_enabled,
            quota_warning: (!submit_enabled).then_some(INSUFFICIENT_WORDS_WARNING),
            quota_label: format!(
                "Gjenværende ord: {} / Totalt: {}",
                self.props.words_remaining, self.props.total_words
            ),
            web_search_locked: self.state.web_search_locked(),
            show_source_count: self.state.include_sources,
            project_options: self.folders.iter().map(SelectOption::from_folder).collect(),
        }
    }

    /// Hands the current state to the submit callback exactly once. State is
    /// left as is; resetting the form is up to the embedder.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        if !self.can_submit() {
            return Err(SubmitError::InsufficientWords {
                estimated: self.state.estimated_word_count(),
                remaining: self.props.words_remaining,
            });
        }
        let submission = self.state.to_submission()?;
        (self.on_submit)(submission);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
