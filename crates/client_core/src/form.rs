//! Article form state as an immutable value with pure transitions.
//!
//! Every field handler is a [`FormAction`]; [`FormState::apply`] consumes the old
//! state and returns the next one, re-establishing the source/search coupling
//! through [`normalize`] on every step.

use shared::{
    domain::{ArticleLength, ArticleType, Language, ProjectFolderId, Tone},
    protocol::ArticleSubmission,
};
use thiserror::Error;

pub const MIN_SOURCES: u8 = 1;
pub const MAX_SOURCES: u8 = 5;

/// Word estimate used while no length has been chosen.
pub const DEFAULT_ESTIMATED_WORDS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub article_type: Option<ArticleType>,
    pub selected_project: Option<ProjectFolderId>,
    pub keywords: String,
    pub description: String,
    pub tone: Option<Tone>,
    pub length: Option<ArticleLength>,
    pub language: Language,
    pub include_images: bool,
    pub include_videos: bool,
    pub include_sources: bool,
    pub enable_web_search: bool,
    pub number_of_sources: u8,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            article_type: None,
            selected_project: None,
            keywords: String::new(),
            description: String::new(),
            tone: None,
            length: None,
            language: Language::default(),
            include_images: false,
            include_videos: false,
            include_sources: false,
            enable_web_search: false,
            number_of_sources: MIN_SOURCES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetTitle(String),
    SetArticleType(ArticleType),
    SetSelectedProject(Option<ProjectFolderId>),
    SetKeywords(String),
    SetDescription(String),
    SetTone(Tone),
    SetLength(ArticleLength),
    SetLanguage(Language),
    SetIncludeImages(bool),
    SetIncludeVideos(bool),
    SetIncludeSources(bool),
    SetEnableWebSearch(bool),
    /// Raw text from the source-count input.
    SetNumberOfSources(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("not enough words remaining: about {estimated} needed, {remaining} left")]
    InsufficientWords { estimated: u32, remaining: i64 },
}

impl FormState {
    pub fn apply(mut self, action: FormAction) -> Self {
        match action {
            FormAction::SetTitle(v) => self.title = v,
            FormAction::SetArticleType(v) => self.article_type = Some(v),
            FormAction::SetSelectedProject(v) => self.selected_project = v,
            FormAction::SetKeywords(v) => self.keywords = v,
            FormAction::SetDescription(v) => self.description = v,
            FormAction::SetTone(v) => self.tone = Some(v),
            FormAction::SetLength(v) => self.length = Some(v),
            FormAction::SetLanguage(v) => self.language = v,
            FormAction::SetIncludeImages(v) => self.include_images = v,
            FormAction::SetIncludeVideos(v) => self.include_videos = v,
            FormAction::SetIncludeSources(v) => {
                if self.include_sources && !v {
                    self.number_of_sources = MIN_SOURCES;
                }
                self.include_sources = v;
            }
            FormAction::SetEnableWebSearch(v) => self.enable_web_search = v,
            FormAction::SetNumberOfSources(raw) => {
                if let Some(count) = parse_source_count(&raw) {
                    self.number_of_sources = count;
                }
            }
        }
        normalize(self)
    }

    pub fn estimated_word_count(&self) -> u32 {
        estimated_word_count(self.length)
    }

    pub fn can_submit(&self, words_remaining: i64) -> bool {
        i64::from(self.estimated_word_count()) <= words_remaining
    }

    /// Web search is forced on and not user-editable while sources are included.
    pub fn web_search_locked(&self) -> bool {
        self.include_sources
    }

    /// Packages every field, requiring the fields the form marks as required.
    pub fn to_submission(&self) -> Result<ArticleSubmission, SubmitError> {
        let title = required_text(&self.title, "title")?;
        let article_type = self
            .article_type
            .ok_or(SubmitError::MissingField("articleType"))?;
        let keywords = required_text(&self.keywords, "keywords")?;
        let description = required_text(&self.description, "description")?;
        let tone = self.tone.ok_or(SubmitError::MissingField("tone"))?;
        let length = self.length.ok_or(SubmitError::MissingField("length"))?;

        Ok(ArticleSubmission {
            title,
            article_type,
            project_id: self.selected_project,
            keywords,
            description,
            tone,
            length,
            language: self.language,
            include_images: self.include_images,
            include_videos: self.include_videos,
            include_sources: self.include_sources,
            enable_web_search: self.enable_web_search,
            number_of_sources: self.number_of_sources,
        })
    }
}

/// Re-establishes the source/search coupling.
pub fn normalize(mut state: FormState) -> FormState {
    if state.include_sources {
        state.enable_web_search = true;
    }
    state
}

pub fn estimated_word_count(length: Option<ArticleLength>) -> u32 {
    length.map_or(DEFAULT_ESTIMATED_WORDS, ArticleLength::estimated_words)
}

/// Parses number-input text the way a browser's integer parse does (leading
/// whitespace and sign, then digits, anything after ignored) and accepts only
/// counts in `MIN_SOURCES..=MAX_SOURCES`.
pub fn parse_source_count(raw: &str) -> Option<u8> {
    let trimmed = raw.trim_start();
    let (sign_len, rest) = match trimmed.as_bytes().first() {
        Some(b'+') | Some(b'-') => (1, &trimmed[1..]),
        _ => (0, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = trimmed[..sign_len + digits].parse().ok()?;
    u8::try_from(value)
        .ok()
        .filter(|count| (MIN_SOURCES..=MAX_SOURCES).contains(count))
}

fn required_text(value: &str, field: &'static str) -> Result<String, SubmitError> {
    if value.is_empty() {
        return Err(SubmitError::MissingField(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
