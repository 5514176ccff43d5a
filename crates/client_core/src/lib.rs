//! Client-side core of the article composer: form state, folder lookup and the
//! HTTP client for the article service.

pub mod controller;
pub mod folders;
pub mod form;
pub mod http;

pub use controller::{
    ArticleFormController, FormProps, FormView, SelectOption, SubmitCallback,
    INSUFFICIENT_WORDS_WARNING,
};
pub use folders::{lookup_folders, FetchToken, FolderFetchOutcome, FolderRequests, FolderSource};
pub use form::{FormAction, FormState, SubmitError};
pub use http::{ArticleServiceClient, ClientError};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
