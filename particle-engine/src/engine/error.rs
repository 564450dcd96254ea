use thiserror::Error;

/// Failures surfaced by the background animation.
///
/// None of these are fatal to the host page. Asset failures leave the
/// animation absent, sampling shortfalls leave a word partially formed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackgroundError {
    #[error("failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("word '{word}' sampled {accepted} of {requested} target points")]
    InsufficientSampling {
        word: String,
        requested: usize,
        accepted: usize,
    },

    #[error("particle {index} has no text target")]
    MissingTarget { index: usize },

    #[error("unknown panel id: {0}")]
    UnknownPanel(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}
