use crate::config::ExcerptConfig;
use crate::model::{Excerpt, ExcerptKind};
use crate::paste::PasteOutcome;
use std::path::PathBuf;

pub mod card;
pub mod config;
pub mod kind;
pub mod paste;

/// Where excerpt keeps its files.
#[derive(Debug, Clone)]
pub struct ExcerptPaths {
    pub home: PathBuf,
}

impl ExcerptPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub excerpt: Option<Excerpt>,
    pub kind: Option<ExcerptKind>,
    pub card_paths: Vec<PathBuf>,
    pub share_title: Option<String>,
    pub config: Option<ExcerptConfig>,
    pub paste_outcome: Option<PasteOutcome>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_excerpt(mut self, excerpt: Excerpt) -> Self {
        self.excerpt = Some(excerpt);
        self
    }

    pub fn with_kind(mut self, kind: ExcerptKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_card_path(mut self, path: PathBuf) -> Self {
        self.card_paths.push(path);
        self
    }

    pub fn with_share_title(mut self, title: String) -> Self {
        self.share_title = Some(title);
        self
    }

    pub fn with_config(mut self, config: ExcerptConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_paste_outcome(mut self, outcome: PasteOutcome) -> Self {
        self.paste_outcome = Some(outcome);
        self
    }
}
