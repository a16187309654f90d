//! Editor session for live SML editing.
//!
//! Call [`Session::update`] with the full text after every settled edit. It
//! re-parses, re-highlights and re-decodes the document. While the text is
//! broken the last good model stays in place, so a preview does not blank
//! out on every half-typed line.

use std::sync::Arc;

use sml_highlight::{highlight_source, HighlightConfig, Highlighted};
use sml_model::{decode, DecodeWarning, Model};

/// Result of one [`Session::update`].
#[derive(Debug, Clone)]
pub struct Update {
    pub highlighted: Highlighted,
    /// The newest model that decoded without error, if any ever did.
    pub model: Option<Arc<Model>>,
    /// Why the text did not produce a fresh model.
    pub error: Option<String>,
    pub warnings: Vec<DecodeWarning>,
    /// `model` comes from an earlier text.
    pub stale: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    config: HighlightConfig,
    model: Option<Arc<Model>>,
    error: Option<String>,
}

impl Session {
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            config,
            model: None,
            error: None,
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn model(&self) -> Option<Arc<Model>> {
        self.model.clone()
    }

    /// Message of the last failed update; cleared by the next good one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update(&mut self, text: &str) -> Update {
        let highlighted = highlight_source(text, &self.config);

        let decoded = match &highlighted.error {
            Some(e) => Err(e.to_string()),
            None => decode(&highlighted.tree).map_err(|e| e.to_string()),
        };

        let (warnings, stale) = match decoded {
            Ok(decoded) => {
                self.model = Some(Arc::new(decoded.value));
                self.error = None;
                (decoded.warnings, false)
            }
            Err(message) => {
                if self.model.is_some() {
                    log::warn!("keeping previous model: {message}");
                }
                self.error = Some(message);
                (Vec::new(), self.model.is_some())
            }
        };

        Update {
            highlighted,
            model: self.model.clone(),
            error: self.error.clone(),
            warnings,
            stale,
        }
    }
}

/// Version of the SML core libraries.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
