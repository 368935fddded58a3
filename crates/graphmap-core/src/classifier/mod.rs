//! API error detection in response bodies
//!
//! The remote API reports failures inside ordinary response bodies, in three
//! shapes that grew over time. [`ErrorClassifier`] recognizes them and returns
//! the typed [`ApiError`]:
//!
//! | Shape | Stage | Variant |
//! |-------|-------|---------|
//! | `{"error_code": N, "error_msg": "..."}` | [`LegacyStage`] | `OAuth` for code 190, else `ResponseStatus` |
//! | `{"error": N, "error_description": "..."}` | [`BatchStage`] | `OAuth` for code 190, else `Batch` |
//! | `{"error": {"type": "...", ...}}` | [`GraphStage`] | by `type`: `OAuth`, `QueryParse`, else `Graph` |
//!
//! Bodies are pre-filtered without parsing: only a body that starts with `{`
//! and mentions `"error` within its first bytes is parsed at all.

mod stages;

pub use stages::{BatchStage, ErrorStage, GraphStage, LegacyStage};

use crate::config::MapperConfig;
use crate::config::limits::{ERROR_MARKER, ERROR_PREFIX_WINDOW};
use crate::error::{Error, MappingResult};
use crate::tree;
use graphmap_domain::ApiError;
use memchr::memmem;
use tracing::{debug, trace};

/// Detects API errors in response bodies
pub struct ErrorClassifier {
    stages: Vec<Box<dyn ErrorStage>>,
    prefix_window: usize,
}

impl ErrorClassifier {
    /// Classifier with the legacy, batch and graph stages, in that order
    pub fn new() -> Self {
        Self::with_stages(vec![
            Box::new(LegacyStage),
            Box::new(BatchStage),
            Box::new(GraphStage),
        ])
    }

    /// Classifier running `stages` in order
    pub fn with_stages(stages: Vec<Box<dyn ErrorStage>>) -> Self {
        Self {
            stages,
            prefix_window: ERROR_PREFIX_WINDOW,
        }
    }

    /// Default stages with the pre-filter window from `config`
    pub fn from_config(config: &MapperConfig) -> Self {
        Self::new().with_prefix_window(config.error_prefix_window)
    }

    /// Change how many leading bytes the pre-filter scans
    #[must_use]
    pub fn with_prefix_window(mut self, prefix_window: usize) -> Self {
        self.prefix_window = prefix_window.max(ERROR_MARKER.len());
        self
    }

    /// Append a stage after the existing ones
    #[must_use]
    pub fn with_stage(mut self, stage: impl ErrorStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Stage names in run order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Cheap check whether a body could hold an error
    pub fn looks_like_error(&self, body: &str) -> bool {
        let body = body.trim_start();
        if !body.starts_with('{') {
            return false;
        }
        let window = &body.as_bytes()[..body.len().min(self.prefix_window)];
        memmem::find(window, ERROR_MARKER).is_some()
    }

    /// Classify a response body
    ///
    /// Returns `Ok(None)` when the body is not an error.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::MalformedJson` when a body that passed the
    /// pre-filter is not valid JSON.
    pub fn classify(&self, body: &str, http_status: Option<u16>) -> MappingResult<Option<ApiError>> {
        if !self.looks_like_error(body) {
            return Ok(None);
        }

        let raw = tree::parse(body)?;
        let Some(object) = raw.as_object() else {
            return Ok(None);
        };

        for stage in &self.stages {
            if let Some(error) = stage.classify(object, &raw, http_status) {
                debug!(
                    stage = stage.name(),
                    kind = %error.kind(),
                    code = ?error.error_code(),
                    http_status = ?http_status,
                    "classified API error"
                );
                return Ok(Some(error));
            }
        }

        trace!("body mentions an error key but matches no stage");
        Ok(None)
    }

    /// Fail if the body holds an API error
    ///
    /// # Errors
    ///
    /// `Error::Api` for a recognized error, `Error::Mapping` for a malformed
    /// body that passed the pre-filter.
    pub fn check(&self, body: &str, http_status: Option<u16>) -> crate::Result<()> {
        match self.classify(body, http_status)? {
            Some(error) => Err(Error::Api(error)),
            None => Ok(()),
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ErrorClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorClassifier")
            .field("stages", &self.stage_names())
            .field("prefix_window", &self.prefix_window)
            .finish()
    }
}
