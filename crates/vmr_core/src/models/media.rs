//! Media-related data structures (audio streams and their tags).

use serde::{Deserialize, Serialize};

/// Language/title tags carried by an audio stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamTags {
    /// Language code (ISO 639-2, e.g. "eng", "und").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Track title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl StreamTags {
    pub fn is_empty(&self) -> bool {
        self.language.is_none() && self.title.is_none()
    }
}

/// One audio stream of a container, as reported by the probe.
///
/// The ordered list of these for a video is the single source of truth
/// for how many audio streams exist and in which order they are written
/// back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStream {
    /// 0-based position among the audio streams (`0:a:<index>`).
    pub index: usize,
    /// Absolute stream index inside the container.
    pub stream_index: usize,
    /// Codec name (e.g. "aac", "opus").
    pub codec_name: String,
    /// Stream type tag. Always "audio".
    pub codec_type: String,
    /// Presentation timestamp of the first packet.
    #[serde(default)]
    pub start_pts: Option<i64>,
    /// Start time in seconds.
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub tags: StreamTags,
}

impl AudioStream {
    /// Create a stream with the given audio-relative index and codec.
    pub fn new(index: usize, codec_name: impl Into<String>) -> Self {
        Self {
            index,
            stream_index: index,
            codec_name: codec_name.into(),
            codec_type: "audio".to_string(),
            start_pts: None,
            start_time: None,
            tags: StreamTags::default(),
        }
    }

    /// Set the language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.tags.language = Some(language.into());
        self
    }

    /// Set the title tag.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.tags.title = Some(title.into());
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.tags.language.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.tags.title.as_deref()
    }
}
