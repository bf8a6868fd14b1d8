//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Pretrained separation model passed to the separation tool.
///
/// Variants differ only in the identifier handed to the tool, which also
/// names the output subdirectory it writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationModel {
    /// Hybrid transformer demucs, the base model.
    #[default]
    #[serde(rename = "htdemucs")]
    HtDemucs,
    /// Fine-tuned hybrid transformer. Slower, usually cleaner.
    #[serde(rename = "htdemucs_ft")]
    HtDemucsFt,
    /// Trained on MusDB HQ only.
    Mdx,
    /// Trained with extra training data.
    MdxExtra,
    /// Quantized version of `MdxExtra`.
    MdxExtraQ,
}

impl SeparationModel {
    /// All models, in the order they are offered to users.
    pub const ALL: [SeparationModel; 5] = [
        SeparationModel::HtDemucs,
        SeparationModel::HtDemucsFt,
        SeparationModel::Mdx,
        SeparationModel::MdxExtra,
        SeparationModel::MdxExtraQ,
    ];

    /// Identifier understood by the separation tool (`-n <id>`).
    pub fn model_id(&self) -> &'static str {
        match self {
            SeparationModel::HtDemucs => "htdemucs",
            SeparationModel::HtDemucsFt => "htdemucs_ft",
            SeparationModel::Mdx => "mdx",
            SeparationModel::MdxExtra => "mdx_extra",
            SeparationModel::MdxExtraQ => "mdx_extra_q",
        }
    }
}

impl std::fmt::Display for SeparationModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.model_id())
    }
}

/// Encoding of the separated stem written by the separation tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemFormat {
    #[default]
    Mp3,
    Flac,
}

impl StemFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            StemFormat::Mp3 => "mp3",
            StemFormat::Flac => "flac",
        }
    }

    /// Tool flag selecting this encoding.
    pub fn flag(&self) -> &'static str {
        match self {
            StemFormat::Mp3 => "--mp3",
            StemFormat::Flac => "--flac",
        }
    }
}

/// External tools the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Ffmpeg,
    Ffprobe,
    Demucs,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Ffmpeg, Tool::Ffprobe, Tool::Demucs];

    /// Default executable name looked up on PATH.
    pub fn default_program(&self) -> &'static str {
        match self {
            Tool::Ffmpeg => "ffmpeg",
            Tool::Ffprobe => "ffprobe",
            Tool::Demucs => "demucs",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.default_program())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_ids_match_tool_names() {
        let ids: Vec<&str> = SeparationModel::ALL.iter().map(|m| m.model_id()).collect();
        assert_eq!(
            ids,
            vec!["htdemucs", "htdemucs_ft", "mdx", "mdx_extra", "mdx_extra_q"]
        );
    }

    #[test]
    fn model_serde_uses_tool_ids() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            model: SeparationModel,
        }

        for model in SeparationModel::ALL {
            let text = toml::to_string(&Wrapper { model }).unwrap();
            assert!(text.contains(model.model_id()), "{text}");
            let parsed: Wrapper = toml::from_str(&text).unwrap();
            assert_eq!(parsed.model, model);
        }
    }

    #[test]
    fn default_model_is_base() {
        assert_eq!(SeparationModel::default(), SeparationModel::HtDemucs);
        assert_eq!(StemFormat::default().extension(), "mp3");
    }
}
