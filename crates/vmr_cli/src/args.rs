//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vmr_core::models::SeparationModel;

/// Command-line arguments for video-music-remover
#[derive(Parser, Debug)]
#[command(name = "video-music-remover")]
#[command(about = "Remove music from videos while preserving speech and other sounds \
                   using machine learning models")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove music from a directory with videos or a single video
    RemoveMusic(RemoveMusicArgs),

    /// Check that the tool is installed properly, including system dependencies
    HealthCheck {
        /// Show the commands being run and their output
        #[arg(long)]
        debug: bool,

        /// Settings file whose tool paths are checked
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the version
    Version,
}

#[derive(clap::Args, Debug)]
pub struct RemoveMusicArgs {
    /// File or directory to remove music from
    pub input_path: PathBuf,

    /// The directory where videos without music are stored
    pub output_path: PathBuf,

    /// The log file; if not passed no log is created
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// The machine learning model to use (defaults to the configured model)
    #[arg(long, value_enum)]
    pub model: Option<ModelArg>,

    /// Delete the original file after the video without music is written
    #[arg(long)]
    pub delete_original: bool,

    /// Settings file; created with defaults if missing
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Separation models selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelArg {
    /// Hybrid transformer demucs, the base model
    #[value(name = "ht-demucs", alias = "htdemucs")]
    HtDemucs,
    /// Fine-tuned hybrid transformer demucs, slower but better
    #[value(name = "ht-demucs-ft", alias = "htdemucs_ft")]
    HtDemucsFt,
    /// Trained on MusDB HQ only
    #[value(name = "mdx")]
    Mdx,
    /// Trained with extra training data
    #[value(name = "mdx-extra", alias = "mdx_extra")]
    MdxExtra,
    /// Quantized version of mdx-extra
    #[value(name = "mdx-extra-q", alias = "mdx_extra_q")]
    MdxExtraQ,
}

impl From<ModelArg> for SeparationModel {
    fn from(model: ModelArg) -> Self {
        match model {
            ModelArg::HtDemucs => SeparationModel::HtDemucs,
            ModelArg::HtDemucsFt => SeparationModel::HtDemucsFt,
            ModelArg::Mdx => SeparationModel::Mdx,
            ModelArg::MdxExtra => SeparationModel::MdxExtra,
            ModelArg::MdxExtraQ => SeparationModel::MdxExtraQ,
        }
    }
}
