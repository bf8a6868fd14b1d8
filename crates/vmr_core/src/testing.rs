//! Scripted tool runner used by unit tests.
//!
//! Emulates ffprobe, ffmpeg and demucs on the filesystem: probes answer
//! from registered stream layouts, extraction and remux write their output
//! files, separation writes the stem the real tool would.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use tempfile::TempDir;

use crate::config::SeparationSettings;
use crate::events::EventDispatcher;
use crate::models::{AudioStream, Tool, VideoJob};
use crate::orchestrator::{Context, Pipeline};
use crate::separation::create_music_remover;
use crate::tools::{ToolCommand, ToolError, ToolOutput, ToolResult, ToolRunner, Toolchain};

#[derive(Default)]
struct Script {
    streams: HashMap<String, Vec<AudioStream>>,
    probe_overrides: HashMap<String, ToolOutput>,
    failing_probe: HashSet<String>,
    failing_extract: HashSet<String>,
    failing_remux: HashSet<String>,
    no_separation_output: HashSet<String>,
    missing_tools: HashSet<Tool>,
}

/// Fake [`ToolRunner`] keyed by video file name.
#[derive(Default)]
pub struct FakeRunner {
    script: Script,
    calls: Mutex<Vec<ToolCommand>>,
    current_video: Mutex<Option<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the audio layout reported for `name`.
    pub fn with_video(mut self, name: &str, streams: Vec<AudioStream>) -> Self {
        self.script.streams.insert(name.to_string(), streams);
        self
    }

    /// Answer probes of `name` with a raw output.
    pub fn with_probe_output(mut self, name: &str, output: ToolOutput) -> Self {
        self.script.probe_overrides.insert(name.to_string(), output);
        self
    }

    pub fn failing_probe(mut self, name: &str) -> Self {
        self.script.failing_probe.insert(name.to_string());
        self
    }

    pub fn failing_extract(mut self, name: &str) -> Self {
        self.script.failing_extract.insert(name.to_string());
        self
    }

    /// Remux of `name` writes a partial file then exits 1.
    pub fn failing_remux(mut self, name: &str) -> Self {
        self.script.failing_remux.insert(name.to_string());
        self
    }

    /// Separation of streams from `name` exits 0 without writing a stem.
    pub fn separation_without_output(mut self, name: &str) -> Self {
        self.script.no_separation_output.insert(name.to_string());
        self
    }

    /// Running `tool` fails as if it were not installed.
    pub fn without_tool(mut self, tool: Tool) -> Self {
        self.script.missing_tools.insert(tool);
        self
    }

    /// Every command run so far.
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().clone()
    }

    /// Commands run for one tool.
    pub fn calls_for(&self, tool: Tool) -> Vec<ToolCommand> {
        self.calls().into_iter().filter(|c| c.tool == tool).collect()
    }

    fn probe(&self, command: &ToolCommand) -> ToolOutput {
        let name = last_arg_name(command);
        *self.current_video.lock() = Some(name.clone());

        if let Some(output) = self.script.probe_overrides.get(&name) {
            return output.clone();
        }
        if self.script.failing_probe.contains(&name) {
            return ToolOutput::failure(
                1,
                format!("{name}: Invalid data found when processing input"),
            );
        }

        let streams = self
            .script
            .streams
            .get(&name)
            .cloned()
            .unwrap_or_else(|| vec![AudioStream::new(0, "aac")]);
        ToolOutput::success(probe_json(&streams).to_string())
    }

    fn ffmpeg(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        let args = command.args_lossy();
        let input = args
            .iter()
            .position(|a| a == "-i")
            .and_then(|i| args.get(i + 1))
            .map(|p| name_of(Path::new(p)))
            .unwrap_or_default();
        let output = PathBuf::from(args.last().cloned().unwrap_or_default());

        let is_remux = args.iter().any(|a| a == "-0:a");
        if is_remux {
            if self.script.failing_remux.contains(&input) {
                fs::write(&output, b"partial")?;
                return Ok(ToolOutput::failure(1, "Conversion failed!"));
            }
            fs::write(&output, format!("remuxed {input}"))?;
        } else {
            if self.script.failing_extract.contains(&input) {
                return Ok(ToolOutput::failure(1, "Stream map matches no streams."));
            }
            fs::write(&output, format!("audio from {input}"))?;
        }
        Ok(ToolOutput::success(Vec::new()))
    }

    fn demucs(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        let args = command.args_lossy();
        let value_after = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
                .unwrap_or_default()
        };
        let model = value_after("-n");
        let out_dir = PathBuf::from(value_after("-o"));
        let ext = if args.iter().any(|a| a == "--flac") {
            "flac"
        } else {
            "mp3"
        };
        let audio = PathBuf::from(args.last().cloned().unwrap_or_default());
        let stem = audio
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let current = self.current_video.lock().clone().unwrap_or_default();
        if !self.script.no_separation_output.contains(&current) {
            let target = out_dir.join(model).join(stem);
            fs::create_dir_all(&target)?;
            fs::write(target.join(format!("vocals.{ext}")), b"vocals")?;
        }
        Ok(ToolOutput::success(Vec::new()))
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, command: &ToolCommand) -> ToolResult<ToolOutput> {
        self.calls.lock().push(command.clone());
        let tool = command.tool;

        if self.script.missing_tools.contains(&tool) {
            return Err(ToolError::Spawn {
                tool,
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        let args = command.args_lossy();
        if args.len() == 1 && (args[0] == "-version" || args[0] == "-h") {
            return Ok(ToolOutput::success(format!("{tool} version fake\n")));
        }

        let result = match tool {
            Tool::Ffprobe => Ok(self.probe(command)),
            Tool::Ffmpeg => self.ffmpeg(command),
            Tool::Demucs => self.demucs(command),
        };
        result.map_err(|source| ToolError::Spawn { tool, source })
    }
}

/// ffprobe `-show_streams -print_format json` output for `streams`.
pub fn probe_json(streams: &[AudioStream]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = streams
        .iter()
        .map(|s| {
            let mut tags = serde_json::Map::new();
            if let Some(language) = &s.tags.language {
                tags.insert("language".into(), json!(language));
            }
            if let Some(title) = &s.tags.title {
                tags.insert("title".into(), json!(title));
            }
            json!({
                "index": s.stream_index,
                "codec_name": s.codec_name,
                "codec_type": s.codec_type,
                "start_pts": s.start_pts.unwrap_or(0),
                "start_time": format!("{:.6}", s.start_time.unwrap_or(0.0)),
                "tags": tags,
            })
        })
        .collect();
    json!({ "streams": entries })
}

/// Context for a throwaway `clip.mp4` wired to `pipeline`'s cancel flag.
///
/// The returned directory holds the video, the scratch space and the
/// output; keep it alive for the duration of the test.
pub fn test_context(pipeline: &Pipeline) -> (Context, TempDir) {
    let root = tempfile::tempdir().unwrap();
    let video = root.path().join("clip.mp4");
    fs::write(&video, b"video").unwrap();
    let work_dir = root.path().join("scratch");
    fs::create_dir_all(&work_dir).unwrap();

    let tools = Toolchain::default();
    let remover = create_music_remover(&SeparationSettings::default(), &tools);
    let ctx = Context {
        job: VideoJob::single(video, &root.path().join("out")),
        work_dir,
        tools,
        runner: Arc::new(FakeRunner::new()),
        remover: Arc::from(remover),
        events: Arc::new(EventDispatcher::new()),
        cancel: pipeline.cancel_handle(),
    };
    (ctx, root)
}

fn last_arg_name(command: &ToolCommand) -> String {
    command
        .args
        .last()
        .map(|a| name_of(Path::new(a)))
        .unwrap_or_default()
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
