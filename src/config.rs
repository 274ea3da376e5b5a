//! Generation job configuration
//!
//! A job is a JSON document naming one sequence family with its parameters,
//! how many frames to produce and where to write them.

use anyhow::{Context, Result};
use seqgen_core::{
    BitMapping, FrameSource, GoldBuilder, GoldSequence, Lfsr, SequenceError, TapConvention,
    ZadoffChu,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_output() -> PathBuf {
    PathBuf::from("sequence.txt")
}

fn default_frames() -> usize {
    1
}

/// Parameters of one sequence family, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequenceParams {
    Lfsr {
        polynomial: Vec<usize>,
        initial: Vec<u8>,
        #[serde(default)]
        output_taps: Vec<usize>,
        #[serde(default)]
        samples_per_frame: Option<usize>,
        #[serde(default)]
        convention: TapConvention,
    },
    Gold {
        first_polynomial: Vec<usize>,
        first_initial: Vec<u8>,
        second_polynomial: Vec<usize>,
        second_initial: Vec<u8>,
        #[serde(default)]
        samples_per_frame: Option<usize>,
        #[serde(default)]
        cyclic_shift: i64,
        #[serde(default)]
        convention: TapConvention,
        #[serde(default)]
        debug: bool,
    },
    ZadoffChu {
        n_zc: usize,
        u: i64,
        #[serde(default)]
        q: i64,
    },
}

/// A constructed generator of any family
#[derive(Debug, Clone)]
pub enum Generator {
    Lfsr(Lfsr),
    Gold(GoldSequence),
    ZadoffChu(ZadoffChu),
}

impl SequenceParams {
    /// Validate the parameters and construct the generator
    pub fn build(&self) -> std::result::Result<Generator, SequenceError> {
        match self {
            Self::Lfsr {
                polynomial,
                initial,
                output_taps,
                samples_per_frame,
                convention,
            } => Lfsr::builder(polynomial, initial)
                .output_taps(output_taps)
                .maybe_samples_per_frame(*samples_per_frame)
                .convention(*convention)
                .build()
                .map(Generator::Lfsr),
            Self::Gold {
                first_polynomial,
                first_initial,
                second_polynomial,
                second_initial,
                samples_per_frame,
                cyclic_shift,
                convention,
                debug,
            } => GoldBuilder::new(
                first_polynomial,
                first_initial,
                second_polynomial,
                second_initial,
            )
            .maybe_samples_per_frame(*samples_per_frame)
            .cyclic_shift(*cyclic_shift)
            .convention(*convention)
            .debug(*debug)
            .build()
            .map(Generator::Gold),
            Self::ZadoffChu { n_zc, u, q } => {
                ZadoffChu::with_shift(*n_zc, *u, *q).map(Generator::ZadoffChu)
            }
        }
    }

    /// Short family name used in logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lfsr { .. } => "lfsr",
            Self::Gold { .. } => "gold",
            Self::ZadoffChu { .. } => "zadoff_chu",
        }
    }
}

impl Generator {
    /// The frame source behind a binary generator
    pub fn frame_source(&mut self) -> Option<&mut dyn FrameSource> {
        match self {
            Self::Lfsr(lfsr) => Some(lfsr as &mut dyn FrameSource),
            Self::Gold(gold) => Some(gold as &mut dyn FrameSource),
            Self::ZadoffChu(_) => None,
        }
    }
}

/// One generation job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub sequence: SequenceParams,
    /// Destination text file
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Bit rendering for LFSR and Gold output
    #[serde(default)]
    pub mapping: BitMapping,
    /// Frames to stream back to back (ignored for Zadoff-Chu)
    #[serde(default = "default_frames")]
    pub frames: usize,
}

impl JobConfig {
    pub fn new(sequence: SequenceParams, output: impl Into<PathBuf>) -> Self {
        Self {
            sequence,
            output: output.into(),
            mapping: BitMapping::default(),
            frames: default_frames(),
        }
    }

    /// Load a job from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), kind = config.sequence.kind(), "Loaded job config");
        Ok(config)
    }

    /// Save the job as pretty JSON, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Job config saved");
        Ok(())
    }
}

fn gold_preset(
    first_polynomial: &[usize],
    second_polynomial: &[usize],
    output: &str,
) -> JobConfig {
    let length = first_polynomial.first().copied().unwrap_or_default();
    let mut initial = vec![0; length];
    if let Some(last) = initial.last_mut() {
        *last = 1;
    }

    JobConfig::new(
        SequenceParams::Gold {
            first_polynomial: first_polynomial.to_vec(),
            first_initial: initial.clone(),
            second_polynomial: second_polynomial.to_vec(),
            second_initial: initial,
            samples_per_frame: None,
            cyclic_shift: 0,
            convention: TapConvention::Matlab,
            debug: false,
        },
        output,
    )
}

/// Built-in jobs, by name
pub fn presets() -> Vec<(&'static str, JobConfig)> {
    vec![
        (
            "gold-8",
            gold_preset(&[8, 6, 5, 3, 0], &[8, 6, 5, 2, 0], "goldseq.txt"),
        ),
        (
            "gold-12",
            gold_preset(&[12, 10, 5, 4, 0], &[12, 8, 6, 5, 0], "goldseq.txt"),
        ),
        (
            "zc-1353",
            JobConfig::new(
                SequenceParams::ZadoffChu {
                    n_zc: 1353,
                    u: 7,
                    q: 1,
                },
                "chu.txt",
            ),
        ),
    ]
}

/// Look up a built-in job by name
pub fn preset(name: &str) -> Option<JobConfig> {
    presets()
        .into_iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, config)| config)
}
