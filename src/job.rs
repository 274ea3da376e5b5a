//! Job execution: generate a configured sequence and write it out

use crate::config::{Generator, JobConfig};
use anyhow::{Context, Result};
use seqgen_core::output::writer;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What a finished job produced
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    /// Sequence family (`lfsr`, `gold`, `zadoff_chu`)
    pub kind: &'static str,
    /// Number of elements written
    pub length: usize,
    /// Count of 1 bits, for binary sequences
    pub ones: Option<usize>,
    /// Cycle flag after the last frame, for binary sequences
    pub has_cycled: Option<bool>,
    /// Mean sample magnitude, for complex sequences
    pub mean_magnitude: Option<f64>,
    pub output: PathBuf,
}

/// Build the generator, produce the sequence and write it to `config.output`
pub fn run(config: &JobConfig) -> Result<JobReport> {
    let kind = config.sequence.kind();
    let mut generator = config
        .sequence
        .build()
        .with_context(|| format!("Invalid {} parameters", kind))?;

    let report = match &mut generator {
        Generator::ZadoffChu(zc) => {
            if config.frames != 1 {
                warn!(frames = config.frames, "Zadoff-Chu jobs produce a single sequence");
            }
            let samples = zc.generate();
            let mean_magnitude = if samples.is_empty() {
                0.0
            } else {
                samples.iter().map(|x| x.norm()).sum::<f64>() / samples.len() as f64
            };
            writer::save_complex(&config.output, &samples)?;

            JobReport {
                kind,
                length: samples.len(),
                ones: None,
                has_cycled: None,
                mean_magnitude: Some(mean_magnitude),
                output: config.output.clone(),
            }
        }
        generator => {
            let source = generator
                .frame_source()
                .context("Binary generator without a frame source")?;
            let bits: Vec<u8> = (0..config.frames).flat_map(|_| source.step()).collect();
            debug!(frames = config.frames, bits = bits.len(), "Frames generated");
            writer::save_bits(&config.output, &bits, config.mapping)?;

            JobReport {
                kind,
                length: bits.len(),
                ones: Some(bits.iter().filter(|&&b| b == 1).count()),
                has_cycled: Some(source.has_cycled()),
                mean_magnitude: None,
                output: config.output.clone(),
            }
        }
    };

    info!(
        kind = report.kind,
        length = report.length,
        ones = ?report.ones,
        has_cycled = ?report.has_cycled,
        mean_magnitude = ?report.mean_magnitude,
        output = %report.output.display(),
        "Job complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{preset, SequenceParams};
    use seqgen_core::TapConvention;

    #[test]
    fn test_run_lfsr_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = JobConfig::new(
            SequenceParams::Lfsr {
                polynomial: vec![4, 1, 0],
                initial: vec![0, 0, 0, 1],
                output_taps: vec![],
                samples_per_frame: None,
                convention: TapConvention::Matlab,
            },
            dir.path().join("mls.txt"),
        );
        config.frames = 2;

        let report = run(&config).unwrap();
        assert_eq!(report.length, 30);
        assert_eq!(report.ones, Some(16));
        assert_eq!(report.has_cycled, Some(true));

        let contents = std::fs::read_to_string(dir.path().join("mls.txt")).unwrap();
        assert_eq!(contents.lines().count(), 30);
        assert_eq!(contents.lines().next(), Some("1,1"));
    }

    #[test]
    fn test_run_zadoff_chu() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = preset("zc-1353").unwrap();
        config.output = dir.path().join("chu.txt");

        let report = run(&config).unwrap();
        assert_eq!(report.length, 1353);
        assert!((report.mean_magnitude.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(report.ones, None);
    }

    #[test]
    fn test_run_rejects_invalid_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let config = JobConfig::new(
            SequenceParams::ZadoffChu { n_zc: 12, u: 6, q: 0 },
            dir.path().join("chu.txt"),
        );
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid zadoff_chu parameters"));
        assert!(!dir.path().join("chu.txt").exists());
    }
}
