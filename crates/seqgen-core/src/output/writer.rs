//! Text serialisation of generated sequences
//!
//! Each element becomes one `"<real>,<imag>\n"` line. Bit sequences carry
//! the same mapped value in both fields, which is the I/Q text format the
//! FMCOMMS-style transmit buffers load.

use anyhow::{Context, Result};
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// How bits are rendered as numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitMapping {
    /// 0 and 1
    Unipolar,
    /// -1 and +1
    #[default]
    Bipolar,
    /// -amplitude and +amplitude as 16-bit DAC codes
    Scaled(i16),
}

impl BitMapping {
    pub fn apply(self, bit: u8) -> i32 {
        let high = bit != 0;
        match self {
            Self::Unipolar => i32::from(high),
            Self::Bipolar => {
                if high {
                    1
                } else {
                    -1
                }
            }
            Self::Scaled(amplitude) => {
                let amplitude = i32::from(amplitude);
                if high {
                    amplitude
                } else {
                    -amplitude
                }
            }
        }
    }
}

/// Write bits, one mapped value per line in both fields
pub fn write_bits<W: Write>(writer: &mut W, bits: &[u8], mapping: BitMapping) -> std::io::Result<()> {
    for &bit in bits {
        let value = mapping.apply(bit);
        writeln!(writer, "{},{}", value, value)?;
    }
    Ok(())
}

/// Write complex samples as `real,imag` lines
pub fn write_complex<W: Write>(writer: &mut W, samples: &[Complex<f64>]) -> std::io::Result<()> {
    for sample in samples {
        writeln!(writer, "{},{}", sample.re, sample.im)?;
    }
    Ok(())
}

fn save_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let result = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)
                .and_then(|_| writer.flush())
                .with_context(|| format!("Failed to write {}", path.display()))
        });

    match &result {
        Ok(()) => tracing::info!(path = %path.display(), "Sequence written"),
        Err(e) => tracing::error!(path = %path.display(), error = %e, "Failed to save sequence"),
    }
    result
}

/// Create (or truncate) `path` and write the bits to it
pub fn save_bits(path: &Path, bits: &[u8], mapping: BitMapping) -> Result<()> {
    save_with(path, |w| write_bits(w, bits, mapping))
}

/// Create (or truncate) `path` and write the complex samples to it
pub fn save_complex(path: &Path, samples: &[Complex<f64>]) -> Result<()> {
    save_with(path, |w| write_complex(w, samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_mappings() {
        assert_eq!(BitMapping::Unipolar.apply(0), 0);
        assert_eq!(BitMapping::Unipolar.apply(1), 1);
        assert_eq!(BitMapping::Bipolar.apply(0), -1);
        assert_eq!(BitMapping::Bipolar.apply(1), 1);
        assert_eq!(BitMapping::Scaled(2047).apply(0), -2047);
        assert_eq!(BitMapping::Scaled(2047).apply(1), 2047);
        assert_eq!(BitMapping::Scaled(i16::MIN).apply(0), 32768);
    }

    #[test]
    fn test_write_bits() {
        let mut buffer = Vec::new();
        write_bits(&mut buffer, &[1, 0, 1], BitMapping::Bipolar).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1,1\n-1,-1\n1,1\n");
    }

    #[test]
    fn test_write_complex() {
        let mut buffer = Vec::new();
        write_complex(
            &mut buffer,
            &[Complex::new(1.0, 0.0), Complex::new(-0.5, 0.25)],
        )
        .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1,0\n-0.5,0.25\n");
    }

    #[test]
    fn test_save_bits_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goldseq.txt");

        save_bits(&path, &[0, 1], BitMapping::Scaled(100)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "-100,-100\n100,100\n");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chu.txt");

        let err = save_complex(&path, &[Complex::new(1.0, 0.0)]).unwrap_err();
        assert!(err.to_string().contains("Failed to create"));
    }

    #[test]
    fn test_mapping_serde() {
        let json = serde_json::to_string(&BitMapping::Scaled(2047)).unwrap();
        assert_eq!(json, r#"{"scaled":2047}"#);
        let parsed: BitMapping = serde_json::from_str("\"unipolar\"").unwrap();
        assert_eq!(parsed, BitMapping::Unipolar);
    }
}
