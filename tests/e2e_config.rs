//! E2E tests for job configuration and execution
//!
//! Runs complete jobs from JSON and checks the written files.

use seqgen::config::{preset, JobConfig, SequenceParams};
use seqgen::job;
use seqgen::BitMapping;

/// Test a Gold job from JSON through to the text file
#[test]
fn test_gold_job_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("gold.json");
    let output = dir.path().join("goldseq.txt");

    let json = format!(
        r#"{{
            "sequence": {{
                "kind": "gold",
                "first_polynomial": [5, 2, 0],
                "first_initial": [0, 0, 0, 0, 1],
                "second_polynomial": [5, 4, 3, 2, 0],
                "second_initial": [0, 0, 0, 0, 1],
                "convention": "matlab",
                "cyclic_shift": 3
            }},
            "output": {:?},
            "mapping": {{"scaled": 2047}}
        }}"#,
        output
    );
    std::fs::write(&config_path, json).unwrap();

    let config = JobConfig::load(&config_path).unwrap();
    assert_eq!(config.mapping, BitMapping::Scaled(2047));

    let report = job::run(&config).unwrap();
    assert_eq!(report.kind, "gold");
    assert_eq!(report.length, 31);

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 31);
    // shift 3 member starts 1, 0, 1
    assert_eq!(&lines[..3], &["2047,2047", "-2047,-2047", "2047,2047"]);
}

/// Test the 8-stage Gold preset output
#[test]
fn test_gold_8_preset() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = preset("gold-8").unwrap();
    config.output = dir.path().join("goldseq.txt");

    let report = job::run(&config).unwrap();
    assert_eq!(report.length, 255);
    assert_eq!(report.ones, Some(120));
    assert_eq!(report.has_cycled, Some(true));
}

/// Test the 12-stage Gold preset output
#[test]
fn test_gold_12_preset() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = preset("gold-12").unwrap();
    config.output = dir.path().join("goldseq.txt");

    let report = job::run(&config).unwrap();
    assert_eq!(report.length, 4095);
    assert_eq!(report.ones, Some(1920));
}

/// Test a Zadoff-Chu job writes real,imag lines
#[test]
fn test_zadoff_chu_job() {
    let dir = tempfile::tempdir().unwrap();
    let config = JobConfig::new(
        SequenceParams::ZadoffChu {
            n_zc: 63,
            u: 25,
            q: 0,
        },
        dir.path().join("chu.txt"),
    );

    job::run(&config).unwrap();
    let contents = std::fs::read_to_string(dir.path().join("chu.txt")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 63);
    assert!(lines[0].starts_with("1,"));

    for line in lines {
        let (re, im) = line.split_once(',').unwrap();
        let re: f64 = re.parse().unwrap();
        let im: f64 = im.parse().unwrap();
        assert!(((re * re + im * im).sqrt() - 1.0).abs() < 1e-9);
    }
}

/// Test an unwritable destination is reported, not swallowed
#[test]
fn test_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = preset("gold-8").unwrap();
    config.output = dir.path().join("no-such-dir").join("goldseq.txt");

    assert!(job::run(&config).is_err());
}
