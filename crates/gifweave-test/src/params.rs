//! RegParams - bookkeeping for one regression test
//!
//! Every check bumps a running index, so output files and failure messages
//! can be traced back to the call that produced them. Failures are collected
//! instead of panicking; `cleanup` prints them and reports the verdict.

use crate::decode::decode_gif;
use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use gifweave_core::Image;
use std::fs;
use std::path::{Path, PathBuf};

/// How file checks treat golden files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegTestMode {
    /// Overwrite golden files with the current output
    Generate,
    #[default]
    Compare,
    /// Write output files but never compare them
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`, falling back to `Compare`.
    pub fn from_env() -> Self {
        std::env::var("REGTEST_MODE")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("generate") {
            Self::Generate
        } else if value.eq_ignore_ascii_case("display") {
            Self::Display
        } else {
            Self::Compare
        }
    }
}

/// State of one named regression test.
pub struct RegParams {
    pub test_name: String,
    pub mode: RegTestMode,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test, taking the mode from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        Self::with_mode(test_name, RegTestMode::from_env())
    }

    /// Start a regression test in an explicit mode.
    pub fn with_mode(test_name: &str, mode: RegTestMode) -> Self {
        for dir in [golden_dir(), regout_dir()] {
            if let Err(e) = fs::create_dir_all(&dir) {
                eprintln!("cannot create {}: {e}", dir.display());
            }
        }
        eprintln!("=== {test_name}_reg ({mode:?}) ===");
        Self {
            test_name: test_name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Index of the most recent check.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn next_check(&mut self) -> usize {
        self.index += 1;
        self.index
    }

    fn record(&mut self, check: &str, detail: String) {
        let msg = format!("{}_reg #{} ({check}): {detail}", self.test_name, self.index);
        eprintln!("{msg}");
        self.failures.push(msg);
    }

    /// Check that `actual` lies within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.next_check();
        let diff = (expected - actual).abs();
        let ok = diff <= delta;
        if !ok {
            self.record(
                "value",
                format!("expected {expected}, got {actual} (off by {diff}, allowed {delta})"),
            );
        }
        ok
    }

    /// Check two byte strings for equality.
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.next_check();
        if expected == actual {
            return true;
        }
        let at = expected
            .iter()
            .zip(actual)
            .position(|(a, b)| a != b)
            .unwrap_or(expected.len().min(actual.len()));
        self.record(
            "bytes",
            format!(
                "lengths {} and {}, first difference at byte {at}",
                expected.len(),
                actual.len()
            ),
        );
        false
    }

    /// Check two images for identical dimensions and pixels.
    pub fn compare_images(&mut self, expected: &Image, actual: &Image) -> bool {
        self.next_check();
        let (w, h) = (expected.width(), expected.height());
        if (w, h) != (actual.width(), actual.height()) {
            self.record(
                "image",
                format!("{w}x{h} vs {}x{}", actual.width(), actual.height()),
            );
            return false;
        }
        match expected
            .pixels()
            .iter()
            .zip(actual.pixels())
            .position(|(a, b)| a != b)
        {
            Some(i) => {
                self.record("image", format!("pixels differ at ({}, {})", i % w, i / w));
                false
            }
            None => true,
        }
    }

    /// Write `data` to the output directory and check it against the
    /// golden file for this check index.
    ///
    /// In compare mode a missing golden file counts as a failure. GIF output
    /// that differs in bytes still passes when both files decode to the same
    /// frames.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        let index = self.next_check();
        let name = format!("{}.{index:02}.{ext}", self.test_name);
        let out = regout_dir().join(&name);
        fs::write(&out, data).map_err(|e| TestError::Write {
            path: out.display().to_string(),
            message: e.to_string(),
        })?;

        let golden = golden_dir().join(format!("{}_golden.{index:02}.{ext}", self.test_name));
        match self.mode {
            RegTestMode::Generate => {
                fs::copy(&out, &golden)?;
                eprintln!("wrote golden {}", golden.display());
            }
            RegTestMode::Compare => self.check_golden(data, &golden)?,
            RegTestMode::Display => {}
        }
        Ok(())
    }

    fn check_golden(&mut self, data: &[u8], golden: &Path) -> TestResult<()> {
        if !golden.exists() {
            self.record(
                "file",
                format!("missing golden {}, run with REGTEST_MODE=generate", golden.display()),
            );
            return Ok(());
        }
        let expected = fs::read(golden)?;
        if expected != data && !same_gif_frames(&expected, data) {
            self.record("file", format!("output differs from {}", golden.display()));
        }
        Ok(())
    }

    /// Print the verdict and any failures. Returns `true` if every check
    /// passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("{}_reg: ok, {} checks", self.test_name, self.index);
            return true;
        }
        eprintln!(
            "{}_reg: {} of {} checks failed",
            self.test_name,
            self.failures.len(),
            self.index
        );
        for failure in &self.failures {
            eprintln!("    {failure}");
        }
        false
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Path an output file with this extension gets at the current index.
    pub fn output_path(&self, ext: &str) -> PathBuf {
        regout_dir().join(format!("{}.{:02}.{ext}", self.test_name, self.index))
    }
}

/// Whether two GIF files decode to the same frames.
fn same_gif_frames(a: &[u8], b: &[u8]) -> bool {
    matches!((decode_gif(a), decode_gif(b)), (Ok(x), Ok(y)) if x == y)
}
