use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};

use crate::archive::archive;
use crate::args::Config;
use crate::chapter::{self, Split};
use crate::encoding;
use crate::output::{self, Layout};

/// Result of handling one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Output written (or, in a dry run, planned) and source archived.
    Processed { files: usize },
    /// Nothing usable in the file; left in place.
    Skipped,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Output files written, or planned in a dry run.
    pub files: usize,
}

#[derive(Debug)]
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process every `*.txt` in the working directory. A failing file is
    /// logged and counted; the rest of the batch still runs.
    pub fn run(&self) -> Result<BatchSummary> {
        let sources = self.discover()?;
        let mut summary = BatchSummary::default();
        if sources.is_empty() {
            tracing::info!(dir = %self.config.work_dir.display(), "no .txt files found");
            return Ok(summary);
        }

        if !self.config.dry_run {
            for dir in [&self.config.output_dir, &self.config.archive_dir] {
                fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
            }
        }

        for source in &sources {
            match self.process(source) {
                Ok(Outcome::Processed { files }) => {
                    summary.processed += 1;
                    summary.files += files;
                }
                Ok(Outcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    tracing::error!(file = %source.display(), "{e:#}");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            processed = summary.processed,
            skipped = summary.skipped,
            failed = summary.failed,
            files = summary.files,
            "batch finished"
        );
        Ok(summary)
    }

    /// Regular `*.txt` files directly inside the working directory, by name.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.work_dir;
        let entries = fs::read_dir(dir).wrap_err_with(|| format!("listing {}", dir.display()))?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.wrap_err_with(|| format!("listing {}", dir.display()))?;
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::warn!(path = %path.display(), "skipping non UTF-8 file name");
                continue;
            };
            if name.ends_with(".txt") && path.is_file() {
                sources.push(path);
            }
        }
        sources.sort();
        Ok(sources)
    }

    pub fn process(&self, source: &Path) -> Result<Outcome> {
        let novel_name = source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| eyre!("{} has no usable name", source.display()))?;
        tracing::info!(file = %source.display(), "processing");

        let bytes = fs::read(source).wrap_err_with(|| format!("reading {}", source.display()))?;
        let decoded = encoding::decode(&bytes);
        if decoded.text.is_empty() {
            tracing::warn!(file = %source.display(), "no text could be decoded, skipping");
            return Ok(Outcome::Skipped);
        }
        if decoded.lossy {
            tracing::warn!(
                file = %source.display(),
                encoding = decoded.encoding.name(),
                "undecodable bytes replaced"
            );
        } else {
            tracing::debug!(encoding = decoded.encoding.name(), "decoded");
        }

        let split = chapter::split(&decoded.text);
        let layout = match &split {
            Split::Whole(text) => {
                tracing::info!("no chapter headings found, keeping the whole text");
                Layout::Whole(*text)
            }
            Split::Chaptered { sections, .. } => {
                tracing::info!(headings = split.heading_count(), "split into chapters");
                Layout::Chapters {
                    preamble: split.preamble(),
                    chapters: chapter::number_chapters(sections, self.config.numbering),
                }
            }
        };

        let novel_dir = self.config.output_dir.join(novel_name);
        if self.config.dry_run {
            let planned = output::render(&layout);
            for (name, _) in &planned {
                tracing::info!(path = %novel_dir.join(name).display(), "would write");
            }
            return Ok(Outcome::Processed {
                files: planned.len(),
            });
        }

        let report = output::write_layout(&novel_dir, &layout)?;
        let target = archive(source, &self.config.archive_dir)?;
        tracing::info!(
            files = report.files.len(),
            to = %target.display(),
            "archived source"
        );
        Ok(Outcome::Processed {
            files: report.files.len(),
        })
    }
}
