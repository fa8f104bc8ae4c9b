use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How chapter files are numbered when some headings carry no body.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Numbering {
    /// Number emitted chapters 1..N without gaps
    #[default]
    Sequential,
    /// Number by heading position; skipped headings leave gaps
    Occurrence,
}

#[derive(Parser, Debug)]
#[command(name = "novelsplit", about = "Split plain-text novels into per-chapter files")]
pub struct Options {
    /// Directory scanned for *.txt files
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Where chapter directories are created (relative to --dir)
    #[arg(long, default_value = "novel")]
    pub output: PathBuf,

    /// Where processed source files are moved (relative to --dir)
    #[arg(long, default_value = "novel_already")]
    pub archive: PathBuf,

    /// Chapter numbering scheme
    #[arg(long, value_enum, default_value_t = Numbering::Sequential)]
    pub numbering: Numbering,

    /// Log filter, overrides RUST_LOG (e.g. "debug")
    #[arg(long)]
    pub log_level: Option<String>,

    /// Decode and split only; write and move nothing
    #[arg(long)]
    pub dry_run: bool,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: PathBuf,
    pub output_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub numbering: Numbering,
    pub dry_run: bool,
}

impl Config {
    /// Defaults matching a bare invocation inside `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            output_dir: work_dir.join("novel"),
            archive_dir: work_dir.join("novel_already"),
            work_dir,
            numbering: Numbering::default(),
            dry_run: false,
        }
    }
}

impl Options {
    pub fn resolve(&self) -> Config {
        Config {
            work_dir: self.dir.clone(),
            // `join` keeps absolute paths as-is.
            output_dir: self.dir.join(&self.output),
            archive_dir: self.dir.join(&self.archive),
            numbering: self.numbering,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_bare_invocation() {
        let opts = Options::parse_from(["novelsplit"]);
        let config = opts.resolve();
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert_eq!(config.output_dir, PathBuf::from("./novel"));
        assert_eq!(config.archive_dir, PathBuf::from("./novel_already"));
        assert_eq!(config.numbering, Numbering::Sequential);
        assert!(!config.dry_run);
    }

    #[test]
    fn relative_dirs_follow_work_dir_and_absolute_dirs_win() {
        let opts = Options::parse_from([
            "novelsplit",
            "--dir",
            "books",
            "--output",
            "out",
            "--archive",
            "/tmp/done",
            "--numbering",
            "occurrence",
        ]);
        let config = opts.resolve();
        assert_eq!(config.output_dir, PathBuf::from("books/out"));
        assert_eq!(config.archive_dir, PathBuf::from("/tmp/done"));
        assert_eq!(config.numbering, Numbering::Occurrence);
    }
}
