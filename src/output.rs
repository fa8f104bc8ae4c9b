use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use crate::chapter::Chapter;

pub const PREAMBLE_FILE: &str = "前言.txt";
pub const WHOLE_FILE: &str = "全文.txt";

const FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Byte budget for the title part of a chapter file name; most file systems
/// cap a name at 255 bytes.
pub const MAX_TITLE_BYTES: usize = 200;

/// What a novel directory should end up holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout<'a> {
    Whole(&'a str),
    Chapters {
        preamble: Option<&'a str>,
        chapters: Vec<Chapter<'a>>,
    },
}

#[derive(Debug, Default)]
pub struct WriteReport {
    pub files: Vec<PathBuf>,
}

/// Strip characters that are not allowed in file names on common platforms
/// and cut the result to `MAX_TITLE_BYTES` on a char boundary.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();
    let end = cleaned
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= MAX_TITLE_BYTES)
        .last()
        .unwrap_or(0);
    cleaned[..end].trim_end().to_string()
}

pub fn chapter_file_name(number: usize, title: &str) -> String {
    format!("{:03}_{}.txt", number, sanitize_title(title))
}

/// File names and contents for `layout`, in write order.
pub fn render(layout: &Layout<'_>) -> Vec<(String, String)> {
    match layout {
        Layout::Whole(text) => vec![(WHOLE_FILE.to_string(), text.to_string())],
        Layout::Chapters { preamble, chapters } => {
            let mut files = Vec::with_capacity(chapters.len() + 1);
            if let Some(preamble) = preamble {
                files.push((PREAMBLE_FILE.to_string(), preamble.to_string()));
            }
            for chapter in chapters {
                files.push((
                    chapter_file_name(chapter.number, chapter.title),
                    format!("{}\n\n{}", chapter.title, chapter.body),
                ));
            }
            files
        }
    }
}

/// Write every file of `layout` into `dir` as UTF-8, creating `dir` first.
pub fn write_layout(dir: &Path, layout: &Layout<'_>) -> Result<WriteReport> {
    fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;

    let mut report = WriteReport::default();
    for (name, contents) in render(layout) {
        let path = dir.join(name);
        fs::write(&path, contents).wrap_err_with(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote");
        report.files.push(path);
    }
    Ok(report)
}
