use once_cell::sync::Lazy;
use regex::Regex;

use crate::args::Numbering;

/// Chapter heading alternatives, tried leftmost-first.
static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"第[零一二三四五六七八九十百千万\d]+章",
        r"|第\d+章",
        r"|CHAPTER\s+\d+",
        r"|Chapter\s+\d+",
        r"|\d+、",
        r"|【.*?】",
        r"|第.*?节",
        r"|第.*?回",
    ))
    .expect("heading pattern is valid")
});

/// A heading and the raw text that follows it up to the next heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split<'a> {
    /// No heading anywhere in the text.
    Whole(&'a str),
    Chaptered {
        preamble: &'a str,
        sections: Vec<Section<'a>>,
    },
}

impl<'a> Split<'a> {
    pub fn heading_count(&self) -> usize {
        match self {
            Split::Whole(_) => 0,
            Split::Chaptered { sections, .. } => sections.len(),
        }
    }

    /// Trimmed text before the first heading, if any remains.
    pub fn preamble(&self) -> Option<&'a str> {
        match self {
            Split::Chaptered { preamble, .. } => Some(preamble.trim()).filter(|p| !p.is_empty()),
            Split::Whole(_) => None,
        }
    }
}

/// A chapter ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter<'a> {
    pub number: usize,
    pub title: &'a str,
    /// Trimmed, never empty.
    pub body: &'a str,
}

pub fn split(text: &str) -> Split<'_> {
    let headings: Vec<_> = HEADING.find_iter(text).collect();
    let Some(first) = headings.first() else {
        return Split::Whole(text);
    };

    let sections = headings
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = headings.get(i + 1).map_or(text.len(), |next| next.start());
            Section {
                title: m.as_str(),
                body: &text[m.end()..end],
            }
        })
        .collect();

    Split::Chaptered {
        preamble: &text[..first.start()],
        sections,
    }
}

/// Drop sections whose body is only whitespace and number the rest.
pub fn number_chapters<'a>(sections: &[Section<'a>], numbering: Numbering) -> Vec<Chapter<'a>> {
    let mut chapters = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        let body = section.body.trim();
        if body.is_empty() {
            tracing::debug!(title = section.title, "skipping heading with empty body");
            continue;
        }
        let number = match numbering {
            Numbering::Sequential => chapters.len() + 1,
            Numbering::Occurrence => i + 1,
        };
        chapters.push(Chapter {
            number,
            title: section.title,
            body,
        });
    }
    chapters
}
