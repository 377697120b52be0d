use crate::query::{Fragment, Segment};

/// A lower-cased word found outside quoted strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Followed by `(`, i.e. a function call.
    pub is_call: bool,
    /// Number of open brackets around the word; 0 is the top level of the stage.
    pub depth: usize,
}

/// An analytic stage, e.g. `select count(1) as c group by host`.
///
/// Only the word shape is kept; this is not a SQL parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticStage {
    raw: String,
    words: Vec<Word>,
}

impl AnalyticStage {
    pub fn from_segment(segment: Segment) -> Self {
        let words = scan_words(&segment);
        Self {
            raw: segment.raw().trim().to_string(),
            words,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn leading_keyword(&self) -> Option<&str> {
        self.words.first().map(|w| w.text.as_str())
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.text == word)
    }

    pub fn contains_top_level_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.depth == 0 && w.text == word)
    }

    /// Whether `phrase` occurs as consecutive words, e.g. `["group", "by"]`.
    pub fn contains_phrase(&self, phrase: &[&str]) -> bool {
        self.find_phrase(phrase, |_| true)
    }

    /// Like [`contains_phrase`](Self::contains_phrase), ignoring bracketed subqueries.
    pub fn contains_top_level_phrase(&self, phrase: &[&str]) -> bool {
        self.find_phrase(phrase, |w| w.depth == 0)
    }

    fn find_phrase<F>(&self, phrase: &[&str], keep: F) -> bool
    where
        F: Fn(&Word) -> bool,
    {
        if phrase.is_empty() {
            return false;
        }
        self.words.windows(phrase.len()).any(|window| {
            window
                .iter()
                .zip(phrase)
                .all(|(w, p)| keep(w) && w.text == *p)
        })
    }

    /// Words after the first top-level `start` keyword, up to the first
    /// terminator at the same depth.
    pub fn clause(&self, start: &str, terminators: &[&str]) -> &[Word] {
        let Some(begin) = self
            .words
            .iter()
            .position(|w| w.depth == 0 && w.text == start)
        else {
            return &[];
        };
        let rest = &self.words[begin + 1..];
        let end = rest
            .iter()
            .position(|w| w.depth == 0 && terminators.contains(&w.text.as_str()))
            .unwrap_or(rest.len());
        &rest[..end]
    }
}

fn scan_words(segment: &Segment) -> Vec<Word> {
    // Quoted strings act as separators.
    let masked: Vec<char> = segment
        .fragments
        .iter()
        .flat_map(|f| match f {
            Fragment::Text(t) => t.chars().collect::<Vec<_>>(),
            Fragment::Quoted(_) => vec![' '],
        })
        .collect();

    let mut words = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;
    while i < masked.len() {
        if !is_word_char(masked[i]) {
            match masked[i] {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
            i += 1;
            continue;
        }

        let start = i;
        while i < masked.len() && is_word_char(masked[i]) {
            i += 1;
        }
        let text = masked[start..i].iter().collect::<String>().to_lowercase();

        let next = masked[i..].iter().find(|c| !c.is_whitespace());
        words.push(Word {
            text,
            is_call: next == Some(&'('),
            depth,
        });
    }

    words
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
