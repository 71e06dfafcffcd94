//! Corpus enumeration and paragraph reading
//!
//! A corpus is a flat directory of UTF-8 `*.txt` files. Each line is
//! stripped of `<...>` markup and trimmed; runs of non-empty lines form a
//! paragraph, joined by single spaces. Blank lines and end of file close the
//! current paragraph.

use crate::error::{EngineError, Result};
use glob::Pattern;
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// File name pattern of corpus files
pub const CORPUS_PATTERN: &str = "*.txt";

static TAG: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG.get_or_init(|| Regex::new(r"<.*?>").expect("tag pattern is valid"))
}

/// Remove `<...>` markup (shortest match) and surrounding whitespace
pub fn clean_line(line: &str) -> String {
    tag_pattern().replace_all(line, "").trim().to_string()
}

/// Sorted list of the `*.txt` files in a corpus directory
#[derive(Debug, Clone)]
pub struct CorpusReader {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl CorpusReader {
    /// Enumerate the corpus files under `dir`
    ///
    /// Fails with [`EngineError::CorpusUnavailable`] if `dir` is missing,
    /// unreadable or not a directory. A directory without text files is a
    /// valid, empty corpus.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref();
        let metadata = fs::metadata(root).map_err(|e| EngineError::corpus(root, e))?;
        if !metadata.is_dir() {
            return Err(EngineError::corpus(
                root,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        // Surface permission problems here rather than as an empty glob
        fs::read_dir(root).map_err(|e| EngineError::corpus(root, e))?;

        let pattern = format!(
            "{}/{}",
            Pattern::escape(&root.to_string_lossy()),
            CORPUS_PATTERN
        );
        let entries = glob::glob(&pattern).map_err(|e| {
            EngineError::corpus(root, io::Error::new(io::ErrorKind::InvalidInput, e.msg))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                EngineError::corpus(path, e.into_error())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        files.dedup();

        log::debug!("Found {} corpus files in {}", files.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    /// Corpus directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Corpus files in lexicographic order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of corpus files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if the directory held no text files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paragraph iterator over one file
    pub fn paragraphs(&self, file: &Path) -> Result<ParagraphReader<BufReader<File>>> {
        let handle = File::open(file).map_err(|e| EngineError::corpus(file, e))?;
        Ok(ParagraphReader::new(BufReader::new(handle)))
    }
}

/// Yields the paragraphs of a line-oriented text source
///
/// Invalid UTF-8 surfaces as an [`io::ErrorKind::InvalidData`] error, after
/// which the iterator is finished.
#[derive(Debug)]
pub struct ParagraphReader<R> {
    reader: R,
    line: String,
    pending: Vec<String>,
    done: bool,
}

impl<R: BufRead> ParagraphReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pending: Vec::new(),
            done: false,
        }
    }

    fn flush(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let paragraph = self.pending.join(" ");
        self.pending.clear();
        Some(paragraph)
    }
}

impl<R: BufRead> Iterator for ParagraphReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.done = true;
                    return self.flush().map(Ok);
                }
                Ok(_) => {
                    let cleaned = clean_line(&self.line);
                    if cleaned.is_empty() {
                        if let Some(paragraph) = self.flush() {
                            return Some(Ok(paragraph));
                        }
                    } else {
                        self.pending.push(cleaned);
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn paragraphs(text: &str) -> Vec<String> {
        ParagraphReader::new(Cursor::new(text))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("  <p>Hello</p> world  \n"), "Hello world");
        assert_eq!(clean_line("a < b and c > d"), "a  d");
        assert_eq!(clean_line("<doc id=\"1\">"), "");
        assert_eq!(clean_line("no tags"), "no tags");
    }

    #[test]
    fn test_paragraph_joining() {
        let text = "First line.\nsecond line.\n\nNext para.\n";
        assert_eq!(
            paragraphs(text),
            vec!["First line. second line.", "Next para."]
        );
    }

    #[test]
    fn test_markup_only_lines_break_paragraphs() {
        let text = "One.\n<doc>\nTwo.\n   \nThree.";
        assert_eq!(paragraphs(text), vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn test_empty_source() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs("\n\n  \n").is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(paragraphs("a.\r\nb.\r\n\r\nc."), vec!["a. b.", "c."]);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = b"fine line\n\xff\xfe broken\n";
        let mut reader = ParagraphReader::new(Cursor::new(bytes));
        let first = reader.next().unwrap();
        assert_eq!(first.unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_open_lists_txt_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "B.").unwrap();
        fs::write(dir.path().join("a.txt"), "A.").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let corpus = CorpusReader::open(dir.path()).unwrap();
        let names: Vec<_> = corpus
            .files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_open_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = CorpusReader::open(&missing).unwrap_err();
        match err {
            EngineError::CorpusUnavailable { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_open_file_instead_of_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            CorpusReader::open(&file),
            Err(EngineError::CorpusUnavailable { .. })
        ));
    }

    #[test]
    fn test_empty_directory_is_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let corpus = CorpusReader::open(dir.path()).unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.root(), dir.path());
    }

    #[test]
    fn test_directory_with_glob_characters() {
        let dir = TempDir::new().unwrap();
        let odd = dir.path().join("corpus [en]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("a.txt"), "A.").unwrap();

        let corpus = CorpusReader::open(&odd).unwrap();
        assert_eq!(corpus.len(), 1);
    }
}
