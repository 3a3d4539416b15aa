/*!
 * Common test utilities for the subvocab test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use subvocab::nlp::TokenizedDocument;

/// Two blocks, the second repeating words from the first
pub const TWO_BLOCK_SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\nHello world\n\n2\n00:00:03,000 --> 00:00:04,000\nHello again world";

/// Multi-line blocks with markup and CRLF line endings
pub const FORMATTED_SRT: &str = "1\r\n00:00:01,000 --> 00:00:03,000\r\n<i>Testing</i> words,\r\n<b>right</b> here!\r\n\r\n2\r\n00:00:04,000 --> 00:00:06,000\r\n<font color=\"red\"></font>\r\n\r\n3\r\n00:00:07,000 --> 00:00:09,000\r\nDon't stop testing.\r\n";

/// A short scene used by the end-to-end tests
pub const SCENE_SRT: &str = r#"1
00:00:01,000 --> 00:00:04,000
The old lighthouse keeper was waiting.

2
00:00:05,000 --> 00:00:09,000
<i>He watched the stormy harbour.</i>

3
00:00:10,000 --> 00:00:14,000
The old lighthouse stood against
the extraordinary storm.

4
00:00:15,000 --> 00:00:18,000
Nobody remembered the harbour so quiet.
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Owned strings from literals
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Document with only tokens and sentences
pub fn document_with_tokens(tokens: &[&str], sentences: &[&str]) -> TokenizedDocument {
    TokenizedDocument::new(strings(tokens), strings(sentences), Vec::new(), Vec::new())
}

/// Document with phrases and verbs for collocation tests
pub fn document_with_phrases(sentences: &[&str], noun_phrases: &[&str], verbs: &[&str]) -> TokenizedDocument {
    TokenizedDocument::new(Vec::new(), strings(sentences), strings(noun_phrases), strings(verbs))
}
