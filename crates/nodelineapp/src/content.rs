//! # Document Content
//!
//! Turns file bytes into outline content and back. A [`ContentManager`] owns the
//! document's [`NodelineApi`] and picks a [`Loader`] from the file type name the
//! caller supplies (an extension, a MIME type or a uniform type identifier).
//!
//! Only plain-text outlines are readable today. Names of formats we recognize but
//! cannot read yet fail with [`NodelineError::UnsupportedFormat`]; names we do not
//! recognize at all fail with [`NodelineError::UnknownFormat`].

use crate::api::{Destination, NodelineApi};
use crate::error::{NodelineError, Result};
use crate::model::{Item, ItemId};
use crate::outline::{self, RenderOptions, TextNode};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
}

const PLAIN_TEXT_NAMES: &[&str] = &["txt", "text", "plain", "public.plain-text", "text/plain"];

const UNSUPPORTED_NAMES: &[&str] = &[
    "md",
    "markdown",
    "text/markdown",
    "net.daringfireball.markdown",
    "opml",
    "text/x-opml",
    "json",
    "public.json",
    "application/json",
];

impl FileType {
    pub fn from_type_name(name: &str) -> Result<FileType> {
        let normalized = name.trim().to_ascii_lowercase();
        if PLAIN_TEXT_NAMES.contains(&normalized.as_str()) {
            Ok(FileType::PlainText)
        } else if UNSUPPORTED_NAMES.contains(&normalized.as_str()) {
            Err(NodelineError::UnsupportedFormat(name.to_string()))
        } else {
            Err(NodelineError::UnknownFormat(name.to_string()))
        }
    }

    pub fn loader(&self, options: RenderOptions) -> Box<dyn Loader> {
        match self {
            FileType::PlainText => Box::new(TextLoader::new(options)),
        }
    }
}

/// Type name for `path`: its extension, or `default_type` when it has none.
pub fn type_name_for(path: &Path, default_type: &str) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or(default_type)
        .to_string()
}

/// Reads and writes one file format.
pub trait Loader {
    /// Adds the decoded content to `api`.
    fn load(&self, data: &[u8], api: &mut NodelineApi) -> Result<()>;

    /// Encodes the whole content of `api`.
    fn data(&self, api: &NodelineApi) -> Result<Vec<u8>>;
}

/// Tab-indented plain-text outlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLoader {
    options: RenderOptions,
}

impl TextLoader {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Loader for TextLoader {
    fn load(&self, data: &[u8], api: &mut NodelineApi) -> Result<()> {
        let text = std::str::from_utf8(data)
            .map_err(|e| NodelineError::UnknownFormat(format!("text is not valid UTF-8: {e}")))?;

        // One add per node, parents before children, in line order.
        let mut pending: Vec<(Option<ItemId>, TextNode)> = outline::parse(text)
            .into_iter()
            .rev()
            .map(|node| (None, node))
            .collect();
        while let Some((parent, node)) = pending.pop() {
            let item = Item::new(node.line.value).done(node.line.done);
            let id = item.id;
            api.add_items(vec![item], Destination::new(parent, None))?;
            pending.extend(node.children.into_iter().rev().map(|child| (Some(id), child)));
        }
        Ok(())
    }

    fn data(&self, api: &NodelineApi) -> Result<Vec<u8>> {
        Ok(outline::render(api.hierarchy(), self.options).into_bytes())
    }
}

/// Owns a document's content and moves it to and from bytes.
#[derive(Debug, Default)]
pub struct ContentManager {
    api: NodelineApi,
    options: RenderOptions,
}

impl ContentManager {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            api: NodelineApi::new(),
            options,
        }
    }

    pub fn api(&self) -> &NodelineApi {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut NodelineApi {
        &mut self.api
    }

    /// Replaces the current content with `data`.
    ///
    /// The new content is loaded into a fresh store, so a failed read leaves the
    /// current document untouched.
    pub fn read(&mut self, data: &[u8], type_name: &str) -> Result<()> {
        let loader = FileType::from_type_name(type_name)?.loader(self.options);
        let mut fresh = NodelineApi::new();
        loader.load(data, &mut fresh)?;

        self.api = fresh;
        debug!(items = self.api.total_count(), type_name, "read content");
        Ok(())
    }

    pub fn data(&self, type_name: &str) -> Result<Vec<u8>> {
        let loader = FileType::from_type_name(type_name)?.loader(self.options);
        loader.data(&self.api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outline_of(manager: &ContentManager) -> Vec<(usize, bool, String)> {
        manager
            .api()
            .hierarchy()
            .iter_with_level()
            .map(|(level, item)| (level, item.done, item.text.clone()))
            .collect()
    }

    #[test]
    fn test_file_type_names() {
        for name in ["txt", "TXT", "text", "plain", "public.plain-text", "text/plain"] {
            assert_eq!(FileType::from_type_name(name).unwrap(), FileType::PlainText, "{name}");
        }
        for name in ["md", "opml", "public.json"] {
            assert!(matches!(
                FileType::from_type_name(name),
                Err(NodelineError::UnsupportedFormat(_))
            ));
        }
        for name in ["", "docx", "com.example.unknown"] {
            assert!(matches!(
                FileType::from_type_name(name),
                Err(NodelineError::UnknownFormat(_))
            ));
        }
    }

    #[test]
    fn test_type_name_for_path() {
        assert_eq!(type_name_for(Path::new("todo.txt"), "txt"), "txt");
        assert_eq!(type_name_for(Path::new("notes.md"), "txt"), "md");
        assert_eq!(type_name_for(Path::new("TODO"), "public.plain-text"), "public.plain-text");
        assert_eq!(type_name_for(Path::new("TODO"), "md"), "md");
    }

    #[test]
    fn test_read_builds_outline() {
        let mut manager = ContentManager::default();
        manager
            .read(b"Groceries\n\tMilk @done\n\tEggs\nChores", "txt")
            .unwrap();

        assert_eq!(
            outline_of(&manager),
            vec![
                (0, false, "Groceries".to_string()),
                (1, true, "Milk".to_string()),
                (1, false, "Eggs".to_string()),
                (0, false, "Chores".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_replaces_previous_content() {
        let mut manager = ContentManager::default();
        manager.read(b"old\n\tchild", "txt").unwrap();
        manager.read(b"new", "txt").unwrap();
        assert_eq!(outline_of(&manager), vec![(0, false, "new".to_string())]);
        assert_eq!(manager.api().total_count(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_unknown_format() {
        let mut manager = ContentManager::default();
        manager.read(b"keep", "txt").unwrap();

        let err = manager.read(&[0x66, 0xff, 0xfe], "txt").unwrap_err();

        assert!(matches!(err, NodelineError::UnknownFormat(_)));
        assert_eq!(outline_of(&manager), vec![(0, false, "keep".to_string())]);
    }

    #[test]
    fn test_unsupported_type_leaves_content() {
        let mut manager = ContentManager::default();
        manager.read(b"keep", "txt").unwrap();
        assert!(matches!(
            manager.read(b"# heading", "md"),
            Err(NodelineError::UnsupportedFormat(_))
        ));
        assert_eq!(manager.api().total_count(), 1);
    }

    #[test]
    fn test_data_normalizes_indentation() {
        let mut manager = ContentManager::default();
        manager.read(b"a\n        b\n  c @done\nd", "txt").unwrap();
        let data = manager.data("public.plain-text").unwrap();
        assert_eq!(String::from_utf8(data).unwrap(), "a\n\tb\n\tc @done\nd");
    }

    #[test]
    fn test_data_without_done_marker() {
        let mut manager = ContentManager::new(RenderOptions { done_marker: false });
        manager.read(b"a @done", "txt").unwrap();
        assert_eq!(manager.data("txt").unwrap(), b"a".to_vec());
    }
}
