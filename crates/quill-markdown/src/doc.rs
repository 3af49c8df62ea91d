//! Document-tree renderer for the word-processor export path.
//!
//! The output is a flat paragraph sequence handed to an external packager;
//! it is not a file format of its own. Tables are flattened into bolded
//! pseudo-rows rather than a native table structure — a known limitation
//! kept for output compatibility.

use crate::block::{Block, InlineRun};
use crate::inline::{parse_runs, strip_markdown};
use crate::render::BlockRenderer;

/// Title used when the caller supplies a blank topic.
const UNTITLED: &str = "Untitled document";

/// One paragraph of the exported document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocParagraph {
    /// Paragraph role in the document.
    pub kind: ParagraphKind,
    /// Styled text runs. Empty for spacing paragraphs.
    pub runs: Vec<InlineRun>,
}

/// Paragraph role understood by the document packager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParagraphKind {
    /// Heading paragraph with level 1-4.
    Heading(u8),
    /// Bullet list paragraph (single level, no nesting).
    Bullet,
    /// Numbered list paragraph (single level, no nesting).
    Numbered,
    /// Body text paragraph.
    Body,
}

impl DocParagraph {
    fn heading(level: u8, text: &str) -> Self {
        Self {
            kind: ParagraphKind::Heading(level),
            runs: vec![InlineRun::plain(text)],
        }
    }

    fn body(runs: Vec<InlineRun>) -> Self {
        Self {
            kind: ParagraphKind::Body,
            runs,
        }
    }

    /// Empty paragraph emitted after each flattened table group.
    fn spacer() -> Self {
        Self::body(Vec::new())
    }
}

/// Renders blocks to the paragraph tree consumed by the document packager.
///
/// Always prepends a level-1 title paragraph from the caller-supplied
/// topic. List items keep their ordered/unordered role per paragraph; no
/// enclosing list structure exists in this format.
pub struct DocRenderer {
    title: String,
}

impl DocRenderer {
    /// Create a renderer producing a document titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn title_paragraph(&self) -> DocParagraph {
        // The topic is used verbatim; the placeholder only covers blank input.
        if self.title.trim().is_empty() {
            DocParagraph::heading(1, UNTITLED)
        } else {
            DocParagraph::heading(1, &self.title)
        }
    }
}

impl BlockRenderer for DocRenderer {
    type Output = Vec<DocParagraph>;

    fn render(&self, blocks: &[Block]) -> Vec<DocParagraph> {
        let mut paragraphs = Vec::with_capacity(blocks.len() + 1);
        paragraphs.push(self.title_paragraph());

        let mut in_table = false;
        for block in blocks {
            let is_table_row = matches!(block, Block::TableRow { .. });
            if in_table && !is_table_row {
                paragraphs.push(DocParagraph::spacer());
            }
            in_table = is_table_row;

            match block {
                Block::Blank => {}
                Block::Heading { level, text } => {
                    paragraphs.push(DocParagraph::heading(*level, text));
                }
                Block::ListItem { ordered, text } => {
                    paragraphs.push(DocParagraph {
                        kind: if *ordered {
                            ParagraphKind::Numbered
                        } else {
                            ParagraphKind::Bullet
                        },
                        runs: vec![InlineRun::plain(text)],
                    });
                }
                Block::TableRow { header, cells } => {
                    let joined = cells
                        .iter()
                        .map(|cell| strip_markdown(cell))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    let run = if *header {
                        InlineRun::bold(joined)
                    } else {
                        InlineRun::plain(joined)
                    };
                    paragraphs.push(DocParagraph::body(vec![run]));
                }
                Block::Paragraph { text } => {
                    paragraphs.push(DocParagraph::body(parse_runs(text)));
                }
            }
        }
        if in_table {
            paragraphs.push(DocParagraph::spacer());
        }
        paragraphs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::assembler::assemble;

    fn render(markdown: &str, title: &str) -> Vec<DocParagraph> {
        DocRenderer::new(title).render(&assemble(markdown))
    }

    #[test]
    fn test_title_paragraph_prepended() {
        let paragraphs = render("text", "My Topic");
        assert_eq!(paragraphs[0], DocParagraph::heading(1, "My Topic"));
    }

    #[test]
    fn test_blank_title_uses_placeholder() {
        let paragraphs = render("text", "   ");
        assert_eq!(paragraphs[0], DocParagraph::heading(1, "Untitled document"));
    }

    #[test]
    fn test_heading_levels_preserved() {
        let paragraphs = render("#### Deep", "T");
        assert_eq!(paragraphs[1].kind, ParagraphKind::Heading(4));
        assert_eq!(paragraphs[1].runs, vec![InlineRun::plain("Deep")]);
    }

    #[test]
    fn test_list_kinds_tagged_per_paragraph() {
        let paragraphs = render("- a\n1. b", "T");
        assert_eq!(paragraphs[1].kind, ParagraphKind::Bullet);
        assert_eq!(paragraphs[2].kind, ParagraphKind::Numbered);
    }

    #[test]
    fn test_paragraph_runs_split_bold_first() {
        let paragraphs = render("Some *italic* and **bold** text.", "T");
        assert_eq!(
            paragraphs[1].runs,
            vec![
                InlineRun::plain("Some *italic* and "),
                InlineRun::bold("bold"),
                InlineRun::plain(" text."),
            ]
        );
    }

    #[test]
    fn test_table_flattened_to_bolded_rows() {
        let paragraphs = render("| **H1** | H2 |\n|---|---|\n| a | b |", "T");
        assert_eq!(
            paragraphs[1],
            DocParagraph::body(vec![InlineRun::bold("H1 | H2")])
        );
        assert_eq!(
            paragraphs[2],
            DocParagraph::body(vec![InlineRun::plain("a | b")])
        );
        // Spacing paragraph closes the table group.
        assert_eq!(paragraphs[3], DocParagraph::spacer());
    }

    #[test]
    fn test_spacer_between_table_and_following_text() {
        let paragraphs = render("| H |\n| a |\nafter", "T");
        let kinds: Vec<_> = paragraphs.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParagraphKind::Heading(1),
                ParagraphKind::Body,
                ParagraphKind::Body,
                ParagraphKind::Body, // spacer
                ParagraphKind::Body, // "after"
            ]
        );
        assert!(paragraphs[3].runs.is_empty());
    }

    #[test]
    fn test_blank_blocks_emit_nothing() {
        let paragraphs = render("a\n\n\nb", "T");
        assert_eq!(paragraphs.len(), 3);
    }

    #[test]
    fn test_separator_only_table_absent() {
        let paragraphs = render("| H |\n|---|", "T");
        assert_eq!(paragraphs.len(), 1);
    }
}
