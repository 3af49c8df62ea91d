//! Block and inline-run model for parsed markdown.
//!
//! Blocks carry raw inline text; each renderer applies its own inline
//! policy when it consumes the sequence. Blocks are immutable once
//! produced and ordered exactly as the input lines were.

/// One structural unit of parsed markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level 1-4 and the raw remainder of the line.
    Heading {
        /// Heading level (1-4).
        level: u8,
        /// Raw heading text, inline markers untouched.
        text: String,
    },
    /// Single list item. Consecutive items form one list in the output.
    ListItem {
        /// True for `1.`-style items, false for `*`/`-` bullets.
        ordered: bool,
        /// Raw item text with the list marker stripped.
        text: String,
    },
    /// Single table row. The header row is always the first row of its
    /// group; separator rows never reach the block sequence.
    TableRow {
        /// True for the header row of a table group.
        header: bool,
        /// Trimmed cell contents, inline markers untouched.
        cells: Vec<String>,
    },
    /// Plain paragraph line.
    Paragraph {
        /// Raw paragraph text.
        text: String,
    },
    /// Blank input line. Renderers emit nothing for it; it only marks a
    /// block boundary (two lists separated by a blank stay two lists).
    Blank,
}

/// A contiguous span of text sharing one formatting style.
///
/// Runs produced for the document tree are mutually exclusive: at most one
/// of `bold`, `italic`, `code` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InlineRun {
    /// Run text with markers removed.
    pub text: String,
    /// Bold styling.
    pub bold: bool,
    /// Italic styling.
    pub italic: bool,
    /// Inline code styling.
    pub code: bool,
}

impl InlineRun {
    /// Unstyled run.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            code: false,
        }
    }

    /// Bold run.
    #[must_use]
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    /// Italic run.
    #[must_use]
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }

    /// Inline-code run.
    #[must_use]
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            code: true,
            ..Self::plain(text)
        }
    }
}
