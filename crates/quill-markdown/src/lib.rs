//! Markdown conversion core for Quill exports.
//!
//! Converts the constrained markdown subset coming back from the
//! generation backend (headings, bold/italic/code, bullet and numbered
//! lists, pipe tables) into the two export targets:
//!
//! - an HTML fragment for page rasterization ([`HtmlRenderer`])
//! - a structured paragraph tree for word-processor packaging
//!   ([`DocRenderer`])
//!
//! # Architecture
//!
//! [`assemble`] runs one line-by-line pass that groups lines into
//! [`Block`]s. Both renderers implement [`BlockRenderer`] over the same
//! block sequence and apply their own inline-formatting policy; the two
//! policies differ on purpose and the differences are documented on each
//! renderer. Conversion is total: malformed markdown degrades to
//! paragraph text, never an error, and every call builds its state from
//! scratch.
//!
//! # Example
//!
//! ```
//! use quill_markdown::{BlockRenderer, HtmlRenderer, assemble};
//!
//! let blocks = assemble("# Hello\n\nSome **bold** text.");
//! let html = HtmlRenderer.render(&blocks);
//! assert!(html.contains("<strong>bold</strong>"));
//! ```

mod assembler;
mod block;
mod doc;
mod html;
mod inline;
mod render;

pub use assembler::assemble;
pub use block::{Block, InlineRun};
pub use doc::{DocParagraph, DocRenderer, ParagraphKind};
pub use html::HtmlRenderer;
pub use inline::{escape_html, inline_html, parse_runs, strip_markdown};
pub use render::BlockRenderer;
