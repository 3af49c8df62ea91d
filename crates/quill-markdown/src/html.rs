//! HTML renderer for the page-rasterization export path.

use std::fmt::Write;

use crate::block::Block;
use crate::inline::inline_html;
use crate::render::BlockRenderer;

/// Renders blocks to an HTML fragment for page rasterization.
///
/// Fidelity notes, both load-bearing for output compatibility:
/// - Consecutive list items share one enclosing `<ul>` whether they are
///   ordered or unordered; the ordered/unordered distinction is lost in
///   this path.
/// - Consecutive table rows share one `<table>`, the header row inside
///   `<thead>`, data rows inside `<tbody>`.
///
/// Every opened tag is closed, including at end of input.
pub struct HtmlRenderer;

impl BlockRenderer for HtmlRenderer {
    type Output = String;

    fn render(&self, blocks: &[Block]) -> String {
        let mut writer = HtmlWriter::new();
        for block in blocks {
            writer.block(block);
        }
        writer.finish()
    }
}

/// Table sections opened in the output so far.
enum TableState {
    Closed,
    Open { body_open: bool },
}

struct HtmlWriter {
    out: String,
    list_open: bool,
    table: TableState,
}

impl HtmlWriter {
    fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
            list_open: false,
            table: TableState::Closed,
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Blank => {
                self.close_list();
                self.close_table();
            }
            Block::Heading { level, text } => {
                self.close_list();
                self.close_table();
                write!(self.out, "<h{level}>{}</h{level}>", inline_html(text)).unwrap();
            }
            Block::ListItem { text, .. } => {
                self.close_table();
                if !self.list_open {
                    self.out.push_str("<ul>");
                    self.list_open = true;
                }
                write!(self.out, "<li>{}</li>", inline_html(text)).unwrap();
            }
            Block::TableRow { header, cells } => {
                self.close_list();
                if matches!(self.table, TableState::Closed) {
                    self.out.push_str("<table>");
                    self.table = TableState::Open { body_open: false };
                }
                if *header {
                    self.out.push_str("<thead><tr>");
                    self.cells("th", cells);
                    self.out.push_str("</tr></thead>");
                } else {
                    if let TableState::Open { body_open } = &mut self.table
                        && !*body_open
                    {
                        self.out.push_str("<tbody>");
                        *body_open = true;
                    }
                    self.out.push_str("<tr>");
                    self.cells("td", cells);
                    self.out.push_str("</tr>");
                }
            }
            Block::Paragraph { text } => {
                self.close_list();
                self.close_table();
                write!(self.out, "<p>{}</p>", inline_html(text)).unwrap();
            }
        }
    }

    fn cells(&mut self, tag: &str, cells: &[String]) {
        for cell in cells {
            write!(self.out, "<{tag}>{}</{tag}>", inline_html(cell)).unwrap();
        }
    }

    fn close_list(&mut self) {
        if self.list_open {
            self.out.push_str("</ul>");
            self.list_open = false;
        }
    }

    fn close_table(&mut self) {
        if let TableState::Open { body_open } =
            std::mem::replace(&mut self.table, TableState::Closed)
        {
            if body_open {
                self.out.push_str("</tbody>");
            }
            self.out.push_str("</table>");
        }
    }

    fn finish(mut self) -> String {
        self.close_list();
        self.close_table();
        self.out
    }
}
