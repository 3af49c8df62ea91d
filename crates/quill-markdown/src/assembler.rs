//! Line classifier and block assembler.
//!
//! A single forward pass over the input lines groups them into [`Block`]s.
//! The scan context (open list or open table) is an explicit value passed
//! into and returned from every per-line step, never shared mutable state.
//! The pass is total: any line that matches nothing else is a paragraph.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::Block;

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-:]+$").unwrap());

/// Heading prefixes, longest first so `####` is not read as `###`.
const HEADING_PREFIXES: [(&str, u8); 4] = [("#### ", 4), ("### ", 3), ("## ", 2), ("# ", 1)];

/// Scan context carried from one line to the next.
enum Context {
    None,
    List,
    Table(TableContext),
}

/// Rows accumulated while inside a table. Flushed by a blank line, a
/// non-pipe line, or end of input; discarded entirely when no data row
/// was recorded.
#[derive(Default)]
struct TableContext {
    saw_header: bool,
    rows: Vec<PendingRow>,
}

struct PendingRow {
    header: bool,
    cells: Vec<String>,
}

impl TableContext {
    /// Record one pipe-prefixed line.
    ///
    /// A line whose cells all match `[-:]+` is a separator: it flips the
    /// header-seen flag and records nothing. Otherwise the row is recorded,
    /// and it is the header row when it is the first recorded row and no
    /// separator has been seen yet.
    fn push_line(&mut self, line: &str) {
        let cells: Vec<String> = line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        if cells.iter().all(|cell| SEPARATOR_RE.is_match(cell)) {
            self.saw_header = true;
            return;
        }

        let header = !self.saw_header && self.rows.is_empty();
        self.rows.push(PendingRow { header, cells });
    }

    /// Emit the accumulated rows, unless the table has no data rows.
    fn flush_into(self, blocks: &mut Vec<Block>) {
        if !self.rows.iter().any(|row| !row.header) {
            return;
        }
        for row in self.rows {
            blocks.push(Block::TableRow {
                header: row.header,
                cells: row.cells,
            });
        }
    }
}

/// Close the current context, flushing an open table.
///
/// A list context carries no pending rows, so closing it is purely a
/// boundary marker for the following line.
fn close(ctx: Context, blocks: &mut Vec<Block>) {
    if let Context::Table(table) = ctx {
        table.flush_into(blocks);
    }
}

/// Classify one trimmed line, emit its blocks, and return the next context.
fn step(line: &str, ctx: Context, blocks: &mut Vec<Block>) -> Context {
    if line.is_empty() {
        close(ctx, blocks);
        blocks.push(Block::Blank);
        return Context::None;
    }

    if line.starts_with('|') {
        // A pipe line inside a list replaces the list context; rows keep
        // accumulating until a non-pipe line or end of input.
        let mut table = match ctx {
            Context::Table(table) => table,
            Context::None | Context::List => TableContext::default(),
        };
        table.push_line(line);
        return Context::Table(table);
    }

    // Every other line ends an open table before being classified.
    close(ctx, blocks);

    for (prefix, level) in HEADING_PREFIXES {
        if let Some(text) = line.strip_prefix(prefix) {
            blocks.push(Block::Heading {
                level,
                text: text.to_owned(),
            });
            return Context::None;
        }
    }

    if let Some(text) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
        blocks.push(Block::ListItem {
            ordered: false,
            text: text.to_owned(),
        });
        return Context::List;
    }

    if let Some(marker) = NUMBERED_RE.find(line) {
        blocks.push(Block::ListItem {
            ordered: true,
            text: line[marker.end()..].to_owned(),
        });
        return Context::List;
    }

    blocks.push(Block::Paragraph {
        text: line.to_owned(),
    });
    Context::None
}

/// Assemble raw markdown into a block sequence.
///
/// Total over arbitrary input: malformed list or table syntax degrades to
/// paragraph text, never an error. Output order is exactly input line
/// order, and at most one block is produced per line.
#[must_use]
pub fn assemble(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut ctx = Context::None;
    for raw in markdown.lines() {
        ctx = step(raw.trim(), ctx, &mut blocks);
    }
    // A table still open at end of input flushes exactly as on a blank line.
    close(ctx, &mut blocks);
    blocks
}
