use crate::block::Block;
use crate::inline::parse_spans;
use crate::line::{LineKind, classify};
use crate::table::TableAccumulator;

/// Parse response text into a list of blocks
pub fn parse(text: &str) -> Vec<Block> {
    let mut state = ParseState::default();

    for line in text.lines() {
        process_line(line, &mut state);
    }

    // A table that runs to the end of the text still needs emitting
    state.flush_table();

    tracing::trace!(blocks = state.blocks.len(), "parsed response");
    state.blocks
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    table: TableAccumulator,
}

impl ParseState {
    fn flush_table(&mut self) {
        if let Some(table) = self.table.flush() {
            self.blocks.push(table);
        }
    }
}

fn process_line(line: &str, state: &mut ParseState) {
    let kind = classify(line);

    if let LineKind::TableRow(raw) = kind {
        state.table.push_line(raw);
        return;
    }

    // Any other line, blank included, ends the table
    if state.table.is_collecting() {
        state.flush_table();
    }

    let block = match kind {
        LineKind::Heading { level, text } => Block::Heading {
            level,
            text: text.to_string(),
        },
        LineKind::Bullet(text) => Block::BulletItem {
            spans: parse_spans(text),
        },
        // Numbered items keep `**` literally, unlike bullets
        LineKind::Numbered { label, text } => Block::NumberedItem {
            label: label.to_string(),
            text: text.to_string(),
        },
        LineKind::Paragraph(text) => Block::Paragraph {
            spans: parse_spans(text),
        },
        LineKind::Blank | LineKind::TableRow(_) => return,
    };
    state.blocks.push(block);
}
