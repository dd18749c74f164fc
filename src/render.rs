//! Presentation nodes: the shape every output target draws from.

use crate::block::{Block, Span};

/// A run of text, optionally emphasized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub strong: bool,
}

/// Leading marker of a list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Bullet,
    Label(String),
}

/// Table cells laid out as a header row and body rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Widest row, header included. Short rows leave trailing cells empty.
    pub fn columns(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

/// One presentation node per parsed block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading { level: u8, text: String },
    Paragraph { runs: Vec<Run> },
    ListItem { marker: Marker, runs: Vec<Run> },
    Table(Grid),
}

/// Map blocks to presentation nodes, in order.
pub fn render_blocks(blocks: &[Block]) -> Vec<Node> {
    blocks.iter().map(render_block).collect()
}

fn render_block(block: &Block) -> Node {
    match block {
        Block::Heading { level, text } => Node::Heading {
            level: *level,
            text: text.clone(),
        },
        Block::Paragraph { spans } => Node::Paragraph {
            runs: spans_to_runs(spans),
        },
        Block::BulletItem { spans } => Node::ListItem {
            marker: Marker::Bullet,
            runs: spans_to_runs(spans),
        },
        Block::NumberedItem { label, text } => Node::ListItem {
            marker: Marker::Label(label.clone()),
            runs: if text.is_empty() {
                Vec::new()
            } else {
                vec![Run {
                    text: text.clone(),
                    strong: false,
                }]
            },
        },
        Block::Table { header, rows } => Node::Table(Grid {
            header: header.clone(),
            rows: rows.clone(),
        }),
    }
}

fn spans_to_runs(spans: &[Span]) -> Vec<Run> {
    spans
        .iter()
        .map(|span| Run {
            text: span.text().to_string(),
            strong: matches!(span, Span::Strong(_)),
        })
        .collect()
}
