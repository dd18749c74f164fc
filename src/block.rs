/// Inline text fragment within a paragraph or bullet item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Strong(String),
}

impl Span {
    /// The fragment's content with emphasis markers already stripped.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Strong(text) => text,
        }
    }
}

/// Block-level units parsed from a response, one per rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Level 2 or 3. Text is kept literally, no inline parsing.
    Heading { level: u8, text: String },
    Paragraph { spans: Vec<Span> },
    BulletItem { spans: Vec<Span> },
    /// `label` is the leading token such as `"1."`. Text is kept literally.
    NumberedItem { label: String, text: String },
    /// Rows may be shorter or longer than the header.
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}
