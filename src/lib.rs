mod block;
mod client;
mod config;
mod error;
mod inline;
mod line;
mod parser;
mod prompt;
mod render;
mod subject;
mod table;
mod terminal;
mod typst;

pub use block::{Block, Span};
pub use client::{BASE_URL_ENV, Client, ClientConfig, DEFAULT_BASE_URL, extract_text};
pub use config::{ApiConfig, Config, PdfConfig, TerminalConfig};
pub use error::AskError;
pub use inline::parse_spans;
pub use line::{LineKind, classify};
pub use prompt::{FollowUp, compose};
pub use render::{Grid, Marker, Node, Run};
pub use subject::Subject;
pub use table::TableAccumulator;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse response text into a vector of blocks.
pub fn parse(text: &str) -> Vec<Block> {
    parser::parse(text)
}

/// Parse response text and map it to presentation nodes.
///
/// Never fails: any text, including an empty one, gives a node list.
pub fn render(text: &str) -> Vec<Node> {
    render::render_blocks(&parse(text))
}

/// Convert response text to Typst markup.
pub fn answer_to_typst(text: &str, config: &PdfConfig, title: Option<&str>) -> String {
    nodes_to_typst(&render(text), config, title)
}

/// Convert already rendered nodes to Typst markup.
pub fn nodes_to_typst(nodes: &[Node], config: &PdfConfig, title: Option<&str>) -> String {
    typst::nodes_to_typst(nodes, config, title)
}

/// Convert response text to terminal output.
pub fn answer_to_terminal(text: &str, config: &TerminalConfig) -> String {
    nodes_to_terminal(&render(text), config)
}

/// Convert already rendered nodes to terminal output.
pub fn nodes_to_terminal(nodes: &[Node], config: &TerminalConfig) -> String {
    terminal::nodes_to_terminal(nodes, config)
}

/// Convert response text to PDF bytes.
pub fn answer_to_pdf(
    text: &str,
    config: &PdfConfig,
    title: Option<&str>,
) -> Result<Vec<u8>, String> {
    nodes_to_pdf(&render(text), config, title)
}

/// Convert already rendered nodes to PDF bytes.
pub fn nodes_to_pdf(
    nodes: &[Node],
    config: &PdfConfig,
    title: Option<&str>,
) -> Result<Vec<u8>, String> {
    use typst_library::layout::PagedDocument;

    let typst_content = nodes_to_typst(nodes, config, title);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| format!("Typst compilation failed: {:?}", e))?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| format!("PDF generation failed: {:?}", e))
}
