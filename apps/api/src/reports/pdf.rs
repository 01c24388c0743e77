//! PDF rendering of an [`AnalysisResult`].
//!
//! The report is first laid out as a flat list of [`Block`]s, then drawn
//! top to bottom on A4 pages with the built-in Helvetica fonts. Built-in
//! fonts only cover Windows-1252, so markers are plain ASCII.

use match_engine::{AnalysisResult, Category, KeywordMatch};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb,
};
use uuid::Uuid;

const TITLE: &str = "ATS Resume Match Analysis Report";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;

/// Characters per wrapped body line at the body font size.
const WRAP_WIDTH: usize = 90;

const CATEGORY_COLUMNS: &[f32] = &[MARGIN, 150.0];
const KEYWORD_COLUMNS: &[f32] = &[MARGIN, 70.0, 100.0, 130.0];

const DISCLAIMER: &str = "This analysis is based on keyword matching and heuristic scoring. \
It should be used as a tool to assist in hiring decisions, not as the sole criterion.";

/// One vertical slice of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Score { text: String, score: f64 },
    Heading(String),
    /// Table row; `header` rows are drawn bold.
    Row {
        cells: Vec<String>,
        columns: &'static [f32],
        header: bool,
    },
    Text(String),
    Footer(String),
    Space,
}

impl Block {
    fn font_size(&self) -> f32 {
        match self {
            Block::Title(_) => 20.0,
            Block::Score { .. } => 16.0,
            Block::Heading(_) => 13.0,
            Block::Row { .. } | Block::Text(_) => 10.0,
            Block::Footer(_) => 8.0,
            Block::Space => 0.0,
        }
    }

    /// Vertical room the block takes, in millimetres.
    fn height(&self) -> f32 {
        match self {
            Block::Space => 4.0,
            Block::Heading(_) => 9.0,
            other => other.font_size() * 0.5,
        }
    }
}

/// Green, amber or red by score band.
fn score_color(score: f64) -> Color {
    let (r, g, b) = if score >= 75.0 {
        (0.16, 0.65, 0.27)
    } else if score >= 50.0 {
        (0.8, 0.6, 0.0)
    } else {
        (0.86, 0.21, 0.27)
    };
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None))
}

fn grey() -> Color {
    Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None))
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn push_text(blocks: &mut Vec<Block>, text: &str) {
    blocks.extend(wrap(text, WRAP_WIDTH).into_iter().map(Block::Text));
}

fn push_list(blocks: &mut Vec<Block>, heading: &str, marker: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    blocks.push(Block::Heading(heading.to_string()));
    for item in items {
        push_text(blocks, &format!("{marker} {item}"));
    }
    blocks.push(Block::Space);
}

fn keyword_row(kind: &str, keywords: &[KeywordMatch]) -> Block {
    let matched = keywords.iter().filter(|kw| kw.matched).count();
    let percent = if keywords.is_empty() {
        "N/A".to_string()
    } else {
        format!("{:.0}%", matched as f64 / keywords.len() as f64 * 100.0)
    };
    Block::Row {
        cells: vec![
            kind.to_string(),
            matched.to_string(),
            keywords.len().to_string(),
            percent,
        ],
        columns: KEYWORD_COLUMNS,
        header: false,
    }
}

fn header_row(cells: &[&str], columns: &'static [f32]) -> Block {
    Block::Row {
        cells: cells.iter().map(|c| c.to_string()).collect(),
        columns,
        header: true,
    }
}

/// Lays out the report in reading order.
pub fn report_blocks(result: &AnalysisResult, analysis_id: Uuid) -> Vec<Block> {
    let mut blocks = vec![Block::Title(TITLE.to_string()), Block::Space];

    blocks.push(Block::Score {
        text: format!("{:.1}/100", result.overall_score),
        score: result.overall_score,
    });
    blocks.push(Block::Score {
        text: result.label.as_str().replace('_', " "),
        score: result.overall_score,
    });
    blocks.push(Block::Space);

    // ──────────────────────────────────────────────────────────────────────
    // Categories
    // ──────────────────────────────────────────────────────────────────────

    blocks.push(Block::Heading("Category Breakdown".to_string()));
    blocks.push(header_row(&["Category", "Score"], CATEGORY_COLUMNS));
    for category in Category::ALL {
        if let Some(score) = result.category(category) {
            blocks.push(Block::Row {
                cells: vec![
                    category.display_name().to_string(),
                    format!("{:.1}", score.score),
                ],
                columns: CATEGORY_COLUMNS,
                header: false,
            });
        }
    }
    blocks.push(Block::Space);

    // ──────────────────────────────────────────────────────────────────────
    // Keywords and flags
    // ──────────────────────────────────────────────────────────────────────

    blocks.push(Block::Heading("Keyword Matching".to_string()));
    blocks.push(header_row(&["Type", "Matched", "Total", "Match %"], KEYWORD_COLUMNS));
    blocks.push(keyword_row("Must-Have", &result.must_have));
    blocks.push(keyword_row("Nice-to-Have", &result.nice_to_have));
    blocks.push(Block::Space);

    push_list(&mut blocks, "Red Flags", "!", &result.red_flags);

    // ──────────────────────────────────────────────────────────────────────
    // Recommendations
    // ──────────────────────────────────────────────────────────────────────

    let actions = &result.actions;
    push_list(&mut blocks, "Strengths", "+", &actions.good_fit_summary);
    push_list(&mut blocks, "Gaps to Address", "-", &actions.gaps);
    push_list(
        &mut blocks,
        "Tailoring Suggestions",
        "-",
        &actions.resume_tailoring_suggestions,
    );
    if !actions.ats_keywords_to_add.is_empty() {
        blocks.push(Block::Heading("Keywords to Consider Adding".to_string()));
        push_text(&mut blocks, &actions.ats_keywords_to_add.join(", "));
        blocks.push(Block::Space);
    }

    blocks.push(Block::Space);
    blocks.push(Block::Footer(format!("Analysis ID: {analysis_id}")));
    blocks.push(Block::Footer(format!(
        "Generated: {}",
        result.metadata.timestamp.to_rfc3339()
    )));
    blocks.push(Block::Footer(format!("Version: {}", result.metadata.version)));
    for line in wrap(&format!("Disclaimer: {DISCLAIMER}"), WRAP_WIDTH + 20) {
        blocks.push(Block::Footer(line));
    }

    blocks
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw(layer: &PdfLayerReference, block: &Block, y: f32, fonts: &Fonts) {
    let size = block.font_size();
    match block {
        Block::Title(text) | Block::Heading(text) => {
            layer.set_fill_color(black());
            layer.use_text(text.as_str(), size, Mm(MARGIN), Mm(y), &fonts.bold);
        }
        Block::Score { text, score } => {
            layer.set_fill_color(score_color(*score));
            layer.use_text(text.as_str(), size, Mm(MARGIN), Mm(y), &fonts.bold);
        }
        Block::Row {
            cells,
            columns,
            header,
        } => {
            let font = if *header { &fonts.bold } else { &fonts.regular };
            layer.set_fill_color(black());
            for (cell, x) in cells.iter().zip(columns.iter()) {
                layer.use_text(cell.as_str(), size, Mm(*x), Mm(y), font);
            }
        }
        Block::Text(text) => {
            layer.set_fill_color(black());
            layer.use_text(text.as_str(), size, Mm(MARGIN), Mm(y), &fonts.regular);
        }
        Block::Footer(text) => {
            layer.set_fill_color(grey());
            layer.use_text(text.as_str(), size, Mm(MARGIN), Mm(y), &fonts.regular);
        }
        Block::Space => {}
    }
}

/// Renders the report to PDF bytes, adding pages as the blocks run past the
/// bottom margin.
pub fn render_pdf(result: &AnalysisResult, analysis_id: Uuid) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, page, layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    for block in report_blocks(result, analysis_id) {
        let height = block.height();
        if y - height < MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
            current = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= height;
        draw(&current, &block, y, &fonts);
    }

    doc.save_to_bytes()
}
