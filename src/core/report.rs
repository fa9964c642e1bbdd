// src/core/report.rs
//! PDF rendering of generated ideas for the "Download PDF" button

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

pub const PDF_FILENAME: &str = "business-ideas.pdf";
pub const REPORT_TITLE: &str = "Business Ideas Report";

// A4 in points, 1mm = 72/25.4pt
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN_X: f32 = 56.7; // 20mm
const TITLE_Y: f32 = PAGE_HEIGHT - 56.7; // 20mm
const DATE_Y: f32 = PAGE_HEIGHT - 85.0; // 30mm
const BODY_Y: f32 = PAGE_HEIGHT - 113.4; // 40mm
const BOTTOM_MARGIN: f32 = 56.7;

const TITLE_SIZE: i64 = 16;
const DATE_SIZE: i64 = 12;
const BODY_SIZE: i64 = 10;
const BODY_LEADING: f32 = 11.5;

/// Characters per body line: 170mm of 10pt Helvetica
pub const WRAP_COLUMNS: usize = 95;

/// Wrap `content` on word boundaries, keeping blank lines.
/// Words longer than `columns` are split.
pub fn wrap_lines(content: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in content.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(columns);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current.is_empty() {
                word.len()
            } else {
                current.chars().count() + 1 + word.len()
            };
            if needed > columns {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }

        lines.push(current);
    }

    lines
}

/// Split wrapped lines into pages. The first page starts below the
/// header, later pages at the top margin.
fn paginate(lines: Vec<String>) -> Vec<Vec<String>> {
    let lines_per_page = |top: f32| (((top - BOTTOM_MARGIN) / BODY_LEADING) as usize).max(1);

    let mut pages = Vec::new();
    let mut remaining = lines.into_iter().peekable();
    let mut capacity = lines_per_page(BODY_Y);

    loop {
        let page: Vec<String> = remaining.by_ref().take(capacity).collect();
        pages.push(page);
        if remaining.peek().is_none() {
            break;
        }
        capacity = lines_per_page(TITLE_Y);
    }

    pages
}

/// Helvetica with WinAnsiEncoding covers Latin-1; anything else becomes `?`.
fn encode_text(text: &str) -> Object {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect();
    Object::string_literal(bytes)
}

fn text_at(operations: &mut Vec<Operation>, size: i64, x: f32, y: f32, text: &str) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
    operations.push(Operation::new("Td", vec![x.into(), y.into()]));
    operations.push(Operation::new("Tj", vec![encode_text(text)]));
    operations.push(Operation::new("ET", vec![]));
}

fn page_operations(first: bool, generated_on: NaiveDate, lines: &[String]) -> Vec<Operation> {
    let mut operations = Vec::new();

    let mut y = if first {
        text_at(&mut operations, TITLE_SIZE, MARGIN_X, TITLE_Y, REPORT_TITLE);
        let date = format!("Generated on: {}", generated_on.format("%-m/%-d/%Y"));
        text_at(&mut operations, DATE_SIZE, MARGIN_X, DATE_Y, &date);
        BODY_Y
    } else {
        TITLE_Y
    };

    for line in lines {
        if !line.is_empty() {
            text_at(&mut operations, BODY_SIZE, MARGIN_X, y, line);
        }
        y -= BODY_LEADING;
    }

    operations
}

/// Render the ideas as an A4 report: title, generation date, wrapped body.
pub fn render_pdf(content: &str, generated_on: NaiveDate) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let pages = paginate(wrap_lines(content, WRAP_COLUMNS));
    let mut kids: Vec<ObjectId> = Vec::with_capacity(pages.len());

    for (index, lines) in pages.iter().enumerate() {
        let content = Content {
            operations: page_operations(index == 0, generated_on, lines),
        };
        let encoded = content
            .encode()
            .context("Failed to encode PDF page content")?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        kids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids.into_iter().map(Object::from).collect::<Vec<_>>(),
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).context("Failed to write PDF")?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_wrap_on_word_boundaries() {
        let lines = wrap_lines("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_keeps_blank_lines_and_splits_long_words() {
        let lines = wrap_lines("1. Idea\n\nabcdefghij", 4);
        assert_eq!(lines, vec!["1.", "Idea", "", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_single_page_report() {
        let bytes = render_pdf("1. Meal prep delivery\n2. Cooking classes", date()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_report_spans_pages() {
        let content = (1..=150)
            .map(|n| format!("{}. Idea number {}", n, n))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render_pdf(&content, date()).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 3);
    }

    #[test]
    fn test_header_operations() {
        let operations = page_operations(true, date(), &["body".to_string()]);
        let literals: Vec<Vec<u8>> = operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match &op.operands[0] {
                Object::String(bytes, _) => Some(bytes.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(literals[0], REPORT_TITLE.as_bytes());
        assert_eq!(literals[1], b"Generated on: 3/9/2024");
        assert_eq!(literals[2], b"body");
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        match encode_text("café ✓") {
            Object::String(bytes, _) => assert_eq!(bytes, b"caf\xe9 ?"),
            other => panic!("unexpected object {:?}", other),
        }
    }
}
