use std::io::Cursor;

use standard_error::{Interpolate, StandardError};

use crate::prelude::Result;

/// Turns an uploaded document into plain text. A resume that yields no text
/// is rejected here, before any classification runs.
pub fn extract_document(data: Vec<u8>, content_type: &str) -> Result<String> {
    match content_type {
        "application/pdf" => extract_text_from_pdf(&data),
        "text/plain" => Ok(String::from_utf8(data)
            .map_err(|e| StandardError::new("ERR-READ-001").interpolate_err(e.to_string()))?),
        _ => Err(StandardError::new("ERR-READ-001")),
    }
}

fn extract_text_from_pdf(data: &[u8]) -> Result<String> {
    use lopdf::Document;
    let cursor = Cursor::new(data);
    let doc = Document::load_from(cursor)
        .map_err(|e| StandardError::new("ERR-READ-002").interpolate_err(e.to_string()))?;

    let pages = doc.get_pages();
    let mut text = String::new();

    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                tracing::warn!("failed to extract text from page {}: {}", page_num, e);
            }
        }
    }

    if text.trim().is_empty() {
        return Err(StandardError::new("ERR-READ-002")
            .interpolate_err("no text extracted from pdf".to_string()));
    }
    Ok(text.trim().to_string())
}
