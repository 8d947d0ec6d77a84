use std::{borrow::Cow, sync::Arc};

use crate::codec::document::{DisplayAsset, ExportDocument};
use crate::core_log::CoreLog;

/// One decoded export entry, projected onto the display schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub source: String,
    pub asset: DisplayAsset,
}

/// Parse an export document (`{"items":[...]}`).
pub fn decode_document(content: &str) -> Result<ExportDocument, String> {
    let relaxed = relax_control_chars(content);
    serde_json::from_str(&relaxed).map_err(|e| format!("parse bindings document: {e}"))
}

/// Parse a reduced-schema document for display. Never fails: an empty or unreadable
/// document comes back with `maps == None`.
pub fn decode_display(content: &str, logger: &Arc<dyn CoreLog>) -> DisplayAsset {
    if content.trim().is_empty() {
        logger.error("[decode_display] bindings document was empty");
        return DisplayAsset::no_data();
    }
    let relaxed = relax_control_chars(content);
    match serde_json::from_str::<DisplayAsset>(&relaxed) {
        Ok(asset) => asset,
        Err(e) => {
            logger.error(&format!("[decode_display] parse bindings document: {e}"));
            DisplayAsset::no_data()
        }
    }
}

/// Decode an export document and project every entry onto the display schema.
/// An unreadable document yields no entries.
pub fn decode_document_for_display(content: &str, logger: &Arc<dyn CoreLog>) -> Vec<DisplayItem> {
    match decode_document(content) {
        Ok(doc) => doc
            .items
            .iter()
            .map(|item| DisplayItem {
                source: item.source.clone(),
                asset: DisplayAsset::from(&item.data),
            })
            .collect(),
        Err(e) => {
            logger.error(&format!("[decode_document_for_display] {e}"));
            Vec::new()
        }
    }
}

/// Documents carry raw control characters inside strings (the writer does not escape
/// them). Re-escape those as `\u00XX` so a strict JSON parser reads the same text back.
pub(crate) fn relax_control_chars(content: &str) -> Cow<'_, str> {
    if !content.chars().any(|c| c < '\u{20}') {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    for c in content.chars() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                c if c < '\u{20}' => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
        }
    }
    Cow::Owned(out)
}
