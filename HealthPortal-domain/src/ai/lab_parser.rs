//! Turning a lab-parser model reply into markers.

use tracing::warn;

use crate::entities::ParsedMarker;

/// Markers recovered from a model reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerReply {
    pub markers: Vec<ParsedMarker>,
    /// The untouched reply when no marker array could be read from it
    pub raw_text: Option<String>,
}

/// Return the first balanced `[...]` in `text`.
///
/// Brackets inside JSON string literals are ignored.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

pub fn parse_marker_reply(reply: &str) -> MarkerReply {
    let parsed = extract_json_array(reply)
        .map(serde_json::from_str::<Vec<ParsedMarker>>);

    match parsed {
        Some(Ok(markers)) => MarkerReply {
            markers,
            raw_text: None,
        },
        Some(Err(e)) => {
            warn!("Model reply contained an unreadable marker array: {}", e);
            MarkerReply {
                markers: Vec::new(),
                raw_text: Some(reply.to_string()),
            }
        }
        None => {
            warn!("Model reply contained no marker array");
            MarkerReply {
                markers: Vec::new(),
                raw_text: Some(reply.to_string()),
            }
        }
    }
}
