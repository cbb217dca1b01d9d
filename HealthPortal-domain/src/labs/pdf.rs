/// Collect the string operands of every `BT ... ET` text object.
///
/// This is not a PDF parser: compressed content streams yield nothing, and
/// only printable ASCII survives. Each closed string and each text object end
/// contributes a separating space.
pub fn extract_text_from_pdf(data: &[u8]) -> String {
    let mut text = String::new();
    let mut in_text = false;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < data.len() {
        let c = data[i];

        if !in_string {
            let rest = &data[i..];
            if rest.starts_with(b"BT") {
                in_text = true;
                i += 2;
                continue;
            }
            if rest.starts_with(b"ET") {
                in_text = false;
                text.push(' ');
                i += 2;
                continue;
            }
        }

        i += 1;
        if !in_text {
            continue;
        }

        if escaped {
            escaped = false;
            if in_string {
                match c {
                    b'n' => text.push('\n'),
                    b'r' => text.push('\r'),
                    b't' => text.push('\t'),
                    32..=126 => text.push(c as char),
                    _ => {}
                }
            }
            continue;
        }

        match c {
            b'(' => in_string = true,
            b')' => {
                in_string = false;
                text.push(' ');
            }
            b'\\' => escaped = true,
            32..=126 if in_string => text.push(c as char),
            _ => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_strings_inside_text_objects() {
        let pdf = b"%PDF-1.4\n1 0 obj (ignored) endobj\nBT /F1 12 Tf (TSH) Tj (2.1) Tj ET\n";
        let text = extract_text_from_pdf(pdf);
        assert_eq!(text.split_whitespace().collect::<Vec<_>>(), vec!["TSH", "2.1"]);
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn test_decodes_escapes() {
        let pdf = br"BT (Line\none) Tj (a\(b\)c) Tj (back\\slash) Tj ET";
        let text = extract_text_from_pdf(pdf);
        assert!(text.contains("Line\none"));
        assert!(text.contains("a(b)c"));
        assert!(text.contains(r"back\slash"));
    }

    #[test]
    fn test_drops_non_printable_bytes() {
        let pdf = b"BT (A\x01B\xffC) Tj ET";
        assert_eq!(extract_text_from_pdf(pdf).trim(), "ABC");
    }

    #[test]
    fn test_text_markers_inside_strings_are_literal() {
        let pdf = b"BT (BETTER) Tj ET";
        assert_eq!(extract_text_from_pdf(pdf).trim(), "BETTER");
    }

    #[test]
    fn test_no_text_objects() {
        assert!(extract_text_from_pdf(b"%PDF-1.7 binary stream").trim().is_empty());
        assert!(extract_text_from_pdf(b"").is_empty());
    }
}
