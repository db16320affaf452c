//! Minimal markdown tokenizer for note bodies.
//!
//! Supports the subset the catatan views render: headings 1-4,
//! blockquotes, paragraphs, and inline bold / italic / code spans.
//! Output is structured tokens, never raw HTML, so rendering cannot
//! inject markup from note content.

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Block {
    Heading(u8, Vec<Inline>),
    Quote(Vec<Inline>),
    Paragraph(Vec<Inline>),
    Blank,
}

/// Parse inline spans from one line.
///
/// Rules (MVP):
/// - `**bold**`, `*italic*`, `` `code` ``; no nesting inside spans.
/// - An unclosed marker is treated as plain text.
pub(crate) fn parse_inlines(line: &str) -> Vec<Inline> {
    let bytes = line.as_bytes();
    let mut out: Vec<Inline> = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    let mut flush = |out: &mut Vec<Inline>, from: usize, to: usize| {
        if to > from {
            out.push(Inline::Text(line[from..to].to_string()));
        }
    };

    while i < bytes.len() {
        if bytes[i] == b'`' {
            if let Some(close) = find_marker(bytes, i + 1, b"`") {
                flush(&mut out, text_start, i);
                out.push(Inline::Code(line[i + 1..close].to_string()));
                i = close + 1;
                text_start = i;
                continue;
            }
        } else if i + 1 < bytes.len() && bytes[i] == b'*' && bytes[i + 1] == b'*' {
            if let Some(close) = find_marker(bytes, i + 2, b"**") {
                if close > i + 2 {
                    flush(&mut out, text_start, i);
                    out.push(Inline::Bold(line[i + 2..close].to_string()));
                    i = close + 2;
                    text_start = i;
                    continue;
                }
            }
        } else if bytes[i] == b'*' {
            if let Some(close) = find_marker(bytes, i + 1, b"*") {
                if close > i + 1 {
                    flush(&mut out, text_start, i);
                    out.push(Inline::Italic(line[i + 1..close].to_string()));
                    i = close + 1;
                    text_start = i;
                    continue;
                }
            }
        }
        i += 1;
    }

    flush(&mut out, text_start, bytes.len());
    out
}

fn find_marker(bytes: &[u8], from: usize, marker: &[u8]) -> Option<usize> {
    let mut j = from;
    while j + marker.len() <= bytes.len() {
        if &bytes[j..j + marker.len()] == marker {
            return Some(j);
        }
        j += 1;
    }
    None
}

pub(crate) fn parse_blocks(input: &str) -> Vec<Block> {
    input
        .lines()
        .map(|line| {
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                return Block::Blank;
            }

            for level in (1..=4u8).rev() {
                let marker = "#".repeat(level as usize);
                if let Some(rest) = trimmed.strip_prefix(&marker) {
                    if let Some(text) = rest.strip_prefix(' ') {
                        return Block::Heading(level, parse_inlines(text.trim_start()));
                    }
                }
            }

            if let Some(rest) = trimmed.strip_prefix('>') {
                return Block::Quote(parse_inlines(rest.trim_start()));
            }

            Block::Paragraph(parse_inlines(trimmed))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(
            parse_blocks("milk, eggs"),
            vec![Block::Paragraph(vec![Inline::Text("milk, eggs".to_string())])]
        );
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse_blocks("# Title\n### Sub");
        assert_eq!(blocks[0], Block::Heading(1, vec![Inline::Text("Title".to_string())]));
        assert_eq!(blocks[1], Block::Heading(3, vec![Inline::Text("Sub".to_string())]));
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(
            parse_blocks("#tag"),
            vec![Block::Paragraph(vec![Inline::Text("#tag".to_string())])]
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            parse_blocks("> quoted"),
            vec![Block::Quote(vec![Inline::Text("quoted".to_string())])]
        );
    }

    #[test]
    fn test_inline_bold_italic_code() {
        assert_eq!(
            parse_inlines("a **b** *c* `d`"),
            vec![
                Inline::Text("a ".to_string()),
                Inline::Bold("b".to_string()),
                Inline::Text(" ".to_string()),
                Inline::Italic("c".to_string()),
                Inline::Text(" ".to_string()),
                Inline::Code("d".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_markers_stay_text() {
        assert_eq!(
            parse_inlines("a **b and `c"),
            vec![Inline::Text("a **b and `c".to_string())]
        );
    }

    #[test]
    fn test_empty_emphasis_stays_text() {
        assert_eq!(parse_inlines("**"), vec![Inline::Text("**".to_string())]);
    }

    #[test]
    fn test_blank_lines_tokenized() {
        let blocks = parse_blocks("a\n\nb");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], Block::Blank);
    }

    #[test]
    fn test_multibyte_text_survives() {
        assert_eq!(
            parse_inlines("catatan **péntíng** ✓"),
            vec![
                Inline::Text("catatan ".to_string()),
                Inline::Bold("péntíng".to_string()),
                Inline::Text(" ✓".to_string()),
            ]
        );
    }
}
