//! Text measurement, truncation, and wrapping utilities.
//!
//! Layout happens before any backend is involved (and raster text may have no
//! font at all), so widths are estimated rather than measured.

/// Heuristic: estimate pixel width of a single line of text.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Line height used for stacked lines of text.
pub fn line_height_px(font_px: u32) -> u32 {
    font_px + font_px / 4 + 2
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

/// Greedy word wrap at `width` characters; words longer than `width` are split.
pub fn wrap_to_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if cur.is_empty() {
            word.chars().count()
        } else {
            cur.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(&word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words_and_splits_long_ones() {
        assert_eq!(wrap_to_chars("alpha beta gamma", 10), ["alpha beta", "gamma"]);
        assert_eq!(wrap_to_chars("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert_eq!(wrap_to_chars("", 5), [""]);
    }

    #[test]
    fn truncation_respects_width() {
        let t = truncate_to_width("a very long legend label", 14, 80);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 14) <= 80);
        assert_eq!(truncate_to_width("short", 14, 200), "short");
    }

    #[test]
    fn line_height_grows_with_font() {
        assert!(line_height_px(20) > line_height_px(10));
        assert!(line_height_px(10) > 10);
    }
}
