use std::fmt::Write;

/// Group digits in thousands with commas (e.g. 4838 -> "4,838").
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Score with one decimal place.
pub fn format_score(score: f64) -> String {
    let mut out = String::with_capacity(4);
    let _ = write!(out, "{score:.1}");
    out
}

/// Minimal escaping for text interpolated into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_html, format_count, format_score};

    #[test]
    fn formats_small_counts_unchanged() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_count(1247), "1,247");
        assert_eq!(format_count(4838), "4,838");
    }

    #[test]
    fn formats_millions() {
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(100_000), "100,000");
    }

    #[test]
    fn score_has_one_decimal() {
        assert_eq!(format_score(9.0), "9.0");
        assert_eq!(format_score(8.5), "8.5");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
