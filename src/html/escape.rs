/// Escape the characters that would otherwise be read as markup
///
/// ```
/// use card_filter::html::escape::escape_html;
///
/// assert_eq!(
///     escape_html(r#"<script>alert("x")</script>"#),
///     "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
/// );
/// ```
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn test_ampersand_escaped_once() {
        assert_eq!(escape_html("R&D &amp;"), "R&amp;D &amp;amp;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_html("Jace, the Mind Sculptor"), "Jace, the Mind Sculptor");
    }
}
