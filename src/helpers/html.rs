//! HTML helper functions

/// Table of contents generator
///
/// Parses `<h1>`..`<hN>` headings out of rendered HTML and builds a nested
/// list linking to their anchors.
pub fn toc(content: &str, max_depth: usize) -> String {
    let mut html = r#"<ol class="toc">"#.to_string();
    let mut current_level = 0;

    let mut i = 0;
    let chars: Vec<char> = content.chars().collect();

    while i < chars.len() {
        // Look for <h1>, <h2>, etc.
        if chars[i] == '<' && i + 3 < chars.len() && chars[i + 1] == 'h' {
            if let Some(level) = chars[i + 2].to_digit(10) {
                let level = level as usize;
                if level <= max_depth {
                    // Find the closing >
                    if let Some(start) = chars[i..].iter().position(|&c| c == '>') {
                        let open_tag: String = chars[i..i + start + 1].iter().collect();
                        let start = i + start + 1;
                        // Find </h{level}>
                        let end_tag = format!("</h{}>", level);
                        let end_chars: Vec<char> = end_tag.chars().collect();

                        if let Some(end) = find_sequence(&chars[start..], &end_chars) {
                            let heading: String = chars[start..start + end].iter().collect();
                            let heading = strip_html(&heading);

                            // Adjust nesting
                            while current_level < level {
                                html.push_str("<ol>");
                                current_level += 1;
                            }
                            while current_level > level {
                                html.push_str("</ol>");
                                current_level -= 1;
                            }

                            // Prefer the id the renderer put on the heading,
                            // falling back to a slug of the text.
                            let id = extract_id(&open_tag)
                                .unwrap_or_else(|| slug::slugify(&heading));
                            html.push_str(&format!(
                                "<li class=\"toc-item toc-level-{}\"><a class=\"toc-link\" href=\"#{}\"><span class=\"toc-text\">{}</span></a></li>",
                                level, id, heading
                            ));

                            i = start + end + end_chars.len();
                            continue;
                        }
                    }
                }
            }
        }
        i += 1;
    }

    while current_level > 0 {
        html.push_str("</ol>");
        current_level -= 1;
    }

    html.push_str("</ol>");
    html
}

/// Pull the id attribute out of an opening tag, if any
fn extract_id(open_tag: &str) -> Option<String> {
    let pos = open_tag.find("id=\"")?;
    let rest = &open_tag[pos + 4..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

fn find_sequence(haystack: &[char], needle: &[char]) -> Option<usize> {
    'outer: for i in 0..haystack.len() {
        if i + needle.len() > haystack.len() {
            return None;
        }
        for j in 0..needle.len() {
            if haystack[i + j] != needle[j] {
                continue 'outer;
            }
        }
        return Some(i);
    }
    None
}

/// Strip HTML tags from content
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toc_uses_heading_ids() {
        let content = r##"<h2 id="setup">Setup</h2><p>x</p><h3 id="install">Install</h3>"##;
        let toc_html = toc(content, 3);
        assert!(toc_html.contains(r##"href="#setup""##));
        assert!(toc_html.contains(r##"href="#install""##));
        assert!(toc_html.contains("toc-level-2"));
        assert!(toc_html.contains("toc-level-3"));
    }

    #[test]
    fn test_toc_respects_max_depth() {
        let content = r#"<h2 id="a">A</h2><h4 id="b">B</h4>"#;
        let toc_html = toc(content, 3);
        assert!(toc_html.contains("A"));
        assert!(!toc_html.contains("toc-level-4"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <em>world</em></p>"), "Hello world");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & <b>"), "a &amp; &lt;b&gt;");
    }
}
