//! String and number formatting helpers used across the crate

/// Title-case a string, treating `-` and `_` as word separators.
///
/// ```
/// use datastudio::format::proper;
/// assert_eq!(proper("host_response-rate"), "Host Response Rate");
/// ```
pub fn proper(s: &str) -> String {
    s.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a string to snake case suitable for filenames and keys.
///
/// Drops characters outside `[a-zA-Z0-9._/ ]`, collapses whitespace to a
/// single underscore, lowercases, and collapses repeated underscores.
pub fn snake(s: &str) -> String {
    let mut cleaned = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '/' {
            cleaned.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            cleaned.push(' ');
        }
    }
    let mut out = String::with_capacity(cleaned.len());
    let mut prev_underscore = true; // trims leading separators
    for c in cleaned.trim().chars() {
        let mapped = if c == ' ' { '_' } else { c };
        if mapped == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(mapped);
            prev_underscore = mapped == '_';
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Re-wrap free text to the given width, collapsing internal whitespace.
pub fn wrap_text(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in words {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Scale a byte count to a human-readable string.
///
/// ```
/// use datastudio::format::scale_bytes;
/// assert_eq!(scale_bytes(1_253_656), "1.20MB");
/// ```
pub fn scale_bytes(num: u64) -> String {
    scale_number(num as f64, "B")
}

/// Scale a number by factors of 1024 with the given suffix.
pub fn scale_number(mut num: f64, suffix: &str) -> String {
    const FACTOR: f64 = 1024.0;
    for unit in ["", "K", "M", "G", "T", "P"] {
        if num.abs() < FACTOR {
            return format!("{num:.2}{unit}{suffix}");
        }
        num /= FACTOR;
    }
    format!("{num:.2}E{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proper() {
        assert_eq!(proper("data-studio"), "Data Studio");
        assert_eq!(proper("one_two  three"), "One Two Three");
    }

    #[test]
    fn test_snake() {
        assert_eq!(snake("Hello  World!"), "hello_world");
        assert_eq!(snake("Already_snake__case"), "already_snake_case");
        assert_eq!(snake("  padded  "), "padded");
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale_bytes(512), "512.00B");
        assert_eq!(scale_bytes(2048), "2.00KB");
        assert_eq!(scale_bytes(1_253_656_678), "1.17GB");
    }

    #[test]
    fn test_wrap() {
        let wrapped = wrap_text("a b c d", 3);
        assert_eq!(wrapped, "a b\nc d");
    }
}
