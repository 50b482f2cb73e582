//! Vector graphics operators (fills, rules, marked content)

use crate::document::Color;

/// Format a number for a content stream: at most three decimals, no trailing zeros
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Generate operators that fill a rectangle
///
/// Coordinates are PDF coordinates (origin bottom-left, `y` is the bottom edge).
pub fn generate_rect_operators(x: f64, y: f64, width: f64, height: f64, color: Color) -> Vec<u8> {
    format!(
        "q\n{} {} {} rg\n{} {} {} {} re\nf\nQ\n",
        fmt_num(color.r as f64),
        fmt_num(color.g as f64),
        fmt_num(color.b as f64),
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height)
    )
    .into_bytes()
}

/// Generate operators that stroke a straight line
pub fn generate_line_operators(
    from: (f64, f64),
    to: (f64, f64),
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    format!(
        "q\n{} w\n{} {} {} RG\n{} {} m\n{} {} l\nS\nQ\n",
        fmt_num(line_width),
        fmt_num(color.r as f64),
        fmt_num(color.g as f64),
        fmt_num(color.b as f64),
        fmt_num(from.0),
        fmt_num(from.1),
        fmt_num(to.0),
        fmt_num(to.1)
    )
    .into_bytes()
}

/// Generate the opening operator of a marked-content sequence
pub(crate) fn generate_marked_content_begin(tag: &str) -> Vec<u8> {
    let tag: String = tag.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    format!("/{tag} BMC\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(56.69291), "56.693");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-12.25), "-12.25");
    }

    #[test]
    fn test_rect_operators() {
        let ops = generate_rect_operators(10.0, 20.0, 30.0, 40.0, Color::from_hex(0x4472C4));
        let ops = String::from_utf8(ops).unwrap();
        assert!(ops.starts_with("q\n"));
        assert!(ops.contains("10 20 30 40 re"));
        assert!(ops.contains("0.267 0.447 0.769 rg"));
        assert!(ops.ends_with("f\nQ\n"));
    }

    #[test]
    fn test_line_operators() {
        let ops = generate_line_operators((0.0, 0.0), (100.0, 0.0), 0.5, Color::black());
        let ops = String::from_utf8(ops).unwrap();
        assert!(ops.contains("0.5 w"));
        assert!(ops.contains("0 0 0 RG"));
        assert!(ops.contains("0 0 m\n100 0 l\nS"));
    }

    #[test]
    fn test_marked_content_tag_is_sanitized() {
        assert_eq!(generate_marked_content_begin("Payment"), b"/Payment BMC\n");
        assert_eq!(generate_marked_content_begin("Bad Tag/"), b"/BadTag BMC\n");
    }
}
