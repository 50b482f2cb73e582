//! Line breaking for mixed Korean/Latin text

/// Check if a character is a Hangul syllable or jamo
pub fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}' | // Syllables
        '\u{1100}'..='\u{11FF}' | // Jamo
        '\u{3130}'..='\u{318F}' | // Compatibility jamo
        '\u{A960}'..='\u{A97F}' | // Jamo extended-A
        '\u{D7B0}'..='\u{D7FF}'   // Jamo extended-B
    )
}

/// Check if a character is a Han ideograph or kana (breakable between any two)
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}' | // Hiragana, Katakana
        '\u{3400}'..='\u{4DBF}' | // CJK extension A
        '\u{4E00}'..='\u{9FFF}' | // CJK unified ideographs
        '\u{F900}'..='\u{FAFF}'   // CJK compatibility ideographs
    )
}

fn is_closing_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ':' | ';' | ')' | ']' | '}' | '%' | '、' | '。' | '」' | '』' | '〉' | '》'
    )
}

fn is_opening_punct(c: char) -> bool {
    matches!(c, '(' | '[' | '{' | '「' | '『' | '〈' | '《')
}

/// Check if breaking between two characters is allowed
///
/// Korean separates words with spaces, so Hangul only breaks at spaces.
/// Han ideographs and kana may break between any two characters.
pub fn can_break_between(left: char, right: char) -> bool {
    // Don't break before closing punctuation or after opening punctuation
    if is_closing_punct(right) || is_opening_punct(left) {
        return false;
    }

    if left.is_whitespace() {
        return !right.is_whitespace();
    }

    if right.is_whitespace() {
        return false;
    }

    is_cjk(left) || is_cjk(right)
}

/// Find safe break points in text
///
/// Returns char indices where line breaks are allowed, including the start
/// and end of the text.
pub fn find_break_points(text: &str) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();
    let mut break_points = vec![0];

    for i in 1..chars.len() {
        if can_break_between(chars[i - 1], chars[i]) {
            break_points.push(i);
        }
    }

    if !chars.is_empty() {
        break_points.push(chars.len());
    }

    break_points
}

/// Greedily wrap text into lines no wider than `max_width`
///
/// `measure` returns the rendered width of a string in the same unit as
/// `max_width`. Explicit `\n` always starts a new line. Words wider than a
/// whole line are split at character boundaries.
pub fn wrap_by_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        let hard_line = hard_line.strip_suffix('\r').unwrap_or(hard_line);
        wrap_line(hard_line, max_width, &measure, &mut lines);
    }
    lines
}

fn wrap_line<F>(text: &str, max_width: f64, measure: &F, lines: &mut Vec<String>)
where
    F: Fn(&str) -> f64,
{
    let start = lines.len();
    let chars: Vec<char> = text.chars().collect();
    let breaks = find_break_points(text);

    let mut current = String::new();
    for window in breaks.windows(2) {
        let segment: String = chars[window[0]..window[1]].iter().collect();

        let candidate = format!("{current}{segment}");
        if measure(candidate.trim_end()) <= max_width {
            current = candidate;
            continue;
        }

        if !current.trim().is_empty() {
            lines.push(current.trim_end().to_string());
        }
        current = String::new();

        if measure(segment.trim_end()) <= max_width {
            current = segment;
            continue;
        }

        // Over-long word: fall back to character boundaries
        for c in segment.chars() {
            let mut candidate = current.clone();
            candidate.push(c);
            if current.is_empty() || measure(candidate.trim_end()) <= max_width {
                current = candidate;
            } else {
                lines.push(current.trim_end().to_string());
                current = c.to_string();
            }
        }
    }

    if !current.trim().is_empty() || lines.len() == start {
        lines.push(current.trim_end().to_string());
    }
}
