//! Rich-text paragraphs

use super::{DrawOp, TextStyle};
use locale_text::{find_break_points, wrap_by_width};
use pdf_core::{Align, FontFamily, FontWeight};

/// A styled piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// An ordered sequence of runs laid out with one style
///
/// `\n` inside a run forces a line break.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub style: TextStyle,
}

/// A wrapped line, ready to place
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub runs: Vec<Run>,
    pub width: f64,
}

fn weight(bold: bool) -> FontWeight {
    if bold {
        FontWeight::Bold
    } else {
        FontWeight::Regular
    }
}

/// Merge adjacent characters of the same weight into runs
fn to_runs(chars: &[(char, bool)]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &(c, bold) in chars {
        match runs.last_mut() {
            Some(run) if run.bold == bold => run.text.push(c),
            _ => runs.push(Run {
                text: c.to_string(),
                bold,
            }),
        }
    }
    runs
}

fn trim_end(chars: &[(char, bool)]) -> &[(char, bool)] {
    let end = chars
        .iter()
        .rposition(|(c, _)| !c.is_whitespace())
        .map_or(0, |i| i + 1);
    &chars[..end]
}

impl Paragraph {
    pub fn new(runs: Vec<Run>, style: TextStyle) -> Self {
        Self { runs, style }
    }

    /// Single-run paragraph
    pub fn text(text: impl Into<String>, bold: bool, style: TextStyle) -> Self {
        Self::new(vec![Run { text: text.into(), bold }], style)
    }

    fn measure(&self, family: &FontFamily, chars: &[(char, bool)]) -> f64 {
        to_runs(trim_end(chars))
            .iter()
            .map(|run| family.text_width(&run.text, weight(run.bold), self.style.size) as f64)
            .sum()
    }

    /// Wrap into lines no wider than `max_width` where possible
    pub fn wrap(&self, family: &FontFamily, max_width: f64) -> Vec<Line> {
        if let [run] = self.runs.as_slice() {
            let weight = weight(run.bold);
            let measure =
                |s: &str| family.text_width(s, weight, self.style.size) as f64;
            return wrap_by_width(&run.text, max_width, measure)
                .into_iter()
                .map(|text| Line {
                    width: measure(&text),
                    runs: vec![Run {
                        text,
                        bold: run.bold,
                    }],
                })
                .collect();
        }

        let chars: Vec<(char, bool)> = self
            .runs
            .iter()
            .flat_map(|run| run.text.chars().map(move |c| (c, run.bold)))
            .collect();

        let mut lines = Vec::new();
        for hard_line in chars.split(|&(c, _)| c == '\n') {
            self.wrap_rich_line(family, hard_line, max_width, &mut lines);
        }
        lines
    }

    fn wrap_rich_line(
        &self,
        family: &FontFamily,
        chars: &[(char, bool)],
        max_width: f64,
        lines: &mut Vec<Line>,
    ) {
        let text: String = chars.iter().map(|&(c, _)| c).collect();
        let breaks = find_break_points(&text);

        let push_line = |line: &[(char, bool)], lines: &mut Vec<Line>| {
            let line = trim_end(line);
            lines.push(Line {
                width: self.measure(family, line),
                runs: to_runs(line),
            });
        };

        let start = lines.len();
        let mut current: Vec<(char, bool)> = Vec::new();
        for window in breaks.windows(2) {
            let segment = &chars[window[0]..window[1]];

            let mut candidate = current.clone();
            candidate.extend_from_slice(segment);
            if self.measure(family, &candidate) <= max_width {
                current = candidate;
                continue;
            }

            if current.iter().any(|(c, _)| !c.is_whitespace()) {
                push_line(&current, lines);
            }
            current.clear();

            if self.measure(family, segment) <= max_width {
                current.extend_from_slice(segment);
                continue;
            }

            for &ch in segment {
                let mut candidate = current.clone();
                candidate.push(ch);
                if current.is_empty() || self.measure(family, &candidate) <= max_width {
                    current = candidate;
                } else {
                    push_line(&current, lines);
                    current = vec![ch];
                }
            }
        }

        if current.iter().any(|(c, _)| !c.is_whitespace()) || lines.len() == start {
            push_line(&current, lines);
        }
    }

    /// Draw operations for wrapped lines inside a box starting at `top`
    ///
    /// `x` and `width` describe the horizontal extent used for alignment.
    pub fn draw_lines(
        &self,
        family: &FontFamily,
        lines: &[Line],
        x: f64,
        top: f64,
        width: f64,
    ) -> Vec<DrawOp> {
        let style = &self.style;
        let mut ops = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let line_top = top + i as f64 * style.leading;
            let baseline = style.baseline(line_top);
            let mut run_x = match style.align {
                Align::Left => x,
                Align::Center => x + (width - line.width) / 2.0,
                Align::Right => x + width - line.width,
            };
            for run in &line.runs {
                ops.push(DrawOp::Text {
                    x: run_x,
                    baseline,
                    text: run.text.clone(),
                    bold: run.bold,
                    size: style.size,
                    color: style.color,
                });
                run_x += family.text_width(&run.text, weight(run.bold), style.size) as f64;
            }
        }
        ops
    }
}
