//! Shields math spans from the Markdown converter.
//!
//! [`remove_math`] swaps every math span for an `@@N@@` placeholder before
//! conversion, and [`replace_math`] puts the original text back into the HTML
//! afterwards. Without this, Markdown would read `_` and `*` inside formulas
//! as emphasis and eat backslash escapes such as `\(`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@@(\d+)@@").expect("valid placeholder regex"));

static LEADING_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@@\d+@@").expect("valid placeholder regex"));

static BEGIN_ENVIRONMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\begin\{([A-Za-z]*\*?)\}").expect("valid environment regex"));

/// Text with math replaced by placeholders, plus the removed spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtectedMath {
    /// Input text with each math span replaced by `@@N@@`.
    pub text: String,
    /// Original span text; index `N` belongs to placeholder `@@N@@`.
    pub math: Vec<String>,
}

/// Replaces math spans with placeholders.
///
/// Recognized spans are `$$...$$`, `$...$`, `\(...\)`, `\[...\]` and
/// `\begin{env}...\end{env}`. Braces nest, a backslash escapes the following
/// character, and a blank line ends the search for a closing delimiter (the
/// opening delimiter then stays as plain text). Inline code and fenced code
/// blocks are left alone, and `@@N@@` strings already in the input are
/// protected as well so restoring cannot rewrite them.
///
/// ```
/// use rendermime_core::math::remove_math;
///
/// let protected = remove_math("Let $x_1$ and _y_.");
/// assert_eq!(protected.text, "Let @@0@@ and _y_.");
/// assert_eq!(protected.math, vec!["$x_1$".to_string()]);
/// ```
pub fn remove_math(text: &str) -> ProtectedMath {
    let code = code_ranges(text);
    let mut next_code = 0;
    let mut protected = ProtectedMath {
        text: String::with_capacity(text.len()),
        math: Vec::new(),
    };

    let mut i = 0;
    while i < text.len() {
        while code.get(next_code).is_some_and(|r| r.start < i) {
            next_code += 1;
        }
        if let Some(range) = code.get(next_code).filter(|r| r.start == i) {
            protected.protect_placeholders(&text[range.clone()]);
            i = range.end;
            next_code += 1;
            continue;
        }

        let rest = &text[i..];
        if let Some(m) = rest
            .starts_with("@@")
            .then(|| LEADING_PLACEHOLDER.find(rest))
            .flatten()
        {
            protected.push_math(m.as_str());
            i += m.end();
            continue;
        }
        if rest.starts_with("\\\\") || rest.starts_with("\\$") {
            protected.text.push_str(&rest[..2]);
            i += 2;
            continue;
        }
        if let Some((open_len, close)) = opening_delimiter(rest) {
            match find_close(text, i + open_len, &close, &code) {
                Some(end) => {
                    protected.push_math(&text[i..end]);
                    i = end;
                }
                None => {
                    protected.text.push_str(&rest[..open_len]);
                    i += open_len;
                }
            }
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        protected.text.push(ch);
        i += ch.len_utf8();
    }

    log::debug!("protected {} math span(s) from markdown", protected.math.len());
    protected
}

/// Substitutes `@@N@@` placeholders with their recorded math, verbatim.
///
/// Placeholders without a recorded span are left untouched.
pub fn replace_math(html: &str, math: &[String]) -> String {
    if math.is_empty() {
        return html.to_string();
    }
    PLACEHOLDER
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let index = caps[1].parse::<usize>().ok();
            match index.and_then(|n| math.get(n)) {
                Some(span) => span.clone(),
                None => {
                    log::warn!("no math recorded for placeholder {}", &caps[0]);
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

impl ProtectedMath {
    fn push_math(&mut self, span: &str) {
        self.text.push_str(&format!("@@{}@@", self.math.len()));
        self.math.push(span.to_string());
    }

    /// Copies code verbatim except for literal placeholders.
    fn protect_placeholders(&mut self, code: &str) {
        let mut last = 0;
        for m in PLACEHOLDER.find_iter(code) {
            self.text.push_str(&code[last..m.start()]);
            self.push_math(m.as_str());
            last = m.end();
        }
        self.text.push_str(&code[last..]);
    }
}

/// Returns the opening delimiter length and the matching closing delimiter.
fn opening_delimiter(rest: &str) -> Option<(usize, String)> {
    if rest.starts_with("$$") {
        Some((2, "$$".to_string()))
    } else if rest.starts_with('$') {
        Some((1, "$".to_string()))
    } else if rest.starts_with("\\(") {
        Some((2, "\\)".to_string()))
    } else if rest.starts_with("\\[") {
        Some((2, "\\]".to_string()))
    } else {
        let caps = BEGIN_ENVIRONMENT.captures(rest)?;
        let open_len = caps.get(0)?.end();
        Some((open_len, format!("\\end{{{}}}", &caps[1])))
    }
}

/// Finds the end (exclusive) of a math span whose body starts at `from`.
fn find_close(text: &str, from: usize, close: &str, code: &[Range<usize>]) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = from;
    while j < text.len() {
        if code.iter().any(|r| r.contains(&j)) {
            return None;
        }
        let rest = &text[j..];
        if depth == 0 && rest.starts_with(close) {
            return Some(j + close.len());
        }
        let mut chars = rest.chars();
        let ch = chars.next()?;
        match ch {
            '\\' => {
                j += 1 + chars.next().map_or(0, char::len_utf8);
                continue;
            }
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '\n' if blank_line_follows(text, j) => return None,
            _ => {}
        }
        j += ch.len_utf8();
    }
    None
}

/// True when the line after the newline at `newline` holds only whitespace.
fn blank_line_follows(text: &str, newline: usize) -> bool {
    let after = text[newline + 1..].trim_start_matches([' ', '\t', '\r']);
    after.starts_with('\n')
}

/// Byte ranges of fenced code blocks and inline code spans, sorted by start.
fn code_ranges(text: &str) -> Vec<Range<usize>> {
    let fences = fenced_blocks(text);
    let mut ranges = Vec::new();
    let mut gap_start = 0;
    for fence in &fences {
        inline_code_spans(text, gap_start..fence.start, &mut ranges);
        ranges.push(fence.clone());
        gap_start = fence.end;
    }
    inline_code_spans(text, gap_start..text.len(), &mut ranges);
    ranges
}

fn fence_run(line: &str) -> Option<(char, usize)> {
    let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some((marker, len))
}

fn fenced_blocks(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, char, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start_matches(' ');
        let fence = if line.len() - trimmed.len() <= 3 {
            fence_run(trimmed)
        } else {
            None
        };
        match (open, fence) {
            (None, Some((marker, len))) => open = Some((offset, marker, len)),
            (Some((start, marker, len)), Some((m, l)))
                if m == marker && l >= len && trimmed[l..].trim().is_empty() =>
            {
                ranges.push(start..offset + line.len());
                open = None;
            }
            _ => {}
        }
        offset += line.len();
    }

    if let Some((start, ..)) = open {
        ranges.push(start..text.len());
    }
    ranges
}

fn inline_code_spans(text: &str, gap: Range<usize>, ranges: &mut Vec<Range<usize>>) {
    let bytes = text.as_bytes();
    let run_len = |at: usize| bytes[at..gap.end].iter().take_while(|b| **b == b'`').count();

    let mut i = gap.start;
    while i < gap.end {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let run = run_len(i);
        let mut j = i + run;
        let mut end = None;
        while j < gap.end {
            match bytes[j] {
                b'`' => {
                    let closing = run_len(j);
                    if closing == run {
                        end = Some(j + closing);
                        break;
                    }
                    j += closing;
                }
                b'\n' if blank_line_follows(text, j) => break,
                _ => j += 1,
            }
        }
        match end {
            Some(end) => {
                ranges.push(i..end);
                i = end;
            }
            None => i += run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(protected: &ProtectedMath) -> Vec<&str> {
        protected.math.iter().map(String::as_str).collect()
    }

    #[test]
    fn protects_all_delimiter_styles() {
        let input = "a $x_1$ b $$y_2$$ c \\(z_3\\) d \\[w_4\\] e";
        let protected = remove_math(input);
        assert_eq!(protected.text, "a @@0@@ b @@1@@ c @@2@@ d @@3@@ e");
        assert_eq!(
            spans(&protected),
            vec!["$x_1$", "$$y_2$$", "\\(z_3\\)", "\\[w_4\\]"]
        );
    }

    #[test]
    fn environments_are_protected() {
        let input = "\\begin{align*}\na &= b_1 \\\\\nc &= d_2\n\\end{align*}";
        let protected = remove_math(input);
        assert_eq!(protected.text, "@@0@@");
        assert_eq!(spans(&protected), vec![input]);
    }

    #[test]
    fn braces_keep_span_open() {
        let protected = remove_math("$\\text{cost in $}$ after");
        assert_eq!(spans(&protected), vec!["$\\text{cost in $}$"]);
        assert_eq!(protected.text, "@@0@@ after");
    }

    #[test]
    fn escaped_dollar_is_not_a_delimiter() {
        let protected = remove_math("costs \\$5 and \\$6");
        assert!(protected.math.is_empty());
        assert_eq!(protected.text, "costs \\$5 and \\$6");
    }

    #[test]
    fn blank_line_abandons_open_span() {
        let protected = remove_math("$ not closed\n\nnext $a$");
        assert_eq!(protected.text, "$ not closed\n\nnext @@0@@");
        assert_eq!(spans(&protected), vec!["$a$"]);
    }

    #[test]
    fn code_is_left_alone() {
        let input = "`$a$` and\n```\n$$b$$\n```\nthen $c$";
        let protected = remove_math(input);
        assert_eq!(protected.text, "`$a$` and\n```\n$$b$$\n```\nthen @@0@@");
        assert_eq!(spans(&protected), vec!["$c$"]);
    }

    #[test]
    fn literal_placeholders_survive_restore() {
        let input = "keep @@0@@ and `@@1@@` with $m$";
        let protected = remove_math(input);
        assert_eq!(protected.text, "keep @@0@@ and `@@1@@` with @@2@@");
        let restored = replace_math(&protected.text, &protected.math);
        assert_eq!(restored, input);
    }

    #[test]
    fn restore_is_verbatim() {
        let math = vec!["$a<b$".to_string()];
        assert_eq!(replace_math("<p>@@0@@</p>", &math), "<p>$a<b$</p>");
    }

    #[test]
    fn unknown_placeholder_is_kept() {
        let math = vec!["$a$".to_string()];
        assert_eq!(replace_math("@@0@@ @@7@@", &math), "$a$ @@7@@");
    }
}
