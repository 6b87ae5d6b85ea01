//! ANSI escape sequence to inline-styled HTML conversion for console output.
//!
//! Only SGR (`ESC [ ... m`) colour codes produce markup. Every other escape
//! sequence, and any SGR parameter that is not understood, is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// CSI sequences, OSC strings, other escapes (with intermediate bytes) and a
/// lone ESC.
static ESCAPE_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b(?:\[([0-9;?]*)([@-~])|\][^\x07\x1b]*(?:\x07|\x1b\\)?|[ -/]*[0-~])?")
        .expect("valid escape sequence regex")
});

const STANDARD: [(u8, u8, u8); 8] = [
    (0, 0, 0),
    (187, 0, 0),
    (0, 187, 0),
    (187, 187, 0),
    (0, 0, 187),
    (187, 0, 187),
    (0, 187, 187),
    (255, 255, 255),
];

const BRIGHT: [(u8, u8, u8); 8] = [
    (85, 85, 85),
    (255, 85, 85),
    (0, 255, 0),
    (255, 255, 85),
    (85, 85, 255),
    (255, 85, 255),
    (85, 255, 255),
    (255, 255, 255),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Standard(usize),
    Bright(usize),
    Rgb(u8, u8, u8),
}

impl Color {
    /// Maps an xterm 256-colour index.
    fn from_palette(index: u32) -> Option<Self> {
        const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
        match index {
            0..=7 => Some(Color::Standard(index as usize)),
            8..=15 => Some(Color::Bright(index as usize - 8)),
            16..=231 => {
                let n = (index - 16) as usize;
                Some(Color::Rgb(LEVELS[n / 36], LEVELS[(n / 6) % 6], LEVELS[n % 6]))
            }
            232..=255 => {
                let level = (8 + (index - 232) * 10) as u8;
                Some(Color::Rgb(level, level, level))
            }
            _ => None,
        }
    }

    fn css(self, bold: bool) -> String {
        let (r, g, b) = match self {
            Color::Standard(i) if bold => BRIGHT[i],
            Color::Standard(i) => STANDARD[i],
            Color::Bright(i) => BRIGHT[i],
            Color::Rgb(r, g, b) => (r, g, b),
        };
        format!("rgb({}, {}, {})", r, g, b)
    }
}

#[derive(Debug, Default)]
struct Style {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

impl Style {
    fn apply(&mut self, params: &str) {
        let codes: Vec<u32> = params
            .split(';')
            .map(|p| p.parse().unwrap_or(0))
            .collect();

        let mut i = 0;
        while i < codes.len() {
            match codes[i] {
                0 => *self = Style::default(),
                1 => self.bold = true,
                22 => self.bold = false,
                code @ 30..=37 => self.fg = Some(Color::Standard((code - 30) as usize)),
                code @ 40..=47 => self.bg = Some(Color::Standard((code - 40) as usize)),
                code @ 90..=97 => self.fg = Some(Color::Bright((code - 90) as usize)),
                code @ 100..=107 => self.bg = Some(Color::Bright((code - 100) as usize)),
                39 => self.fg = None,
                49 => self.bg = None,
                code @ (38 | 48) => {
                    let (color, consumed) = extended_color(&codes[i + 1..]);
                    if let Some(color) = color {
                        if code == 38 {
                            self.fg = Some(color);
                        } else {
                            self.bg = Some(color);
                        }
                    }
                    i += consumed;
                }
                other => log::trace!("dropping unsupported SGR code {}", other),
            }
            i += 1;
        }
    }

    fn css(&self) -> Option<String> {
        let mut rules = Vec::new();
        if let Some(fg) = self.fg {
            rules.push(format!("color:{}", fg.css(self.bold)));
        }
        if let Some(bg) = self.bg {
            rules.push(format!("background-color:{}", bg.css(false)));
        }
        (!rules.is_empty()).then(|| rules.join(";"))
    }
}

/// Parses the arguments following a 38/48 code; returns the colour and how many codes it used.
fn extended_color(rest: &[u32]) -> (Option<Color>, usize) {
    match rest {
        [5, index, ..] => (Color::from_palette(*index), 2),
        [2, r, g, b, ..] => {
            let channel = |v: u32| u8::try_from(v).ok();
            match (channel(*r), channel(*g), channel(*b)) {
                (Some(r), Some(g), Some(b)) => (Some(Color::Rgb(r, g, b)), 4),
                _ => (None, 4),
            }
        }
        [5] | [2, ..] => (None, rest.len()),
        _ => (None, 0),
    }
}

/// Escapes `&`, `<` and `>` so console text can never be read as markup.
pub fn escape_for_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Converts ANSI colour codes into `<span style="...">` runs.
///
/// The input is expected to be HTML-escaped already; text is copied through
/// unchanged apart from the removed escape sequences.
///
/// ```
/// use rendermime_core::ansi::ansi_to_html;
///
/// let html = ansi_to_html("\x1b[31mred\x1b[0m plain");
/// assert_eq!(html, "<span style=\"color:rgb(187, 0, 0)\">red</span> plain");
/// ```
pub fn ansi_to_html(text: &str) -> String {
    if !text.contains('\x1b') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut style = Style::default();
    let mut last = 0;

    for caps in ESCAPE_SEQUENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_run(&mut out, &text[last..whole.start()], &style);
        last = whole.end();

        let is_sgr = caps.get(2).is_some_and(|m| m.as_str() == "m");
        if is_sgr {
            style.apply(caps.get(1).map_or("", |m| m.as_str()));
        }
    }
    push_run(&mut out, &text[last..], &style);
    out
}

fn push_run(out: &mut String, run: &str, style: &Style) {
    if run.is_empty() {
        return;
    }
    match style.css() {
        Some(css) => {
            out.push_str("<span style=\"");
            out.push_str(&css);
            out.push_str("\">");
            out.push_str(run);
            out.push_str("</span>");
        }
        None => out.push_str(run),
    }
}
