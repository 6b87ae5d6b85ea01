use std::collections::HashMap;

/// Heading id generator; repeated slugs get a `-N` suffix.
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next unique slug for the given heading text.
    ///
    /// Every slug handed out is recorded, so a suffixed slug (`a-1`) is never
    /// produced again for a heading whose own text slugifies to it.
    pub fn next_slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut n = self.counts.get(&base).copied().unwrap_or(0);
        let mut slug = base.clone();
        while self.counts.contains_key(&slug) {
            n += 1;
            slug = format!("{}-{}", base, n);
        }
        self.counts.insert(base, n);
        self.counts.entry(slug.clone()).or_insert(0);
        slug
    }

    /// Reserves a slug so future generated slugs won't collide with it.
    pub fn reserve(&mut self, slug: &str) {
        self.counts.entry(slug.to_string()).or_insert(0);
    }
}

/// Returns true for the combining marks most often found in heading text
/// (Latin diacritics, Devanagari, Arabic, Hebrew, Thai).
fn is_combining_mark(ch: char) -> bool {
    use std::ops::RangeInclusive;

    const RANGES: &[RangeInclusive<u32>] = &[
        0x0300..=0x036F,
        0x0591..=0x05BD,
        0x0610..=0x061A,
        0x064B..=0x065F,
        0x0900..=0x0903,
        0x093A..=0x094F,
        0x0951..=0x0957,
        0x0E31..=0x0E3A,
        0x0E47..=0x0E4E,
        0x1AB0..=0x1AFF,
        0x1DC0..=0x1DFF,
        0xFE20..=0xFE2F,
    ];

    let cp = ch as u32;
    RANGES.iter().any(|r| r.contains(&cp))
}

/// Turns heading text into an id fragment.
///
/// Word characters (letters, digits, `_`, combining marks) are lowercased and
/// kept; every other run of characters becomes a single `-`, and hyphens at
/// either end are trimmed.
///
/// ```
/// use rendermime_core::slug::slugify;
///
/// assert_eq!(slugify("Title first level"), "title-first-level");
/// assert_eq!(slugify("  What's new?  "), "what-s-new");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        let is_word = ch.is_alphanumeric() || ch == '_' || is_combining_mark(ch);
        if !is_word {
            pending_dash = true;
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.extend(ch.to_lowercase());
    }

    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}
