//! Route matching module
//!
//! Implements structured path-segment matching for the route table.

/// One segment of a path pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the given text exactly
    Literal(&'static str),
    /// One or more ASCII word characters (`[A-Za-z0-9_]`), captured
    Word,
    /// Non-negative decimal: digits, optionally followed by `.` and digits, captured
    Amount,
}

/// A path pattern such as `/rate/{id}/{amount}`
#[derive(Debug, Clone, Copy)]
pub struct PathPattern {
    segments: &'static [Segment],
}

/// Values captured by `Word` and `Amount` segments, in pattern order
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Params<'a> {
    values: Vec<&'a str>,
}

impl<'a> Params<'a> {
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).copied()
    }
}

impl PathPattern {
    pub const fn new(segments: &'static [Segment]) -> Self {
        Self { segments }
    }

    /// Match a whole path against this pattern
    ///
    /// The path must start with `/` and have exactly as many segments as the
    /// pattern; an empty segment (e.g. a trailing slash) never matches.
    pub fn match_path<'a>(&self, path: &'a str) -> Option<Params<'a>> {
        let rest = path.strip_prefix('/')?;
        let mut parts = rest.split('/');
        let mut params = Params::default();

        for segment in self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(text) => {
                    if part != *text {
                        return None;
                    }
                }
                Segment::Word => {
                    if !is_word(part) {
                        return None;
                    }
                    params.values.push(part);
                }
                Segment::Amount => {
                    if !is_amount(part) {
                        return None;
                    }
                    params.values.push(part);
                }
            }
        }

        // Extra trailing segments mean the shape differs
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_amount(s: &str) -> bool {
    match s.split_once('.') {
        Some((int, frac)) => is_digits(int) && is_digits(frac),
        None => is_digits(s),
    }
}
