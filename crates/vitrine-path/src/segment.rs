//! Path segments

/// One step of a field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `key`
    Key(&'a str),
    /// `key[index]`
    Indexed {
        key: &'a str,
        index: usize,
        /// Index as written, used for the property-lookup fallback
        raw_index: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// Parse a single segment. Anything that is not exactly
    /// `identifier[digits]` is treated as a plain key.
    pub fn parse(raw: &'a str) -> Self {
        let Some(body) = raw.strip_suffix(']') else {
            return Segment::Key(raw);
        };
        let Some(open) = body.find('[') else {
            return Segment::Key(raw);
        };

        let key = &body[..open];
        let raw_index = &body[open + 1..];

        if key.is_empty() || key.contains(']') || raw_index.is_empty() {
            return Segment::Key(raw);
        }
        if !raw_index.bytes().all(|b| b.is_ascii_digit()) {
            return Segment::Key(raw);
        }

        match raw_index.parse::<usize>() {
            Ok(index) => Segment::Indexed { key, index, raw_index },
            Err(_) => Segment::Key(raw),
        }
    }
}
