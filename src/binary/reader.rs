//! Terminator-delimited string reader and the fixed-count extractor built on it.

/// Default string terminator.
pub const NUL: u8 = 0;

/// Strings pulled from one extraction pass, in buffer order.
///
/// Position is meaningful: index `i` always denotes the same field for a given detector.
/// A pass that could not read every string never produces a value of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    strings: Vec<String>,
}

impl ExtractedFields {
    /// Field at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Number of extracted strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.strings
    }
}

impl From<Vec<String>> for ExtractedFields {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}

/// Decode bytes as 7-bit ASCII; bytes above 0x7F become `?`.
#[inline]
fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

/// Read one string starting at `*offset` up to (not including) `terminator`.
///
/// On success `*offset` is moved past the terminator. Returns `None` without touching
/// `*offset` when the offset is at or past the end, or when the buffer ends before a
/// terminator is found.
pub fn read_string(data: &[u8], offset: &mut usize, terminator: u8) -> Option<String> {
    let start = *offset;
    if start >= data.len() {
        return None;
    }
    let len = data[start..].iter().position(|&b| b == terminator)?;
    let text = decode_ascii(&data[start..start + len]);
    *offset = start + len + 1;
    Some(text)
}

/// Read exactly `count` consecutive strings starting at `offset`.
///
/// All-or-nothing: if any read fails the whole pass is `None`, never a shorter list.
pub fn read_strings(
    data: &[u8],
    offset: usize,
    count: usize,
    terminator: u8,
) -> Option<ExtractedFields> {
    let mut pos = offset;
    // Every string takes at least its terminator, so the buffer bounds the reservation.
    let mut strings = Vec::with_capacity(count.min(data.len().saturating_sub(offset)));
    for _ in 0..count {
        strings.push(read_string(data, &mut pos, terminator)?);
    }
    Some(ExtractedFields { strings })
}
