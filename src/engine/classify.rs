//! Classification of rendered lines. Derived from the text only; nothing is stored.

/// Lowercase marker for the 200 OK sink.
pub const SUCCESS_MARKER: &str = "200 ok";
/// Lowercase marker excluded from the non-404 sink.
pub const NOT_FOUND_MARKER: &str = "404 not found";

/// Sink membership of one rendered line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub is_success: bool,
    pub is_excluded_not_found: bool,
}

impl Classification {
    pub fn of(line: &str) -> Self {
        let lower = line.to_lowercase();
        Self {
            is_success: lower.contains(SUCCESS_MARKER),
            is_excluded_not_found: lower.contains(NOT_FOUND_MARKER),
        }
    }

    /// Goes to the ex-404 sink: everything that is not a 404, errors included.
    pub fn in_ex404(&self) -> bool {
        !self.is_excluded_not_found
    }
}

pub fn is_success(line: &str) -> bool {
    Classification::of(line).is_success
}

pub fn is_excluded_not_found(line: &str) -> bool {
    Classification::of(line).is_excluded_not_found
}
