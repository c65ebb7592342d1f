// ---------------------------------------------------------------------------
// IdGenerator
// ---------------------------------------------------------------------------

/// Width of the zero-padded numeric suffix: `P0001`.
pub const ID_WIDTH: usize = 4;

/// Sequential identifier source for one entity kind.
///
/// Each registry owns its own generators, so two registries both start at
/// `<prefix>0001`. Counters past 9999 keep growing in width (`P10000`).
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: char,
    next: u32,
}

impl IdGenerator {
    pub fn new(prefix: char) -> Self {
        Self { prefix, next: 1 }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// The identifier the next call to [`IdGenerator::next_id`] will return.
    pub fn peek(&self) -> String {
        format_id(self.prefix, self.next)
    }

    pub fn next_id(&mut self) -> String {
        let id = format_id(self.prefix, self.next);
        self.next += 1;
        id
    }
}

pub fn format_id(prefix: char, n: u32) -> String {
    format!("{prefix}{n:0width$}", width = ID_WIDTH)
}

/// Numeric suffix of an identifier produced by [`format_id`].
pub fn id_number(id: &str) -> Option<u32> {
    let mut chars = id.chars();
    chars.next()?;
    chars.as_str().parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
