//! Line cursor shared by the format parsers.
//!
//! Prompts have no closing delimiter: template text runs "until the next
//! header marker". The cursor makes that boundary rule a named operation
//! instead of index arithmetic spread across the parsers.

/// A forward-only cursor over the lines of a prompt file.
pub(super) struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            lines: raw.split('\n').collect(),
            pos: 0,
        }
    }

    /// The line under the cursor, or `None` past the end of input.
    pub fn current(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Collects lines starting at the cursor until `is_boundary` matches or
    /// the input ends. The cursor is left ON the boundary line so the outer
    /// scan loop can process it as the next header.
    pub fn collect_until(&mut self, is_boundary: impl Fn(&str) -> bool) -> Vec<&'a str> {
        let mut collected = Vec::new();
        while let Some(line) = self.current() {
            if is_boundary(line) {
                break;
            }
            collected.push(line);
            self.advance();
        }
        collected
    }
}
