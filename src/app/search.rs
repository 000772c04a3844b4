//! Search mode state for parsec.
//!
//! While search mode is active, printable keys build up a query which fuzzy filters the
//! listing. Leaving with Enter keeps the filter, leaving with Esc drops it.

#[derive(Default, Debug)]
pub struct SearchState {
    active: bool,
    query: String,
}

impl SearchState {
    // Getters / Accessors

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    // Transitions

    /// Enters search mode with an empty query.
    pub fn enter(&mut self) {
        self.active = true;
        self.query.clear();
    }

    /// Appends a character to the query. Only printable ASCII is accepted.
    /// Returns `true` if the query changed.
    pub fn push(&mut self, c: char) -> bool {
        if !(' '..='~').contains(&c) {
            return false;
        }
        self.query.push(c);
        true
    }

    /// Removes the last character. Returns `true` if the query changed.
    pub fn backspace(&mut self) -> bool {
        self.query.pop().is_some()
    }

    /// Leaves search mode and keeps the query, so the filter stays applied.
    pub fn confirm(&mut self) {
        self.active = false;
    }

    /// Leaves search mode and discards the query.
    pub fn cancel(&mut self) {
        self.active = false;
        self.query.clear();
    }
}
