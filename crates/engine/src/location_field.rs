//! City/state search-and-select field.
//!
//! The field keeps a draft query separate from the committed value it was
//! given by its owner. Every user interaction is one explicit transition on
//! [`LocationFieldState`], and the owner learns about commits through the
//! returned [`FieldOutcome`] instead of a callback.
//!
//! Key behaviors:
//! - Matches are recomputed only when the draft changes; the highlight resets
//!   with every recompute.
//! - A draft whose search term is shorter than [`MIN_QUERY_CHARS`] never has
//!   matches and the open panel asks the user to type more.
//! - Clearing the draft commits the empty value immediately.
//! - A new committed value from the owner arrives through
//!   [`LocationFieldState::external_value_changed`], which resynchronizes the
//!   draft without reporting a commit back.

use tracing::debug;
use visadesk_registry::{DEFAULT_RESULT_LIMIT, LocationRegistry};
use visadesk_types::Location;

/// Minimum search-term length, in characters, before results are computed.
pub const MIN_QUERY_CHARS: usize = 2;

/// Navigation keys the field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// What the owner has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldOutcome {
    #[default]
    None,
    /// The committed value changed to the carried label (possibly empty).
    Commit(String),
}

/// The three mutually exclusive states of an open results panel, plus closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel<'a> {
    Closed,
    /// Search term shorter than [`MIN_QUERY_CHARS`]
    TypeMore,
    /// Search term long enough but nothing matched
    NoResults,
    Results(&'a [Location]),
}

#[derive(Debug, Clone)]
pub struct LocationFieldState {
    registry: LocationRegistry,
    result_limit: usize,
    /// Draft text typed by the user
    query: String,
    /// Last value committed by or to the owner
    committed: String,
    is_open: bool,
    focused: bool,
    matches: Vec<Location>,
    /// Index into `matches`; `None` when nothing is highlighted
    highlight: Option<usize>,
}

impl LocationFieldState {
    /// Mounts a field showing `committed` as its draft.
    pub fn new(registry: LocationRegistry, committed: impl Into<String>) -> Self {
        let committed = committed.into();
        let mut state = Self {
            registry,
            result_limit: DEFAULT_RESULT_LIMIT,
            query: committed.clone(),
            committed,
            is_open: false,
            focused: false,
            matches: Vec::new(),
            highlight: None,
        };
        state.recompute_matches();
        state
    }

    /// Caps the number of results; values below one are raised to one.
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit.max(1);
        self.recompute_matches();
        self
    }

    // ===== SELECTORS =====

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn matches(&self) -> &[Location] {
        &self.matches
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<&Location> {
        self.highlight.and_then(|index| self.matches.get(index))
    }

    /// Portion of the draft that is searched: everything before the first comma.
    pub fn search_term(&self) -> &str {
        search_term(&self.query)
    }

    pub fn panel(&self) -> Panel<'_> {
        if !self.is_open {
            Panel::Closed
        } else if !meets_minimum(self.search_term()) {
            Panel::TypeMore
        } else if self.matches.is_empty() {
            Panel::NoResults
        } else {
            Panel::Results(&self.matches)
        }
    }

    // ===== TRANSITIONS =====

    /// Replaces the draft with `text`. Typing always reopens the panel.
    pub fn input_changed(&mut self, text: impl Into<String>) -> FieldOutcome {
        self.query = text.into();
        self.focused = true;
        self.is_open = true;
        self.recompute_matches();
        if self.query.is_empty() {
            self.committed.clear();
            return FieldOutcome::Commit(String::new());
        }
        FieldOutcome::None
    }

    /// Appends a character to the draft.
    pub fn insert_char(&mut self, c: char) -> FieldOutcome {
        let mut next = self.query.clone();
        next.push(c);
        self.input_changed(next)
    }

    /// Removes the last character of the draft.
    pub fn backspace(&mut self) -> FieldOutcome {
        let mut next = self.query.clone();
        if next.pop().is_none() {
            return FieldOutcome::None;
        }
        self.input_changed(next)
    }

    /// Clears the draft, which also clears the committed value.
    pub fn clear(&mut self) -> FieldOutcome {
        self.input_changed(String::new())
    }

    pub fn focus(&mut self) {
        self.focused = true;
        if meets_minimum(self.search_term()) {
            self.is_open = true;
        }
    }

    pub fn key(&mut self, key: FieldKey) -> FieldOutcome {
        match key {
            FieldKey::Down | FieldKey::Enter if !self.is_open => {
                self.is_open = true;
                FieldOutcome::None
            }
            FieldKey::Down => {
                self.highlight_next();
                FieldOutcome::None
            }
            FieldKey::Up => {
                if self.is_open {
                    self.highlight_previous();
                }
                FieldOutcome::None
            }
            FieldKey::Enter => match self.highlight {
                Some(index) => self.select(index),
                None => FieldOutcome::None,
            },
            FieldKey::Escape => {
                self.is_open = false;
                self.highlight = None;
                self.focused = false;
                FieldOutcome::None
            }
        }
    }

    /// Highlights the match under the pointer; out-of-range indices are ignored.
    pub fn hover(&mut self, index: usize) {
        if index < self.matches.len() {
            self.highlight = Some(index);
        }
    }

    /// Commits the match at `index` (pointer click or Enter).
    pub fn select(&mut self, index: usize) -> FieldOutcome {
        let Some(location) = self.matches.get(index) else {
            return FieldOutcome::None;
        };
        let label = location.label();
        debug!(label = %label, "location selected");
        self.query = label.clone();
        self.committed = label.clone();
        self.recompute_matches();
        self.is_open = false;
        FieldOutcome::Commit(label)
    }

    /// A pointer press landed outside the field's bounds.
    pub fn click_outside(&mut self) {
        self.is_open = false;
        self.focused = false;
    }

    /// The owner supplied a new committed value; the draft follows it.
    pub fn external_value_changed(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value == self.committed && value == self.query {
            return;
        }
        self.committed = value.clone();
        self.query = value;
        self.is_open = false;
        self.recompute_matches();
    }

    fn highlight_next(&mut self) {
        let len = self.matches.len();
        if len == 0 {
            return;
        }
        self.highlight = Some(match self.highlight {
            None => 0,
            Some(index) => (index + 1) % len,
        });
    }

    fn highlight_previous(&mut self) {
        let len = self.matches.len();
        if len == 0 {
            return;
        }
        self.highlight = Some(match self.highlight {
            None => len - 1,
            Some(index) => (index + len - 1) % len,
        });
    }

    fn recompute_matches(&mut self) {
        self.matches = lookup_locations(&self.registry, &self.query, self.result_limit).unwrap_or_default();
        self.highlight = None;
    }
}

/// Runs the field's matching rule on a raw query outside any widget.
///
/// Returns `None` when the search term is shorter than [`MIN_QUERY_CHARS`].
pub fn lookup_locations(registry: &LocationRegistry, query: &str, limit: usize) -> Option<Vec<Location>> {
    let term = search_term(query);
    meets_minimum(term).then(|| registry.search(term, limit))
}

fn search_term(query: &str) -> &str {
    query.split(',').next().unwrap_or_default().trim()
}

fn meets_minimum(term: &str) -> bool {
    term.chars().count() >= MIN_QUERY_CHARS
}
