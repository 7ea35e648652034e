//! Keyboard navigation over the rendered result list.
//!
//! A small finite-state machine: focus is either on the query input or on
//! one of the focusable result links. Arrow keys walk the list and wrap
//! through the input; `/` and `s` jump to the input from anywhere, as long
//! as no other input is active.

/// Where UI focus currently sits. `Input` is the rest state after every
/// render (the `-1` of the focusable list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Result(usize),
}

/// Arrow keys the navigator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
}

/// Host-side receiver for focus changes. Every handled transition reports
/// its target here so the host can move real UI focus.
pub trait FocusSink {
    fn focus_input(&mut self);
    fn focus_result(&mut self, index: usize);
}

/// The focus state machine. Rebuilt (via [`reset`](Self::reset)) on every
/// render; never persisted.
#[derive(Debug)]
pub struct KeyboardNavigator {
    focus: Focus,
    focusable: usize,
}

impl Default for KeyboardNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self {
            focus: Focus::Input,
            focusable: 0,
        }
    }

    /// Adopt a freshly rendered list: focus returns to the input and the
    /// focusable count is replaced.
    pub fn reset(&mut self, focusable: usize) {
        self.focus = Focus::Input;
        self.focusable = focusable;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn focusable(&self) -> usize {
        self.focusable
    }

    /// Handle an arrow key. Returns `true` when the event was consumed and
    /// the host must suppress its default action. With nothing rendered the
    /// event is left alone so the host default (caret movement) applies.
    pub fn handle_arrow(&mut self, key: ArrowKey, sink: &mut impl FocusSink) -> bool {
        if self.focusable == 0 {
            return false;
        }
        let last = self.focusable - 1;

        let next = match (self.focus, key) {
            (Focus::Input, ArrowKey::Down) => Focus::Result(0),
            (Focus::Input, ArrowKey::Up) => Focus::Result(last),
            (Focus::Result(i), ArrowKey::Down) if i < last => Focus::Result(i + 1),
            (Focus::Result(_), ArrowKey::Down) => Focus::Input,
            (Focus::Result(i), ArrowKey::Up) if i > 0 => Focus::Result(i - 1),
            (Focus::Result(_), ArrowKey::Up) => Focus::Input,
        };

        self.apply(next, sink);
        true
    }

    /// Handle a global shortcut key pressed outside the result widget.
    /// `/` and `s` focus the query input unless another input is active.
    pub fn handle_shortcut(
        &mut self,
        key: char,
        input_active: bool,
        sink: &mut impl FocusSink,
    ) -> bool {
        if input_active || !matches!(key, '/' | 's') {
            return false;
        }
        self.apply(Focus::Input, sink);
        true
    }

    fn apply(&mut self, next: Focus, sink: &mut impl FocusSink) {
        self.focus = next;
        match next {
            Focus::Input => sink.focus_input(),
            Focus::Result(index) => sink.focus_result(index),
        }
    }
}
