//! Key bindings for viewer intents.
//!
//! The table is matched case-insensitively: Shift is ignored, every other
//! modifier must match exactly. Anything not in the table resolves to `None`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something the user asked the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Export,
    NextPage,
    PrevPage,
    Refresh,
    TogglePicker,
}

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: char,
    pub modifiers: KeyModifiers,
    pub intent: Intent,
}

const fn bind(key: char, modifiers: KeyModifiers, intent: Intent) -> Binding {
    Binding {
        key,
        modifiers,
        intent,
    }
}

/// The fixed intent table.
pub const BINDINGS: &[Binding] = &[
    bind('e', KeyModifiers::CONTROL, Intent::Export),
    bind('j', KeyModifiers::NONE, Intent::NextPage),
    bind('k', KeyModifiers::NONE, Intent::PrevPage),
    bind('r', KeyModifiers::CONTROL, Intent::Refresh),
    bind('o', KeyModifiers::CONTROL, Intent::TogglePicker),
];

/// Look up the intent bound to `key`, if any.
pub fn resolve(key: &KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    let c = c.to_ascii_lowercase();
    let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);
    BINDINGS
        .iter()
        .find(|binding| binding.key == c && binding.modifiers == modifiers)
        .map(|binding| binding.intent)
}

/// Human-readable label of a binding, e.g. `ctrl+E` or `J`.
pub fn label(binding: &Binding) -> String {
    let key = binding.key.to_ascii_uppercase();
    if binding.modifiers.contains(KeyModifiers::CONTROL) {
        format!("ctrl+{key}")
    } else {
        key.to_string()
    }
}

/// Label of the first binding for `intent`.
pub fn label_for(intent: Intent) -> Option<String> {
    BINDINGS
        .iter()
        .find(|binding| binding.intent == intent)
        .map(label)
}
