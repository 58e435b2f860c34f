use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Save,
    Update,
    Delete,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Accent,
    Danger,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub action: Action,
    pub label: &'static str,
    /// Ctrl+<hotkey> presses the button from anywhere in the form
    pub hotkey: char,
    pub style: ButtonStyle,
}

/// The action bar every tab gets, left to right.
pub const ACTION_BAR: [Button; 4] = [
    Button {
        action: Action::Save,
        label: "Save",
        hotkey: 's',
        style: ButtonStyle::Accent,
    },
    Button {
        action: Action::Update,
        label: "Update",
        hotkey: 'u',
        style: ButtonStyle::Accent,
    },
    Button {
        action: Action::Delete,
        label: "Delete",
        hotkey: 'd',
        style: ButtonStyle::Danger,
    },
    Button {
        action: Action::Clear,
        label: "Clear",
        hotkey: 'l',
        style: ButtonStyle::Muted,
    },
];

/// Button whose Ctrl+hotkey matches `key`, if any.
pub fn hotkey_action(key: &KeyEvent) -> Option<Action> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    ACTION_BAR
        .iter()
        .find(|b| b.hotkey == c.to_ascii_lowercase())
        .map(|b| b.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_has_one_button_per_action() {
        let actions: Vec<_> = ACTION_BAR.iter().map(|b| b.action).collect();
        assert_eq!(
            actions,
            vec![Action::Save, Action::Update, Action::Delete, Action::Clear]
        );
    }

    #[test]
    fn hotkeys_need_control() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let plain_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(hotkey_action(&ctrl_d), Some(Action::Delete));
        assert_eq!(hotkey_action(&plain_d), None);
        assert_eq!(
            hotkey_action(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }
}
