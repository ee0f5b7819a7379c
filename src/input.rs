/// Keys the editor reacts to, named after DOM `KeyboardEvent.code` values.
/// [`resolve`] maps them to commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    KeyM,
    KeyC,
    KeyV,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    MetaLeft,
    MetaRight,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Equal,
    Minus,
    NumpadAdd,
    NumpadSubtract,
}

impl Key {
    /// Parse a `KeyboardEvent.code` string; unknown codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "KeyM" => Key::KeyM,
            "KeyC" => Key::KeyC,
            "KeyV" => Key::KeyV,
            "ShiftLeft" => Key::ShiftLeft,
            "ShiftRight" => Key::ShiftRight,
            "ControlLeft" => Key::ControlLeft,
            "ControlRight" => Key::ControlRight,
            "MetaLeft" => Key::MetaLeft,
            "MetaRight" => Key::MetaRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Space" => Key::Space,
            "Enter" => Key::Enter,
            "Equal" => Key::Equal,
            "Minus" => Key::Minus,
            "NumpadAdd" => Key::NumpadAdd,
            "NumpadSubtract" => Key::NumpadSubtract,
            _ => return None,
        };
        Some(key)
    }

    pub fn code(self) -> &'static str {
        match self {
            Key::KeyM => "KeyM",
            Key::KeyC => "KeyC",
            Key::KeyV => "KeyV",
            Key::ShiftLeft => "ShiftLeft",
            Key::ShiftRight => "ShiftRight",
            Key::ControlLeft => "ControlLeft",
            Key::ControlRight => "ControlRight",
            Key::MetaLeft => "MetaLeft",
            Key::MetaRight => "MetaRight",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::Space => "Space",
            Key::Enter => "Enter",
            Key::Equal => "Equal",
            Key::Minus => "Minus",
            Key::NumpadAdd => "NumpadAdd",
            Key::NumpadSubtract => "NumpadSubtract",
        }
    }
}

/// Navigation key pair a direction key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `ArrowUp` / `ArrowRight`
    Increase,
    /// `ArrowDown` / `ArrowLeft`
    Decrease,
}

/// What a key press asks the editor to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CycleMode,
    CycleHighlight,
    MoveHighlight(Direction),
    ToggleSelection,
    Copy,
    Paste,
    Expand,
    Contract,
}

/// Held modifier keys, maintained from key down/up events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    shift_left: bool,
    shift_right: bool,
    control_left: bool,
    control_right: bool,
    meta_left: bool,
    meta_right: bool,
}

impl Modifiers {
    /// Record a modifier transition. Returns `true` if `key` is a modifier.
    pub fn update(&mut self, key: Key, is_down: bool) -> bool {
        let slot = match key {
            Key::ShiftLeft => &mut self.shift_left,
            Key::ShiftRight => &mut self.shift_right,
            Key::ControlLeft => &mut self.control_left,
            Key::ControlRight => &mut self.control_right,
            Key::MetaLeft => &mut self.meta_left,
            Key::MetaRight => &mut self.meta_right,
            _ => return false,
        };
        *slot = is_down;
        true
    }

    /// Whether `key` is a modifier currently held down
    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::ShiftLeft => self.shift_left,
            Key::ShiftRight => self.shift_right,
            Key::ControlLeft => self.control_left,
            Key::ControlRight => self.control_right,
            Key::MetaLeft => self.meta_left,
            Key::MetaRight => self.meta_right,
            _ => false,
        }
    }

    pub fn shift(&self) -> bool {
        self.shift_left || self.shift_right
    }

    /// Control, or Command on macOS keyboards
    pub fn command(&self) -> bool {
        self.control_left || self.control_right || self.meta_left || self.meta_right
    }
}

/// Map a key press (with the modifiers held at that moment) to a command
pub fn resolve(key: Key, modifiers: &Modifiers) -> Option<Command> {
    match key {
        Key::KeyM => Some(Command::CycleMode),
        Key::ShiftLeft | Key::ShiftRight => Some(Command::CycleHighlight),
        Key::ArrowUp | Key::ArrowRight => Some(Command::MoveHighlight(Direction::Increase)),
        Key::ArrowDown | Key::ArrowLeft => Some(Command::MoveHighlight(Direction::Decrease)),
        Key::Space | Key::Enter => Some(Command::ToggleSelection),
        Key::KeyC if modifiers.command() => Some(Command::Copy),
        Key::KeyV if modifiers.command() => Some(Command::Paste),
        Key::Equal | Key::NumpadAdd => Some(Command::Expand),
        Key::Minus | Key::NumpadSubtract => Some(Command::Contract),
        _ => None,
    }
}
