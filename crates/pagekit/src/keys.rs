//! Keyboard input helpers.

/// WebDriver special keys (Unicode private-use code points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Return
    Return,
    /// Enter
    Enter,
    /// Shift
    Shift,
    /// Control
    Control,
    /// Alt
    Alt,
    /// Escape
    Escape,
    /// Space
    Space,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// End
    End,
    /// Home
    Home,
    /// Left arrow
    ArrowLeft,
    /// Up arrow
    ArrowUp,
    /// Right arrow
    ArrowRight,
    /// Down arrow
    ArrowDown,
    /// Delete
    Delete,
}

impl Key {
    /// The key as a string the driver understands
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backspace => "\u{E003}",
            Self::Tab => "\u{E004}",
            Self::Return => "\u{E006}",
            Self::Enter => "\u{E007}",
            Self::Shift => "\u{E008}",
            Self::Control => "\u{E009}",
            Self::Alt => "\u{E00A}",
            Self::Escape => "\u{E00C}",
            Self::Space => "\u{E00D}",
            Self::PageUp => "\u{E00E}",
            Self::PageDown => "\u{E00F}",
            Self::End => "\u{E010}",
            Self::Home => "\u{E011}",
            Self::ArrowLeft => "\u{E012}",
            Self::ArrowUp => "\u{E013}",
            Self::ArrowRight => "\u{E014}",
            Self::ArrowDown => "\u{E015}",
            Self::Delete => "\u{E017}",
        }
    }

    /// This key pressed `count` times
    #[must_use]
    pub fn times(self, count: usize) -> String {
        repeat(self.as_str(), count)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `keys` concatenated `count` times; `count == 0` gives an empty string.
#[must_use]
pub fn repeat(keys: &str, count: usize) -> String {
    keys.repeat(count)
}
