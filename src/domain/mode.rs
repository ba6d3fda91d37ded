use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// How text sent to the host is interpreted.
///
/// State transitions happen only through an explicit toggle:
/// - Control -> Type
/// - Type -> Control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Mode {
    /// Text is a semantic command for the host ("open chrome").
    #[default]
    Control = 0,
    /// Text is typed verbatim into the host's active window.
    Type = 1,
}

/// Presentation and routing attributes of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    pub label: &'static str,
    pub input_hint: &'static str,
    pub action_label: &'static str,
    pub voice_prompt: &'static str,
}

const PROFILES: [ModeProfile; 2] = [
    ModeProfile {
        label: "Control PC",
        input_hint: "Command (e.g., 'open chrome')...",
        action_label: "SEND",
        voice_prompt: "Speak command...",
    },
    ModeProfile {
        label: "Type on PC",
        input_hint: "Text to type on PC...",
        action_label: "TYPE",
        voice_prompt: "Speak to type...",
    },
];

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Control => Mode::Type,
            Mode::Type => Mode::Control,
        }
    }

    pub fn profile(self) -> &'static ModeProfile {
        &PROFILES[self as usize]
    }
}

impl From<u8> for Mode {
    fn from(value: u8) -> Self {
        match value {
            1 => Mode::Type,
            _ => Mode::Control,
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode as u8
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Control => write!(f, "control"),
            Mode::Type => write!(f, "type"),
        }
    }
}

/// Atomic mode cell shared between the hosting layer and running checks.
///
/// The hosting layer is the only writer; any task may read.
#[derive(Debug)]
pub struct ModeState(AtomicU8);

impl ModeState {
    pub fn new(mode: Mode) -> Self {
        Self(AtomicU8::new(mode.into()))
    }

    pub fn current(&self) -> Mode {
        self.0.load(Ordering::Acquire).into()
    }

    /// Flip the mode and return the new one.
    pub fn toggle(&self) -> Mode {
        let previous = self.0.fetch_xor(1, Ordering::AcqRel);
        Mode::from(previous).toggled()
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new(Mode::Control)
    }
}
