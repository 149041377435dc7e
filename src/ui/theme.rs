use crate::domain::ToolKind;
use ratatui::style::{Color, Modifier, Style};

// One 256-color palette per tool. These three stay fixed across tools.
pub const HELP_GRAY: Color = Color::Indexed(244);
pub const BANNER_YELLOW: Color = Color::Indexed(220);
pub const ERROR_RED: Color = Color::Indexed(203);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Theme {
    pub primary: u8,
    pub dim: u8,
    pub bright: u8,
    pub accent: u8,
    pub cap: u8,
    pub dark_feet: u8,
    pub eye_white: u8,
    pub eye_pupil: u8,
    pub sleep_primary: u8,
    pub sleep_dim: u8,
    pub sleep_cap: u8,
    pub sleep_feet: u8,
    pub sleep_eye: u8,
}

const CLAUDE: Theme = Theme {
    primary: 209,
    dim: 245,
    bright: 216,
    accent: 208,
    cap: 166,
    dark_feet: 130,
    eye_white: 231,
    eye_pupil: 16,
    sleep_primary: 173,
    sleep_dim: 240,
    sleep_cap: 131,
    sleep_feet: 94,
    sleep_eye: 52,
};

const CODEX: Theme = Theme {
    primary: 114,
    dim: 245,
    bright: 157,
    accent: 78,
    cap: 29,
    dark_feet: 22,
    eye_white: 231,
    eye_pupil: 16,
    sleep_primary: 108,
    sleep_dim: 240,
    sleep_cap: 23,
    sleep_feet: 22,
    sleep_eye: 22,
};

const COPILOT: Theme = Theme {
    primary: 141,
    dim: 245,
    bright: 183,
    accent: 135,
    cap: 61,
    dark_feet: 54,
    eye_white: 231,
    eye_pupil: 17,
    sleep_primary: 103,
    sleep_dim: 240,
    sleep_cap: 60,
    sleep_feet: 53,
    sleep_eye: 17,
};

const OPENCODE: Theme = Theme {
    primary: 252,
    dim: 245,
    bright: 255,
    accent: 214,
    cap: 240,
    dark_feet: 236,
    eye_white: 231,
    eye_pupil: 16,
    sleep_primary: 248,
    sleep_dim: 240,
    sleep_cap: 238,
    sleep_feet: 235,
    sleep_eye: 236,
};

impl Theme {
    pub fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Claude => CLAUDE,
            ToolKind::Codex => CODEX,
            ToolKind::Copilot => COPILOT,
            ToolKind::OpenCode => OPENCODE,
        }
    }

    pub fn for_tool(token: &str) -> Self {
        Self::for_kind(ToolKind::resolve(token))
    }

    pub fn fg(color: u8) -> Style {
        Style::default().fg(Color::Indexed(color))
    }

    pub fn border(&self) -> Style {
        Self::fg(self.primary)
    }

    pub fn emblem(&self) -> Style {
        Self::fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Self::fg(self.dim)
    }

    pub fn highlight(&self) -> Style {
        Self::fg(self.bright).add_modifier(Modifier::BOLD)
    }

    pub fn marker(&self) -> Style {
        Self::fg(self.accent)
    }

    pub fn shortcut(&self) -> Style {
        Self::fg(self.primary).add_modifier(Modifier::BOLD)
    }
}

pub fn help_style() -> Style {
    Style::default().fg(HELP_GRAY)
}

pub fn banner_style() -> Style {
    Style::default().fg(BANNER_YELLOW)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR_RED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_uses_the_default_palette() {
        assert_eq!(Theme::for_tool("mystery"), Theme::for_tool("claude"));
        assert_ne!(Theme::for_tool("codex"), Theme::for_tool("claude"));
    }
}
