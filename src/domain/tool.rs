pub const DEFAULT_TOOL: &str = "claude";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ToolKind {
    Claude,
    Codex,
    Copilot,
    OpenCode,
}

pub const KNOWN_TOOLS: [ToolKind; 4] = [
    ToolKind::Claude,
    ToolKind::Codex,
    ToolKind::Copilot,
    ToolKind::OpenCode,
];

impl ToolKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "claude" => Some(Self::Claude),
            "codex" => Some(Self::Codex),
            "copilot" => Some(Self::Copilot),
            "opencode" => Some(Self::OpenCode),
            _ => None,
        }
    }

    /// Unknown tokens are themed and drawn as the default tool.
    pub fn resolve(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Self::Claude)
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
            Self::Copilot => "copilot",
            Self::OpenCode => "opencode",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Claude => "Claude Code",
            Self::Codex => "Codex CLI",
            Self::Copilot => "Copilot CLI",
            Self::OpenCode => "OpenCode",
        }
    }
}

pub fn tool_display_name(token: &str) -> String {
    match ToolKind::from_token(token) {
        Some(kind) => kind.label().to_string(),
        None => token.to_string(),
    }
}

/// Splits a comma-separated tool list, normalizing case and dropping blanks
/// and repeats while keeping display order.
pub fn parse_tool_list(raw: &str) -> Vec<String> {
    let mut tools: Vec<String> = Vec::new();
    for token in raw.split(',') {
        let token = token.trim().to_ascii_lowercase();
        if token.is_empty() || tools.contains(&token) {
            continue;
        }
        tools.push(token);
    }
    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tokens_resolve_to_default_but_keep_their_name() {
        assert_eq!(ToolKind::resolve("aider"), ToolKind::Claude);
        assert_eq!(tool_display_name("aider"), "aider");
        assert_eq!(tool_display_name("codex"), "Codex CLI");
    }

    #[test]
    fn tool_list_keeps_order_and_drops_blanks_and_repeats() {
        assert_eq!(
            parse_tool_list(" Codex,claude,,codex , opencode"),
            vec!["codex", "claude", "opencode"]
        );
        assert!(parse_tool_list(" , ").is_empty());
    }

    #[test]
    fn known_tools_round_trip_through_tokens() {
        for kind in KNOWN_TOOLS {
            assert_eq!(ToolKind::from_token(kind.token()), Some(kind));
        }
    }
}
