use crate::domain::Project;
use serde::Serialize;

/// Fixed menu entries listed after the projects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionItem {
    AddProject,
    DeleteProject,
    OpenOnce,
    PlainTerminal,
}

pub const ACTION_ITEMS: [ActionItem; 4] = [
    ActionItem::AddProject,
    ActionItem::DeleteProject,
    ActionItem::OpenOnce,
    ActionItem::PlainTerminal,
];

impl ActionItem {
    pub fn token(self) -> &'static str {
        match self {
            Self::AddProject => "add-project",
            Self::DeleteProject => "delete-project",
            Self::OpenOnce => "open-once",
            Self::PlainTerminal => "plain-terminal",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::AddProject => 'A',
            Self::DeleteProject => 'D',
            Self::OpenOnce => 'O',
            Self::PlainTerminal => 'P',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddProject => "Add new project",
            Self::DeleteProject => "Delete a project",
            Self::OpenOnce => "Open once",
            Self::PlainTerminal => "Plain terminal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AddProject => "Save a directory to the project list",
            Self::DeleteProject => "Remove a project from the list",
            Self::OpenOnce => "Open a directory without saving it",
            Self::PlainTerminal => "Open a shell without an AI tool",
        }
    }

    pub fn menu_action(self) -> MenuAction {
        match self {
            Self::AddProject => MenuAction::AddProject,
            Self::DeleteProject => MenuAction::DeleteProject,
            Self::OpenOnce => MenuAction::OpenOnce,
            Self::PlainTerminal => MenuAction::PlainTerminal,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum MenuAction {
    SelectProject { name: String, path: String },
    AddProject,
    DeleteProject,
    OpenOnce,
    PlainTerminal,
    Settings,
    Quit,
}

impl MenuAction {
    pub fn select(project: &Project) -> Self {
        Self::SelectProject {
            name: project.name.clone(),
            path: project.path.clone(),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::SelectProject { .. } => "select-project",
            Self::AddProject => ActionItem::AddProject.token(),
            Self::DeleteProject => ActionItem::DeleteProject.token(),
            Self::OpenOnce => ActionItem::OpenOnce.token(),
            Self::PlainTerminal => ActionItem::PlainTerminal.token(),
            Self::Settings => "settings",
            Self::Quit => "quit",
        }
    }
}

/// The document handed back to the wrapper: the action fields followed by
/// the tool selected at exit time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MenuResult {
    #[serde(flatten)]
    pub action: MenuAction,
    pub ai_tool: String,
}

impl MenuResult {
    pub fn new(action: MenuAction, ai_tool: impl Into<String>) -> Self {
        Self {
            action,
            ai_tool: ai_tool.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_project_serializes_flat_in_field_order() {
        let result = MenuResult::new(
            MenuAction::select(&Project::new("beta", "/p/b")),
            "claude",
        );
        let json = serde_json::to_string(&result).expect("json");
        assert_eq!(
            json,
            r#"{"action":"select-project","name":"beta","path":"/p/b","ai_tool":"claude"}"#
        );
    }

    #[test]
    fn payloadless_actions_carry_only_the_tool() {
        let cases = [
            (MenuAction::AddProject, "add-project"),
            (MenuAction::DeleteProject, "delete-project"),
            (MenuAction::OpenOnce, "open-once"),
            (MenuAction::PlainTerminal, "plain-terminal"),
            (MenuAction::Settings, "settings"),
            (MenuAction::Quit, "quit"),
        ];
        for (action, tag) in cases {
            assert_eq!(action.token(), tag);
            let json = serde_json::to_string(&MenuResult::new(action, "codex")).expect("json");
            assert_eq!(json, format!(r#"{{"action":"{tag}","ai_tool":"codex"}}"#));
        }
    }
}
