//! Small peer screens that share the main menu's event loop, theme and JSON
//! result channel.

use crate::app::keyboard::translate_key;
use crate::app::line_editor::LineEditor;
use crate::app::{AppCommand, AppEvent, GhostDisplay, Screen, TabTitle, cycle};
use crate::domain::{KNOWN_TOOLS, Project, contains_project_path, default_project_name};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Vertical list movement shared by the pickers.
fn list_motion(key: &KeyEvent, index: usize, len: usize) -> Option<usize> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(step(index, len, false)),
        KeyCode::Down | KeyCode::Char('j') => Some(step(index, len, true)),
        KeyCode::Char(digit @ '1'..='9') => {
            let target = digit as usize - '1' as usize;
            Some(if target < len { target } else { index })
        }
        _ => None,
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ConfirmOutput {
    pub confirmed: bool,
}

#[derive(Clone, Debug)]
pub struct ConfirmModel {
    pub message: String,
    pub ai_tool: String,
    pub yes_focused: bool,
}

impl ConfirmModel {
    pub fn new(message: impl Into<String>, ai_tool: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ai_tool: ai_tool.into(),
            yes_focused: false,
        }
    }
}

impl Screen for ConfirmModel {
    type Output = ConfirmOutput;

    fn update(mut self, event: AppEvent) -> (Self, AppCommand<ConfirmOutput>) {
        let AppEvent::Key(key) = event else {
            return (self, AppCommand::None);
        };
        let key = translate_key(key);
        if is_interrupt(&key) {
            return (self, AppCommand::Exit(ConfirmOutput { confirmed: false }));
        }

        match key.code {
            KeyCode::Char('y' | 'Y') => (self, AppCommand::Exit(ConfirmOutput { confirmed: true })),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                (self, AppCommand::Exit(ConfirmOutput { confirmed: false }))
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.yes_focused = !self.yes_focused;
                (self, AppCommand::None)
            }
            KeyCode::Enter => {
                let confirmed = self.yes_focused;
                (self, AppCommand::Exit(ConfirmOutput { confirmed }))
            }
            _ => (self, AppCommand::None),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SelectProjectOutput {
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SelectProjectModel {
    pub projects: Vec<Project>,
    pub selected: usize,
    pub ai_tool: String,
}

impl SelectProjectModel {
    pub fn new(projects: Vec<Project>, ai_tool: impl Into<String>) -> Self {
        Self {
            projects,
            selected: 0,
            ai_tool: ai_tool.into(),
        }
    }
}

impl Screen for SelectProjectModel {
    type Output = SelectProjectOutput;

    fn update(mut self, event: AppEvent) -> (Self, AppCommand<SelectProjectOutput>) {
        let AppEvent::Key(key) = event else {
            return (self, AppCommand::None);
        };
        let key = translate_key(key);
        let cancelled = SelectProjectOutput {
            selected: false,
            name: None,
            path: None,
        };
        if is_interrupt(&key) || key.code == KeyCode::Esc {
            return (self, AppCommand::Exit(cancelled));
        }

        if let Some(index) = list_motion(&key, self.selected, self.projects.len()) {
            self.selected = index;
            return (self, AppCommand::None);
        }

        if key.code == KeyCode::Enter {
            let output = match self.projects.get(self.selected) {
                Some(project) => SelectProjectOutput {
                    selected: true,
                    name: Some(project.name.clone()),
                    path: Some(project.path.clone()),
                },
                None => cancelled,
            };
            return (self, AppCommand::Exit(output));
        }

        (self, AppCommand::None)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SelectToolOutput {
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_tool: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SelectToolModel {
    pub tools: Vec<String>,
    pub selected: usize,
}

impl SelectToolModel {
    pub fn new(tools: Vec<String>, current: &str) -> Self {
        let selected = tools.iter().position(|tool| tool == current).unwrap_or(0);
        Self { tools, selected }
    }

    /// The highlighted tool themes the screen while browsing.
    pub fn highlighted(&self) -> &str {
        self.tools
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Screen for SelectToolModel {
    type Output = SelectToolOutput;

    fn update(mut self, event: AppEvent) -> (Self, AppCommand<SelectToolOutput>) {
        let AppEvent::Key(key) = event else {
            return (self, AppCommand::None);
        };
        let key = translate_key(key);
        if is_interrupt(&key) || key.code == KeyCode::Esc {
            let output = SelectToolOutput {
                selected: false,
                ai_tool: None,
            };
            return (self, AppCommand::Exit(output));
        }

        if let Some(index) = list_motion(&key, self.selected, self.tools.len()) {
            self.selected = index;
            return (self, AppCommand::None);
        }

        if key.code == KeyCode::Enter && !self.tools.is_empty() {
            let output = SelectToolOutput {
                selected: true,
                ai_tool: Some(self.highlighted().to_string()),
            };
            return (self, AppCommand::Exit(output));
        }

        (self, AppCommand::None)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddProjectField {
    Name,
    Path,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AddProjectOutput {
    pub added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AddProjectModel {
    pub name: LineEditor,
    pub path: LineEditor,
    pub focus: AddProjectField,
    pub existing: Vec<Project>,
    pub error: Option<String>,
    pub ai_tool: String,
}

impl AddProjectModel {
    pub fn new(existing: Vec<Project>, ai_tool: impl Into<String>) -> Self {
        Self {
            name: LineEditor::new(),
            path: LineEditor::new(),
            focus: AddProjectField::Name,
            existing,
            error: None,
            ai_tool: ai_tool.into(),
        }
    }

    fn focused_editor(&mut self) -> &mut LineEditor {
        match self.focus {
            AddProjectField::Name => &mut self.name,
            AddProjectField::Path => &mut self.path,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AddProjectField::Name => AddProjectField::Path,
            AddProjectField::Path => AddProjectField::Name,
        };
    }

    fn submit(mut self) -> (Self, AppCommand<AddProjectOutput>) {
        let path = self.path.value().to_string();
        if path.is_empty() {
            self.error = Some("Enter a path for the project.".to_string());
            self.focus = AddProjectField::Path;
            return (self, AppCommand::None);
        }
        if contains_project_path(&self.existing, &path) {
            self.error = Some("That path is already in the project list.".to_string());
            self.focus = AddProjectField::Path;
            return (self, AppCommand::None);
        }

        let name = match self.name.value() {
            "" => default_project_name(&path),
            name => name.to_string(),
        };
        let output = AddProjectOutput {
            added: true,
            name: Some(name),
            path: Some(path),
        };
        (self, AppCommand::Exit(output))
    }
}

impl Screen for AddProjectModel {
    type Output = AddProjectOutput;

    fn update(mut self, event: AppEvent) -> (Self, AppCommand<AddProjectOutput>) {
        let key = match event {
            AppEvent::Key(key) => key,
            AppEvent::Paste(text) => {
                self.focused_editor().insert_str(&text);
                self.error = None;
                return (self, AppCommand::None);
            }
            AppEvent::Resize { .. } | AppEvent::Tick => return (self, AppCommand::None),
        };
        // Field text is typed as-is: no layout translation here.
        if is_interrupt(&key) || key.code == KeyCode::Esc {
            let output = AddProjectOutput {
                added: false,
                name: None,
                path: None,
            };
            return (self, AppCommand::Exit(output));
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                (self, AppCommand::None)
            }
            KeyCode::Enter => match self.focus {
                AddProjectField::Name => {
                    self.focus = AddProjectField::Path;
                    (self, AppCommand::None)
                }
                AddProjectField::Path => self.submit(),
            },
            _ => {
                if self.focused_editor().handle_key(key) {
                    self.error = None;
                }
                (self, AppCommand::None)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SettingsRow {
    GhostDisplay,
    TabTitle,
}

pub const SETTINGS_ROWS: [SettingsRow; 2] = [SettingsRow::GhostDisplay, SettingsRow::TabTitle];

impl SettingsRow {
    pub fn label(self) -> &'static str {
        match self {
            Self::GhostDisplay => "Ghost display",
            Self::TabTitle => "Tab title",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SettingsOutput {
    pub saved: bool,
    pub ghost_display: GhostDisplay,
    pub tab_title: TabTitle,
}

#[derive(Clone, Debug)]
pub struct SettingsModel {
    pub ghost_display: GhostDisplay,
    pub tab_title: TabTitle,
    pub initial: (GhostDisplay, TabTitle),
    pub selected_row: usize,
    pub ai_tool: String,
}

impl SettingsModel {
    pub fn new(ghost_display: GhostDisplay, tab_title: TabTitle, ai_tool: impl Into<String>) -> Self {
        Self {
            ghost_display,
            tab_title,
            initial: (ghost_display, tab_title),
            selected_row: 0,
            ai_tool: ai_tool.into(),
        }
    }

    pub fn value_label(&self, row: SettingsRow) -> &'static str {
        match row {
            SettingsRow::GhostDisplay => self.ghost_display.label(),
            SettingsRow::TabTitle => self.tab_title.label(),
        }
    }

    fn cycle_selected(&mut self, forward: bool) {
        match SETTINGS_ROWS[self.selected_row % SETTINGS_ROWS.len()] {
            SettingsRow::GhostDisplay => {
                self.ghost_display = cycle(&GhostDisplay::ALL, self.ghost_display, forward);
            }
            SettingsRow::TabTitle => {
                self.tab_title = cycle(&TabTitle::ALL, self.tab_title, forward);
            }
        }
    }
}

impl Screen for SettingsModel {
    type Output = SettingsOutput;

    fn update(mut self, event: AppEvent) -> (Self, AppCommand<SettingsOutput>) {
        let AppEvent::Key(key) = event else {
            return (self, AppCommand::None);
        };
        let key = translate_key(key);
        if is_interrupt(&key) || key.code == KeyCode::Esc {
            let (ghost_display, tab_title) = self.initial;
            let output = SettingsOutput {
                saved: false,
                ghost_display,
                tab_title,
            };
            return (self, AppCommand::Exit(output));
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = step(self.selected_row, SETTINGS_ROWS.len(), false);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row = step(self.selected_row, SETTINGS_ROWS.len(), true);
            }
            KeyCode::Left => self.cycle_selected(false),
            KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => self.cycle_selected(true),
            KeyCode::Char('s' | 'S') => {
                let output = SettingsOutput {
                    saved: true,
                    ghost_display: self.ghost_display,
                    tab_title: self.tab_title,
                };
                return (self, AppCommand::Exit(output));
            }
            _ => {}
        }
        (self, AppCommand::None)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolOption {
    pub token: String,
    pub checked: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MultiSelectToolOutput {
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct MultiSelectToolModel {
    pub options: Vec<ToolOption>,
    pub cursor: usize,
    pub error: Option<String>,
    pub ai_tool: String,
}

impl MultiSelectToolModel {
    /// Lists the known tools in fixed order, then any other pre-checked
    /// tokens, with `checked` tools ticked.
    pub fn new(checked: &[String], ai_tool: impl Into<String>) -> Self {
        let mut options: Vec<ToolOption> = KNOWN_TOOLS
            .iter()
            .map(|kind| ToolOption {
                token: kind.token().to_string(),
                checked: checked.iter().any(|token| token == kind.token()),
            })
            .collect();
        for token in checked {
            if !options.iter().any(|option| &option.token == token) {
                options.push(ToolOption {
                    token: token.clone(),
                    checked: true,
                });
            }
        }
        Self {
            options,
            cursor: 0,
            error: None,
            ai_tool: ai_tool.into(),
        }
    }

    pub fn checked_tools(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.token.clone())
            .collect()
    }
}

impl Screen for MultiSelectToolModel {
    type Output = MultiSelectToolOutput;

    fn update(mut self, event: AppEvent) -> (Self, AppCommand<MultiSelectToolOutput>) {
        let AppEvent::Key(key) = event else {
            return (self, AppCommand::None);
        };
        let key = translate_key(key);
        if is_interrupt(&key) || key.code == KeyCode::Esc {
            let output = MultiSelectToolOutput {
                confirmed: false,
                tools: None,
            };
            return (self, AppCommand::Exit(output));
        }

        if let Some(index) = list_motion(&key, self.cursor, self.options.len()) {
            self.cursor = index;
            return (self, AppCommand::None);
        }

        match key.code {
            KeyCode::Char(' ') => {
                if let Some(option) = self.options.get_mut(self.cursor) {
                    option.checked = !option.checked;
                    self.error = None;
                }
                (self, AppCommand::None)
            }
            KeyCode::Enter => {
                let tools = self.checked_tools();
                if tools.is_empty() {
                    self.error = Some("Select at least one AI tool.".to_string());
                    return (self, AppCommand::None);
                }
                let output = MultiSelectToolOutput {
                    confirmed: true,
                    tools: Some(tools),
                };
                (self, AppCommand::Exit(output))
            }
            _ => (self, AppCommand::None),
        }
    }
}
