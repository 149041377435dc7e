//! Dialog views for the peer screens. They reuse the main menu's box so every
//! screen of the launcher looks the same.

use crate::app::{
    AddProjectField, AddProjectModel, ConfirmModel, LineEditor, MultiSelectToolModel,
    SETTINGS_ROWS, SelectProjectModel, SelectToolModel, SettingsModel,
};
use crate::domain::tool_display_name;
use crate::ui::layout::MENU_INNER_WIDTH;
use crate::ui::menu::{boxed, item_prefix, rule, truncate_end, truncate_start};
use crate::ui::theme::{Theme, error_style, help_style};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const FIELD_INDENT: usize = 3;
const FIELD_WIDTH: usize = MENU_INNER_WIDTH - FIELD_INDENT - 1;

/// A composed dialog. `cursor` is the text cursor as (column, row) relative
/// to the dialog's top-left corner.
#[derive(Clone, Debug, Default)]
pub struct Dialog {
    pub lines: Vec<Line<'static>>,
    pub cursor: Option<(u16, u16)>,
}

struct DialogFrame<'a> {
    theme: Theme,
    title: &'a str,
    tool: &'a str,
    help: &'a str,
}

impl DialogFrame<'_> {
    /// Wraps body rows in the border, title and help rows. Returns the lines
    /// and the index of the first body row.
    fn wrap(&self, body: Vec<Vec<Span<'static>>>) -> (Vec<Line<'static>>, usize) {
        let theme = &self.theme;
        let name = truncate_end(&tool_display_name(self.tool), MENU_INNER_WIDTH / 2);
        let title = truncate_end(self.title, MENU_INNER_WIDTH - 3 - name.width());
        let gap = MENU_INNER_WIDTH.saturating_sub(2 + title.width() + name.width());

        let mut lines = vec![
            rule('┌', '┐', theme),
            boxed(
                theme,
                vec![
                    Span::raw(" "),
                    Span::styled(title, theme.emblem()),
                    Span::raw(" ".repeat(gap)),
                    Span::styled(name, theme.highlight()),
                    Span::raw(" "),
                ],
            ),
            rule('├', '┤', theme),
            boxed(theme, Vec::new()),
        ];
        let body_start = lines.len();
        lines.extend(body.into_iter().map(|row| boxed(theme, row)));
        lines.push(boxed(theme, Vec::new()));
        lines.push(rule('├', '┤', theme));
        lines.push(boxed(
            theme,
            vec![Span::raw(" "), Span::styled(self.help.to_string(), help_style())],
        ));
        lines.push(rule('└', '┘', theme));
        (lines, body_start)
    }
}

pub fn compose_confirm(model: &ConfirmModel) -> Dialog {
    let theme = Theme::for_tool(&model.ai_tool);
    let mut body: Vec<Vec<Span<'static>>> = wrap_words(&model.message, MENU_INNER_WIDTH - 2)
        .into_iter()
        .map(|row| vec![Span::raw(" "), Span::raw(row)])
        .collect();
    body.push(Vec::new());
    body.push(vec![
        Span::raw(" ".repeat(FIELD_INDENT)),
        button("Yes", model.yes_focused, &theme),
        Span::raw("   "),
        button("No", !model.yes_focused, &theme),
    ]);

    let frame = DialogFrame {
        theme,
        title: "Confirm",
        tool: &model.ai_tool,
        help: "←→ choose Y/N answer ⏎ confirm",
    };
    Dialog {
        lines: frame.wrap(body).0,
        cursor: None,
    }
}

fn button(label: &str, focused: bool, theme: &Theme) -> Span<'static> {
    let style = if focused {
        theme.highlight()
    } else {
        theme.muted()
    };
    Span::styled(format!("[ {label} ]"), style)
}

pub fn compose_select_project(model: &SelectProjectModel) -> Dialog {
    let theme = Theme::for_tool(&model.ai_tool);
    let mut body: Vec<Vec<Span<'static>>> = Vec::new();
    if model.projects.is_empty() {
        body.push(vec![
            Span::raw(" ".repeat(FIELD_INDENT)),
            Span::styled("No projects saved yet.", theme.muted()),
        ]);
    }
    for (index, project) in model.projects.iter().enumerate() {
        let selected = index == model.selected;
        let ordinal = (index + 1).to_string();
        let room = MENU_INNER_WIDTH.saturating_sub(4 + ordinal.width() + 3);
        let style = if selected { theme.highlight() } else { Style::default() };

        let mut row = item_prefix(&theme, selected, 4);
        row.push(Span::styled(ordinal, if selected { style } else { theme.muted() }));
        row.push(Span::raw("  "));
        row.push(Span::styled(truncate_end(&project.name, room), style));
        body.push(row);

        let mut path = item_prefix(&theme, selected, 7);
        path.push(Span::styled(
            truncate_start(&project.path, MENU_INNER_WIDTH - 8),
            theme.muted(),
        ));
        body.push(path);
    }

    let frame = DialogFrame {
        theme,
        title: "Select project",
        tool: &model.ai_tool,
        help: "↑↓ navigate ⏎ select Esc cancel",
    };
    Dialog {
        lines: frame.wrap(body).0,
        cursor: None,
    }
}

pub fn compose_select_tool(model: &SelectToolModel) -> Dialog {
    let theme = Theme::for_tool(model.highlighted());
    let body = model
        .tools
        .iter()
        .enumerate()
        .map(|(index, tool)| {
            let selected = index == model.selected;
            let mut row = item_prefix(&theme, selected, 4);
            let (ordinal_style, name_style) = if selected {
                (theme.highlight(), theme.highlight())
            } else {
                (theme.muted(), Style::default())
            };
            row.push(Span::styled((index + 1).to_string(), ordinal_style));
            row.push(Span::raw("  "));
            row.push(Span::styled(
                truncate_end(&tool_display_name(tool), MENU_INNER_WIDTH - 9),
                name_style,
            ));
            row
        })
        .collect();

    let frame = DialogFrame {
        theme,
        title: "Select AI tool",
        tool: model.highlighted(),
        help: "↑↓ navigate ⏎ select Esc cancel",
    };
    Dialog {
        lines: frame.wrap(body).0,
        cursor: None,
    }
}

pub fn compose_add_project(model: &AddProjectModel) -> Dialog {
    let theme = Theme::for_tool(&model.ai_tool);
    let mut body: Vec<Vec<Span<'static>>> = Vec::new();
    let mut cursor: Option<(usize, usize)> = None;

    for (field, label, placeholder, editor) in [
        (
            AddProjectField::Name,
            "Name",
            "defaults to the folder name",
            &model.name,
        ),
        (
            AddProjectField::Path,
            "Path",
            "~/code/my-project",
            &model.path,
        ),
    ] {
        let focused = model.focus == field;
        let label_style = if focused {
            theme.highlight()
        } else {
            theme.muted()
        };
        body.push(vec![Span::raw(" "), Span::styled(label, label_style)]);

        let (visible, cursor_x) = field_window(editor, FIELD_WIDTH);
        let mut row = vec![Span::raw(" ".repeat(FIELD_INDENT))];
        if editor.text.is_empty() {
            row.push(Span::styled(placeholder, theme.muted()));
        } else {
            row.push(Span::raw(visible));
        }
        if focused {
            cursor = Some((1 + FIELD_INDENT + cursor_x, body.len()));
        }
        body.push(row);
        body.push(Vec::new());
    }
    if let Some(error) = &model.error {
        body.push(vec![
            Span::raw(" "),
            Span::styled(truncate_end(error, MENU_INNER_WIDTH - 2), error_style()),
        ]);
    }

    let frame = DialogFrame {
        theme,
        title: "Add project",
        tool: &model.ai_tool,
        help: "Tab switch field ⏎ next/save Esc cancel",
    };
    let (lines, body_start) = frame.wrap(body);
    Dialog {
        lines,
        cursor: cursor.map(|(x, row)| (to_u16(x), to_u16(body_start + row))),
    }
}

pub fn compose_settings(model: &SettingsModel) -> Dialog {
    let theme = Theme::for_tool(&model.ai_tool);
    let body = SETTINGS_ROWS
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let selected = index == model.selected_row;
            let mut spans = item_prefix(&theme, selected, 4);
            let label_style = if selected {
                theme.highlight()
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("{:<16}", row.label()), label_style));
            spans.push(Span::styled("‹ ", theme.marker()));
            spans.push(Span::styled(model.value_label(*row), label_style));
            spans.push(Span::styled(" ›", theme.marker()));
            spans
        })
        .collect();

    let frame = DialogFrame {
        theme,
        title: "Settings",
        tool: &model.ai_tool,
        help: "↑↓ navigate ←→ change S save Esc cancel",
    };
    Dialog {
        lines: frame.wrap(body).0,
        cursor: None,
    }
}

pub fn compose_multi_select_tool(model: &MultiSelectToolModel) -> Dialog {
    let theme = Theme::for_tool(&model.ai_tool);
    let mut body: Vec<Vec<Span<'static>>> = model
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let selected = index == model.cursor;
            let mut row = item_prefix(&theme, selected, 4);
            let check = if option.checked { "[x]" } else { "[ ]" };
            row.push(Span::styled(check, theme.marker()));
            row.push(Span::raw(" "));
            let name_style = if selected {
                theme.highlight()
            } else {
                Style::default()
            };
            row.push(Span::styled(
                truncate_end(&tool_display_name(&option.token), MENU_INNER_WIDTH - 9),
                name_style,
            ));
            row
        })
        .collect();
    if let Some(error) = &model.error {
        body.push(Vec::new());
        body.push(vec![
            Span::raw(" "),
            Span::styled(truncate_end(error, MENU_INNER_WIDTH - 2), error_style()),
        ]);
    }

    let frame = DialogFrame {
        theme,
        title: "AI tools",
        tool: &model.ai_tool,
        help: "↑↓ navigate Space toggle ⏎ confirm",
    };
    Dialog {
        lines: frame.wrap(body).0,
        cursor: None,
    }
}

/// The slice of an editor's text that fits `width` columns with the cursor
/// kept visible, plus the cursor column within that slice.
fn field_window(editor: &LineEditor, width: usize) -> (String, usize) {
    let chars: Vec<char> = editor.text.chars().collect();
    let cursor = editor.cursor_col.min(chars.len());
    let column = |from: usize, to: usize| -> usize {
        chars[from..to].iter().map(|ch| ch.width().unwrap_or(0)).sum()
    };

    let mut start = 0;
    while start < cursor && column(start, cursor) >= width {
        start += 1;
    }
    let mut visible = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        visible.push(*ch);
    }
    (visible, column(start, cursor))
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word = truncate_end(word, width);
        if !current.is_empty() && current.width() + 1 + word.width() > width {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppEvent, GhostDisplay, Screen, TabTitle};
    use crate::domain::Project;
    use crate::ui::ansi::{encode_line, visible_width};
    use crate::ui::layout::MENU_WIDTH;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn plain(dialog: &Dialog) -> Vec<String> {
        dialog.lines.iter().map(|line| line.to_string()).collect()
    }

    fn assert_box_width(dialog: &Dialog) {
        for line in &dialog.lines {
            assert_eq!(line.width(), MENU_WIDTH, "{line}");
            assert_eq!(visible_width(&encode_line(line)), MENU_WIDTH, "{line}");
        }
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn confirm_dialog_wraps_the_message_and_marks_the_focused_button() {
        let model = ConfirmModel::new(
            "Delete project alpha? The directory itself stays on disk untouched.",
            "claude",
        );
        let dialog = compose_confirm(&model);
        assert_box_width(&dialog);
        let rows = plain(&dialog);
        assert_eq!(rows[1], "│ Confirm                          Claude Code │");
        assert_eq!(rows[4], "│ Delete project alpha? The directory itself   │");
        assert_eq!(rows[5], "│ stays on disk untouched.                     │");
        assert_eq!(rows[7], "│   [ Yes ]   [ No ]                           │");
        assert!(dialog.cursor.is_none());
    }

    #[test]
    fn select_project_lists_each_project_with_its_path() {
        let model = SelectProjectModel::new(
            vec![Project::new("alpha", "/p/a"), Project::new("beta", "/p/b")],
            "codex",
        );
        let dialog = compose_select_project(&model);
        assert_box_width(&dialog);
        let rows = plain(&dialog);
        assert_eq!(rows[4], "│  ▎ 1  alpha                                  │");
        assert_eq!(rows[5], "│  ▎    /p/a                                   │");
        assert_eq!(rows[6], "│    2  beta                                   │");
    }

    #[test]
    fn control_characters_in_projects_print_as_spaces() {
        let model = SelectProjectModel::new(vec![Project::new("tab\there\x07", "/p/a\tb")], "claude");
        let dialog = compose_select_project(&model);
        assert_box_width(&dialog);
        let rows = plain(&dialog);
        assert!(rows[4].starts_with("│  ▎ 1  tab here  "), "{}", rows[4]);
        assert!(rows[5].starts_with("│  ▎    /p/a b "), "{}", rows[5]);
    }

    #[test]
    fn empty_project_picker_says_so() {
        let dialog = compose_select_project(&SelectProjectModel::new(Vec::new(), "claude"));
        assert!(plain(&dialog).iter().any(|row| row.contains("No projects saved yet.")));
    }

    #[test]
    fn tool_picker_is_themed_by_the_highlighted_tool() {
        let tools = vec!["claude".to_string(), "codex".to_string()];
        let model = SelectToolModel::new(tools, "codex");
        let dialog = compose_select_tool(&model);
        assert_box_width(&dialog);
        assert_eq!(plain(&dialog)[5], "│  ▎ 2  Codex CLI                              │");
        assert_eq!(dialog.lines[0].spans[0].style, Theme::for_tool("codex").border());
    }

    #[test]
    fn add_project_cursor_follows_the_focused_field() {
        let model = AddProjectModel::new(Vec::new(), "claude");
        let dialog = compose_add_project(&model);
        assert_box_width(&dialog);
        assert_eq!(dialog.cursor, Some((4, 5)));

        let mut model = model;
        for event in [key(KeyCode::Tab), key(KeyCode::Char('~')), key(KeyCode::Char('/'))] {
            model = model.update(event).0;
        }
        let dialog = compose_add_project(&model);
        assert_eq!(dialog.cursor, Some((6, 8)));
        assert_eq!(plain(&dialog)[8], "│   ~/                                         │");
    }

    #[test]
    fn add_project_error_is_shown_under_the_fields() {
        let mut model = AddProjectModel::new(Vec::new(), "claude");
        for event in [key(KeyCode::Enter), key(KeyCode::Enter)] {
            model = model.update(event).0;
        }
        let dialog = compose_add_project(&model);
        assert_box_width(&dialog);
        assert!(plain(&dialog).iter().any(|row| row.contains("Enter a path for the project.")));
    }

    #[test]
    fn long_field_text_scrolls_to_keep_the_cursor_visible() {
        let mut editor = LineEditor::new();
        editor.insert_str(&"x".repeat(80));
        let (visible, cursor_x) = field_window(&editor, 10);
        assert_eq!(visible, "x".repeat(9));
        assert_eq!(cursor_x, 9);

        editor.move_home();
        let (visible, cursor_x) = field_window(&editor, 10);
        assert_eq!(visible.len(), 10);
        assert_eq!(cursor_x, 0);
    }

    #[test]
    fn settings_rows_show_current_values() {
        let model = SettingsModel::new(GhostDisplay::Static, TabTitle::Project, "claude");
        let dialog = compose_settings(&model);
        assert_box_width(&dialog);
        let rows = plain(&dialog);
        assert_eq!(rows[4], "│  ▎ Ghost display   ‹ Static ›                │");
        assert_eq!(rows[5], "│    Tab title       ‹ Project only ›          │");
    }

    #[test]
    fn multi_select_shows_check_marks_and_errors() {
        let model = MultiSelectToolModel::new(&["codex".to_string()], "claude");
        let dialog = compose_multi_select_tool(&model);
        assert_box_width(&dialog);
        let rows = plain(&dialog);
        assert_eq!(rows[4], "│  ▎ [ ] Claude Code                           │");
        assert_eq!(rows[5], "│    [x] Codex CLI                             │");

        let (model, _) = model.update(key(KeyCode::Down));
        let (model, _) = model.update(key(KeyCode::Char(' ')));
        let (model, _) = model.update(key(KeyCode::Enter));
        let dialog = compose_multi_select_tool(&model);
        assert_box_width(&dialog);
        assert!(plain(&dialog).iter().any(|row| row.contains("Select at least one AI tool.")));
    }

    #[test]
    fn wrap_words_breaks_on_spaces() {
        assert_eq!(wrap_words("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap_words("", 5), vec![String::new()]);
    }
}
