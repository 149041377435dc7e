mod ansi;
mod figure;
mod glyphs;
mod layout;
mod menu;
mod screens;
mod theme;

use crate::app::{
    AddProjectModel, ConfirmModel, MainMenuModel, MultiSelectToolModel, SelectProjectModel,
    SelectToolModel, SettingsModel,
};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

pub use ansi::encode_lines;
pub use figure::{Pose, render_figure};
pub use theme::Theme;

use menu::compose_main_menu;
use screens::{
    Dialog, compose_add_project, compose_confirm, compose_multi_select_tool,
    compose_select_project, compose_select_tool, compose_settings,
};

pub fn render_main_menu(frame: &mut Frame, model: &MainMenuModel) {
    render_centered(frame, compose_main_menu(model), None);
}

pub fn render_confirm(frame: &mut Frame, model: &ConfirmModel) {
    render_dialog(frame, compose_confirm(model));
}

pub fn render_select_project(frame: &mut Frame, model: &SelectProjectModel) {
    render_dialog(frame, compose_select_project(model));
}

pub fn render_select_tool(frame: &mut Frame, model: &SelectToolModel) {
    render_dialog(frame, compose_select_tool(model));
}

pub fn render_add_project(frame: &mut Frame, model: &AddProjectModel) {
    render_dialog(frame, compose_add_project(model));
}

pub fn render_settings(frame: &mut Frame, model: &SettingsModel) {
    render_dialog(frame, compose_settings(model));
}

pub fn render_multi_select_tool(frame: &mut Frame, model: &MultiSelectToolModel) {
    render_dialog(frame, compose_multi_select_tool(model));
}

fn render_dialog(frame: &mut Frame, dialog: Dialog) {
    render_centered(frame, dialog.lines, dialog.cursor);
}

/// Draws `lines` centered in the frame. Content larger than the frame is
/// anchored at the top-left and clipped.
fn render_centered(frame: &mut Frame, lines: Vec<Line<'static>>, cursor: Option<(u16, u16)>) {
    let full_area = frame.area();
    if full_area.width == 0 || full_area.height == 0 {
        return;
    }

    let width = lines.iter().map(Line::width).max().unwrap_or(0);
    let height = lines.len();
    let area = centered_rect(full_area, width, height);

    frame.render_widget(Clear, full_area);
    frame.render_widget(Paragraph::new(Text::from(lines)), area);

    if let Some((column, row)) = cursor {
        if column < area.width && row < area.height {
            frame.set_cursor_position(Position::new(area.x + column, area.y + row));
        }
    }
}

fn centered_rect(outer: Rect, width: usize, height: usize) -> Rect {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(outer.width);
    let height = u16::try_from(height).unwrap_or(u16::MAX).min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Project;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn main_menu_is_centered_in_the_frame() {
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let model = MainMenuModel::new(
            vec![Project::new("alpha", "/p/a"), Project::new("beta", "/p/b")],
            vec!["claude".to_string(), "codex".to_string()],
            "claude",
        )
        .with_terminal_size(60, 24);

        terminal
            .draw(|frame| render_main_menu(frame, &model))
            .unwrap();

        // 20 menu rows in 24 leave two blank rows above; 48 columns in 60
        // leave six on the left.
        assert!(row_text(&terminal, 1).trim().is_empty());
        assert_eq!(
            row_text(&terminal, 2),
            format!("      ┌{}┐      ", "─".repeat(46))
        );
        assert!(row_text(&terminal, 3).contains("Ghost Tab"));
    }

    #[test]
    fn add_project_places_the_cursor_in_the_focused_field() {
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let model = AddProjectModel::new(Vec::new(), "claude");

        terminal
            .draw(|frame| render_add_project(frame, &model))
            .unwrap();

        let dialog = compose_add_project(&model);
        let x = (60 - 48) / 2 + 4;
        let y = (24 - dialog.lines.len() as u16) / 2 + 5;
        terminal.backend_mut().assert_cursor_position(Position::new(x, y));
    }

    #[test]
    fn tiny_frames_clip_without_panicking() {
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let model = MainMenuModel::new(Vec::new(), vec!["claude".to_string()], "claude");
        terminal
            .draw(|frame| render_main_menu(frame, &model))
            .unwrap();
    }
}
