use crate::app::{GhostDisplay, MainMenuModel, MenuItem};
use crate::domain::{ActionItem, Project, shorten_home, tool_display_name};
use crate::ui::ansi::visible_width;
use crate::ui::figure::{Pose, render_figure};
use crate::ui::layout::{
    FIGURE_WIDTH, FigurePlacement, MENU_INNER_WIDTH, MENU_WIDTH, SIDE_GUTTER, compute_layout,
};
use crate::ui::theme::{Theme, banner_style, help_style};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const EMBLEM: &str = "Ghost Tab";
const HELP_MULTI_TOOL: &str = "↑↓ navigate ←→ AI tool S settings ⏎ select";
const HELP_SINGLE_TOOL: &str = "↑↓ navigate S settings ⏎ select";
const ROW_INDENT: usize = 4;
const DETAIL_INDENT: usize = 7;

/// Composes the whole main-menu view: the menu box plus the figure wherever
/// the layout puts it.
pub fn compose_main_menu(model: &MainMenuModel) -> Vec<Line<'static>> {
    let theme = Theme::for_tool(model.current_tool());
    let menu = menu_box(model, &theme);

    let layout = compute_layout(
        model.terminal_width,
        model.terminal_height,
        model.projects.len(),
        model.actions.len(),
        model.update_version.is_some(),
    );
    let placement = match model.ghost_display {
        GhostDisplay::None => FigurePlacement::Hidden,
        GhostDisplay::Animated | GhostDisplay::Static => layout.placement,
    };
    let pose = if model.sleeping {
        Pose::Asleep(model.zzz_frame)
    } else {
        Pose::Awake
    };

    match placement {
        FigurePlacement::Side => {
            let figure = render_figure(model.current_tool(), &theme, pose);
            join_side(menu, figure)
        }
        FigurePlacement::Above => {
            let figure = render_figure(model.current_tool(), &theme, pose);
            stack_above(menu, figure)
        }
        FigurePlacement::Hidden => menu,
    }
}

fn join_side(menu: Vec<Line<'static>>, figure: Vec<Line<'static>>) -> Vec<Line<'static>> {
    let mut figure = figure.into_iter();
    menu.into_iter()
        .map(|row| match figure.next() {
            Some(figure_row) => {
                let mut spans = row.spans;
                spans.push(Span::raw(" ".repeat(SIDE_GUTTER)));
                spans.extend(figure_row.spans);
                Line::from(spans)
            }
            None => row,
        })
        .collect()
}

fn stack_above(menu: Vec<Line<'static>>, figure: Vec<Line<'static>>) -> Vec<Line<'static>> {
    let indent = (MENU_WIDTH - FIGURE_WIDTH) / 2;
    let mut lines: Vec<Line<'static>> = figure
        .into_iter()
        .map(|row| {
            let mut spans = vec![Span::raw(" ".repeat(indent))];
            spans.extend(row.spans);
            Line::from(spans)
        })
        .collect();
    lines.push(Line::default());
    lines.extend(menu);
    lines
}

/// The bordered menu; every line is exactly `MENU_WIDTH` columns.
pub fn menu_box(model: &MainMenuModel, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![rule('┌', '┐', theme), title_row(model, theme), rule('├', '┤', theme)];

    if let Some(version) = &model.update_version {
        let text = truncate_end(&format!("Update available: {version}"), MENU_INNER_WIDTH - 2);
        lines.push(boxed(
            theme,
            vec![Span::raw(" "), Span::styled(text, banner_style())],
        ));
    }
    lines.push(boxed(theme, Vec::new()));

    for index in 0..model.total_items() {
        let selected = index == model.selected_item;
        match model.item(index) {
            Some(MenuItem::Project(project)) => {
                lines.extend(project_rows(model, theme, index, project, selected));
                if index + 1 == model.projects.len() {
                    lines.push(boxed(
                        theme,
                        vec![
                            Span::raw(" "),
                            Span::styled("─".repeat(MENU_INNER_WIDTH - 2), theme.muted()),
                            Span::raw(" "),
                        ],
                    ));
                }
            }
            Some(MenuItem::Action(action)) => {
                lines.extend(action_rows(theme, action, selected));
            }
            None => {}
        }
    }

    let help = if model.has_multiple_tools() {
        HELP_MULTI_TOOL
    } else {
        HELP_SINGLE_TOOL
    };
    lines.push(rule('├', '┤', theme));
    lines.push(boxed(
        theme,
        vec![Span::raw(" "), Span::styled(help, help_style())],
    ));
    lines.push(rule('└', '┘', theme));
    lines
}

fn title_row(model: &MainMenuModel, theme: &Theme) -> Line<'static> {
    let multi = model.has_multiple_tools();
    let markers_width = if multi { 4 } else { 0 };
    // One column of margin on each side and at least one between the parts.
    let room = MENU_INNER_WIDTH - 3 - EMBLEM.width() - markers_width;
    let name = truncate_end(&tool_display_name(model.current_tool()), room);
    let label_width = name.width() + markers_width;
    let gap = MENU_INNER_WIDTH.saturating_sub(2 + EMBLEM.width() + label_width);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(EMBLEM, theme.emblem()),
        Span::raw(" ".repeat(gap)),
    ];
    if multi {
        spans.push(Span::styled("‹ ", theme.marker()));
        spans.push(Span::styled(name, theme.highlight()));
        spans.push(Span::styled(" ›", theme.marker()));
    } else {
        spans.push(Span::styled(name, theme.highlight()));
    }
    spans.push(Span::raw(" "));
    boxed(theme, spans)
}

fn project_rows(
    model: &MainMenuModel,
    theme: &Theme,
    index: usize,
    project: &Project,
    selected: bool,
) -> [Line<'static>; 2] {
    let ordinal = (index + 1).to_string();
    let name_room = MENU_INNER_WIDTH.saturating_sub(ROW_INDENT + ordinal.width() + 2 + 1);
    let name = truncate_end(&project.name, name_room);
    let (ordinal_style, name_style) = if selected {
        (theme.highlight(), theme.highlight())
    } else {
        (theme.muted(), Style::default())
    };

    let mut name_row = item_prefix(theme, selected, ROW_INDENT);
    name_row.push(Span::styled(ordinal, ordinal_style));
    name_row.push(Span::raw("  "));
    name_row.push(Span::styled(name, name_style));

    let path = shorten_home(&project.path, model.home_dir.as_deref());
    let path = truncate_start(&path, MENU_INNER_WIDTH - DETAIL_INDENT - 1);
    let mut path_row = item_prefix(theme, selected, DETAIL_INDENT);
    path_row.push(Span::styled(path, theme.muted()));

    [boxed(theme, name_row), boxed(theme, path_row)]
}

fn action_rows(theme: &Theme, action: ActionItem, selected: bool) -> [Line<'static>; 2] {
    let (letter_style, label_style) = if selected {
        (theme.highlight(), theme.highlight())
    } else {
        (theme.shortcut(), Style::default())
    };

    let mut label_row = item_prefix(theme, selected, ROW_INDENT);
    label_row.push(Span::styled(action.shortcut().to_string(), letter_style));
    label_row.push(Span::raw("  "));
    label_row.push(Span::styled(action.label(), label_style));

    let mut detail_row = item_prefix(theme, selected, DETAIL_INDENT);
    detail_row.push(Span::styled(action.description(), theme.muted()));

    [boxed(theme, label_row), boxed(theme, detail_row)]
}

/// Leading indent of an item row; the selected item shows a bar in the third
/// column instead of blank space.
pub(crate) fn item_prefix(theme: &Theme, selected: bool, indent: usize) -> Vec<Span<'static>> {
    if selected {
        vec![
            Span::raw("  "),
            Span::styled("▎", theme.marker()),
            Span::raw(" ".repeat(indent - 3)),
        ]
    } else {
        vec![Span::raw(" ".repeat(indent))]
    }
}

pub(crate) fn rule(left: char, right: char, theme: &Theme) -> Line<'static> {
    let text = format!("{left}{}{right}", "─".repeat(MENU_INNER_WIDTH));
    Line::from(Span::styled(text, theme.border()))
}

pub(crate) fn boxed(theme: &Theme, content: Vec<Span<'static>>) -> Line<'static> {
    let used: usize = content.iter().map(|span| visible_width(&span.content)).sum();
    let pad = MENU_INNER_WIDTH.saturating_sub(used);

    let mut spans = Vec::with_capacity(content.len() + 3);
    spans.push(Span::styled("│", theme.border()));
    spans.extend(content);
    if pad > 0 {
        spans.push(Span::raw(" ".repeat(pad)));
    }
    spans.push(Span::styled("│", theme.border()));
    Line::from(spans)
}

/// Control characters take no cell on the terminal; show them as spaces so
/// row widths stay exact.
fn printable(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

/// Cuts `text` to `max` columns, ending with `…` when shortened.
pub fn truncate_end(text: &str, max: usize) -> String {
    let text = printable(text);
    if text.width() <= max {
        return text;
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width + 1 > max {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Keeps the tail of `text` within `max` columns, starting with `…` when
/// shortened.
pub fn truncate_start(text: &str, max: usize) -> String {
    let text = printable(text);
    if text.width() <= max {
        return text;
    }
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0usize;
    for ch in text.chars().rev() {
        let width = ch.width().unwrap_or(0);
        if used + width + 1 > max {
            break;
        }
        used += width;
        tail.push(ch);
    }
    let mut out = String::from("…");
    out.extend(tail.into_iter().rev());
    out
}
