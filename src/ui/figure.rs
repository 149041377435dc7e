use crate::domain::ToolKind;
use crate::ui::glyphs::{PIXEL_COLS, ZZZ_FRAMES, pixel_map};
use crate::ui::theme::Theme;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pose {
    Awake,
    /// Sleeping, with the index of the "z" animation frame.
    Asleep(u8),
}

/// Renders the figure for `tool` as 15 lines of exactly 28 columns. Unknown
/// tools draw the default figure.
pub fn render_figure(tool: &str, theme: &Theme, pose: Pose) -> Vec<Line<'static>> {
    let map = pixel_map(ToolKind::resolve(tool));
    let zzz: &[(usize, usize, char)] = match pose {
        Pose::Awake => &[],
        Pose::Asleep(frame) => ZZZ_FRAMES[usize::from(frame) % ZZZ_FRAMES.len()],
    };

    map.iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut pixels: Vec<char> = row.chars().collect();
            pixels.resize(PIXEL_COLS, '.');
            for (row, col, glyph) in zzz {
                if *row == row_index && pixels[*col] == '.' {
                    pixels[*col] = *glyph;
                }
            }
            render_row(&pixels, theme, pose)
        })
        .collect()
}

fn render_row(pixels: &[char], theme: &Theme, pose: Pose) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for pixel in pixels {
        let (cell, style) = pixel_cell(*pixel, theme, pose);
        if run_style != Some(style) {
            if let Some(previous) = run_style {
                spans.push(Span::styled(std::mem::take(&mut run), previous));
            }
            run_style = Some(style);
        }
        run.push_str(cell);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }

    Line::from(spans)
}

fn pixel_cell(pixel: char, theme: &Theme, pose: Pose) -> (&'static str, Style) {
    const BLOCK: &str = "██";
    let asleep = matches!(pose, Pose::Asleep(_));

    match (pixel, asleep) {
        ('P' | 'B', true) => (BLOCK, Theme::fg(theme.sleep_primary)),
        ('D' | 'A', true) => (BLOCK, Theme::fg(theme.sleep_dim)),
        ('C', true) => (BLOCK, Theme::fg(theme.sleep_cap)),
        ('F', true) => (BLOCK, Theme::fg(theme.sleep_feet)),
        ('W' | 'E', true) => (
            "▁▁",
            Theme::fg(theme.sleep_eye).bg(Color::Indexed(theme.sleep_primary)),
        ),
        ('z', _) => ("z ", Theme::fg(theme.sleep_dim)),
        ('Z', _) => ("Z ", Theme::fg(theme.sleep_dim)),
        ('P', false) => (BLOCK, Theme::fg(theme.primary)),
        ('B', false) => (BLOCK, Theme::fg(theme.bright)),
        ('D', false) => (BLOCK, Theme::fg(theme.dim)),
        ('A', false) => (BLOCK, Theme::fg(theme.accent)),
        ('C', false) => (BLOCK, Theme::fg(theme.cap)),
        ('F', false) => (BLOCK, Theme::fg(theme.dark_feet)),
        ('W', false) => (BLOCK, Theme::fg(theme.eye_white)),
        ('E', false) => (BLOCK, Theme::fg(theme.eye_pupil)),
        _ => ("  ", Style::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::KNOWN_TOOLS;
    use crate::ui::ansi::{encode_line, visible_width};
    use crate::ui::layout::{FIGURE_HEIGHT, FIGURE_WIDTH};

    #[test]
    fn every_figure_is_fifteen_rows_of_twenty_eight_columns() {
        for kind in KNOWN_TOOLS {
            let theme = Theme::for_kind(kind);
            for pose in [Pose::Awake, Pose::Asleep(0), Pose::Asleep(1), Pose::Asleep(2)] {
                let lines = render_figure(kind.token(), &theme, pose);
                assert_eq!(lines.len(), FIGURE_HEIGHT);
                for line in &lines {
                    assert_eq!(line.width(), FIGURE_WIDTH);
                    assert_eq!(visible_width(&encode_line(line)), FIGURE_WIDTH);
                }
            }
        }
    }

    #[test]
    fn unknown_tool_draws_the_default_figure() {
        let theme = Theme::for_tool("claude");
        assert_eq!(
            render_figure("mystery", &theme, Pose::Awake),
            render_figure("claude", &theme, Pose::Awake)
        );
    }

    #[test]
    fn sleeping_closes_the_eyes_and_shows_the_zzz() {
        let theme = Theme::for_tool("claude");
        let awake: String = render_figure("claude", &theme, Pose::Awake)
            .iter()
            .map(|line| line.to_string())
            .collect();
        let asleep: String = render_figure("claude", &theme, Pose::Asleep(2))
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert!(!awake.contains('▁'));
        assert!(asleep.contains("▁▁"));
        assert!(asleep.contains('Z'));
        assert!(!awake.contains('z'));
    }
}
