pub const MENU_INNER_WIDTH: usize = 46;
pub const MENU_WIDTH: usize = MENU_INNER_WIDTH + 2;
pub const FIGURE_WIDTH: usize = 28;
pub const FIGURE_HEIGHT: usize = 15;
pub const SIDE_GUTTER: usize = 3;

/// Top border, title, title separator, blank row before the items, help
/// separator, help row, bottom border.
const MENU_CHROME_ROWS: usize = 7;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FigurePlacement {
    Side,
    Above,
    Hidden,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MenuLayout {
    pub placement: FigurePlacement,
    pub menu_height: usize,
}

pub fn menu_height(project_count: usize, action_count: usize, banner: bool) -> usize {
    let separators = usize::from(project_count > 0);
    MENU_CHROME_ROWS + 2 * (project_count + action_count) + separators + usize::from(banner)
}

pub fn compute_layout(
    width: u16,
    height: u16,
    project_count: usize,
    action_count: usize,
    banner: bool,
) -> MenuLayout {
    let menu_height = menu_height(project_count, action_count, banner);
    let side_width = MENU_WIDTH + SIDE_GUTTER + FIGURE_WIDTH + SIDE_GUTTER;

    let placement = if usize::from(width) >= side_width {
        FigurePlacement::Side
    } else if usize::from(height) >= menu_height + FIGURE_HEIGHT + 2 {
        FigurePlacement::Above
    } else {
        FigurePlacement::Hidden
    };

    MenuLayout {
        placement,
        menu_height,
    }
}
