use crate::app::keyboard::translate_key;
use crate::app::{AppCommand, AppEvent, GhostDisplay, Screen, TabTitle};
use crate::domain::{ACTION_ITEMS, ActionItem, MenuAction, MenuResult, Project};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::Duration;

pub const ANIMATION_TICK: Duration = Duration::from_millis(500);
/// Idle ticks before the figure falls asleep (20 s at the tick rate above).
pub const SLEEP_AFTER_TICKS: u32 = 40;
const ZZZ_FRAME_COUNT: u8 = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuItem<'a> {
    Project(&'a Project),
    Action(ActionItem),
}

#[derive(Clone, Debug)]
pub struct MainMenuModel {
    pub projects: Vec<Project>,
    pub actions: [ActionItem; 4],
    pub tools: Vec<String>,
    pub selected_tool_index: usize,
    pub selected_item: usize,
    pub ghost_display: GhostDisplay,
    pub tab_title: TabTitle,
    pub update_version: Option<String>,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub home_dir: Option<PathBuf>,
    pub idle_ticks: u32,
    pub sleeping: bool,
    pub zzz_frame: u8,
    pub result: Option<MenuResult>,
}

impl MainMenuModel {
    /// Starts on the first row with `initial_tool` selected when it is offered,
    /// otherwise on the first offered tool.
    pub fn new(projects: Vec<Project>, tools: Vec<String>, initial_tool: &str) -> Self {
        let selected_tool_index = tools
            .iter()
            .position(|tool| tool == initial_tool)
            .unwrap_or(0);
        Self {
            projects,
            actions: ACTION_ITEMS,
            tools,
            selected_tool_index,
            selected_item: 0,
            ghost_display: GhostDisplay::Animated,
            tab_title: TabTitle::Full,
            update_version: None,
            terminal_width: 0,
            terminal_height: 0,
            home_dir: None,
            idle_ticks: 0,
            sleeping: false,
            zzz_frame: 0,
            result: None,
        }
    }

    pub fn with_ghost_display(mut self, ghost_display: GhostDisplay) -> Self {
        self.ghost_display = ghost_display;
        self
    }

    pub fn with_tab_title(mut self, tab_title: TabTitle) -> Self {
        self.tab_title = tab_title;
        self
    }

    pub fn with_update_version(mut self, version: Option<String>) -> Self {
        self.update_version = version.filter(|version| !version.trim().is_empty());
        self
    }

    pub fn with_terminal_size(mut self, width: u16, height: u16) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    pub fn total_items(&self) -> usize {
        self.projects.len() + self.actions.len()
    }

    pub fn item(&self, index: usize) -> Option<MenuItem<'_>> {
        match self.projects.get(index) {
            Some(project) => Some(MenuItem::Project(project)),
            None => self
                .actions
                .get(index - self.projects.len())
                .copied()
                .map(MenuItem::Action),
        }
    }

    /// Empty when the wrapper offered no tools.
    pub fn current_tool(&self) -> &str {
        self.tools
            .get(self.selected_tool_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn has_multiple_tools(&self) -> bool {
        self.tools.len() > 1
    }

    pub fn is_exited(&self) -> bool {
        self.result.is_some()
    }

    pub fn wants_ticks(&self) -> bool {
        self.ghost_display == GhostDisplay::Animated && !self.is_exited()
    }

    fn move_selection(&mut self, forward: bool) {
        let total = self.total_items();
        if total == 0 {
            return;
        }
        self.selected_item = if forward {
            (self.selected_item + 1) % total
        } else {
            (self.selected_item + total - 1) % total
        };
    }

    fn cycle_tool(&mut self, forward: bool) {
        let count = self.tools.len();
        if count <= 1 {
            return;
        }
        self.selected_tool_index = if forward {
            (self.selected_tool_index + 1) % count
        } else {
            (self.selected_tool_index + count - 1) % count
        };
    }

    fn exit_with(mut self, action: MenuAction) -> (Self, AppCommand<MenuResult>) {
        let result = MenuResult::new(action, self.current_tool());
        tracing::info!(action = result.action.token(), ai_tool = %result.ai_tool, "main menu exit");
        self.result = Some(result.clone());
        (self, AppCommand::Exit(result))
    }

    fn activate_selected(self) -> (Self, AppCommand<MenuResult>) {
        let action = match self.item(self.selected_item) {
            Some(MenuItem::Project(project)) => Some(MenuAction::select(project)),
            Some(MenuItem::Action(action)) => Some(action.menu_action()),
            None => None,
        };
        match action {
            Some(action) => self.exit_with(action),
            None => (self, AppCommand::None),
        }
    }

    fn wake(&mut self) {
        self.idle_ticks = 0;
        self.sleeping = false;
        self.zzz_frame = 0;
    }
}

pub fn update(model: MainMenuModel, event: AppEvent) -> (MainMenuModel, AppCommand<MenuResult>) {
    if model.is_exited() {
        return (model, AppCommand::None);
    }

    match event {
        AppEvent::Key(key) => update_on_key(model, translate_key(key)),
        AppEvent::Resize { width, height } => {
            (model.with_terminal_size(width, height), AppCommand::None)
        }
        AppEvent::Paste(_) => (model, AppCommand::None),
        AppEvent::Tick => (update_on_tick(model), AppCommand::None),
    }
}

fn update_on_key(model: MainMenuModel, key: KeyEvent) -> (MainMenuModel, AppCommand<MenuResult>) {
    let mut model = model;
    model.wake();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => model.exit_with(MenuAction::Quit),
            _ => (model, AppCommand::None),
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            model.move_selection(false);
            (model, AppCommand::None)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            model.move_selection(true);
            (model, AppCommand::None)
        }
        KeyCode::Left => {
            model.cycle_tool(false);
            (model, AppCommand::None)
        }
        KeyCode::Right => {
            model.cycle_tool(true);
            (model, AppCommand::None)
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            if index < model.projects.len() {
                model.selected_item = index;
            }
            (model, AppCommand::None)
        }
        KeyCode::Enter => model.activate_selected(),
        KeyCode::Char('a' | 'A') => model.exit_with(MenuAction::AddProject),
        KeyCode::Char('d' | 'D') => model.exit_with(MenuAction::DeleteProject),
        KeyCode::Char('o' | 'O') => model.exit_with(MenuAction::OpenOnce),
        KeyCode::Char('p' | 'P') => model.exit_with(MenuAction::PlainTerminal),
        KeyCode::Char('s' | 'S') => model.exit_with(MenuAction::Settings),
        KeyCode::Esc => model.exit_with(MenuAction::Quit),
        _ => (model, AppCommand::None),
    }
}

fn update_on_tick(mut model: MainMenuModel) -> MainMenuModel {
    if model.ghost_display != GhostDisplay::Animated {
        return model;
    }

    if model.sleeping {
        model.zzz_frame = (model.zzz_frame + 1) % ZZZ_FRAME_COUNT;
        return model;
    }

    model.idle_ticks = model.idle_ticks.saturating_add(1);
    if model.idle_ticks >= SLEEP_AFTER_TICKS {
        model.sleeping = true;
        model.zzz_frame = 0;
    }
    model
}

impl Screen for MainMenuModel {
    type Output = MenuResult;

    fn update(self, event: AppEvent) -> (Self, AppCommand<Self::Output>) {
        update(self, event)
    }

    fn tick_interval(&self) -> Option<Duration> {
        self.wants_ticks().then_some(ANIMATION_TICK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ch(c: char) -> AppEvent {
        key(KeyCode::Char(c))
    }

    fn two_projects() -> MainMenuModel {
        MainMenuModel::new(
            vec![Project::new("alpha", "/p/a"), Project::new("beta", "/p/b")],
            vec!["claude".to_string(), "codex".to_string()],
            "claude",
        )
    }

    fn run(model: MainMenuModel, events: Vec<AppEvent>) -> (MainMenuModel, Option<MenuResult>) {
        let mut model = model;
        let mut emitted = None;
        for event in events {
            let (next, command) = update(model, event);
            model = next;
            if let AppCommand::Exit(result) = command {
                assert!(emitted.is_none(), "result emitted twice");
                emitted = Some(result);
            }
        }
        (model, emitted)
    }

    fn json(result: Option<MenuResult>) -> String {
        serde_json::to_string(&result.expect("result")).expect("json")
    }

    #[test]
    fn down_then_enter_selects_the_second_project() {
        let (_, result) = run(two_projects(), vec![key(KeyCode::Down), key(KeyCode::Enter)]);
        assert_eq!(
            json(result),
            r#"{"action":"select-project","name":"beta","path":"/p/b","ai_tool":"claude"}"#
        );
    }

    #[test]
    fn cycling_the_tool_is_reported_with_the_action() {
        let (_, result) = run(two_projects(), vec![key(KeyCode::Right), ch('a')]);
        assert_eq!(json(result), r#"{"action":"add-project","ai_tool":"codex"}"#);
    }

    #[test]
    fn digit_past_the_last_project_is_ignored() {
        let model = MainMenuModel::new(
            vec![Project::new("alpha", "/p/a")],
            vec!["claude".to_string()],
            "claude",
        );
        let (_, result) = run(model, vec![ch('2'), key(KeyCode::Enter)]);
        assert_eq!(
            json(result),
            r#"{"action":"select-project","name":"alpha","path":"/p/a","ai_tool":"claude"}"#
        );
    }

    #[test]
    fn escape_quits_with_the_current_tool() {
        let (_, result) = run(two_projects(), vec![key(KeyCode::Esc)]);
        assert_eq!(json(result), r#"{"action":"quit","ai_tool":"claude"}"#);
    }

    #[test]
    fn ctrl_c_quits_like_escape() {
        let event = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let (_, result) = run(two_projects(), vec![event]);
        assert_eq!(json(result), r#"{"action":"quit","ai_tool":"claude"}"#);
    }

    #[test]
    fn russian_layout_reaches_the_settings_shortcut() {
        let (_, result) = run(two_projects(), vec![ch('ы')]);
        assert_eq!(json(result), r#"{"action":"settings","ai_tool":"claude"}"#);
    }

    #[test]
    fn enter_with_no_projects_adds_a_project() {
        let model = MainMenuModel::new(Vec::new(), vec!["claude".to_string()], "claude");
        assert_eq!(model.total_items(), 4);
        let (_, result) = run(model, vec![ch('1'), key(KeyCode::Enter)]);
        assert_eq!(json(result), r#"{"action":"add-project","ai_tool":"claude"}"#);
    }

    #[test]
    fn enter_on_an_action_row_triggers_that_action() {
        let (_, result) = run(
            two_projects(),
            vec![key(KeyCode::Up), key(KeyCode::Up), key(KeyCode::Enter)],
        );
        assert_eq!(json(result), r#"{"action":"open-once","ai_tool":"claude"}"#);
    }

    #[test]
    fn letter_shortcuts_accept_both_cases() {
        for (letter, action) in [
            ('D', "delete-project"),
            ('o', "open-once"),
            ('P', "plain-terminal"),
            ('S', "settings"),
        ] {
            let (_, result) = run(two_projects(), vec![ch(letter)]);
            assert_eq!(
                json(result),
                format!(r#"{{"action":"{action}","ai_tool":"claude"}}"#)
            );
        }
    }

    #[test]
    fn input_after_exit_is_ignored() {
        let (model, result) = run(
            two_projects(),
            vec![key(KeyCode::Esc), key(KeyCode::Down), ch('a'), key(KeyCode::Right)],
        );
        assert_eq!(json(result), r#"{"action":"quit","ai_tool":"claude"}"#);
        assert_eq!(model.selected_item, 0);
        assert_eq!(model.selected_tool_index, 0);
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let (model, _) = run(two_projects(), vec![key(KeyCode::Up)]);
        assert_eq!(model.selected_item, 5);
        let (model, _) = run(model, vec![ch('j')]);
        assert_eq!(model.selected_item, 0);
        let (model, _) = run(model, vec![ch('k'), ch('k')]);
        assert_eq!(model.selected_item, 4);
    }

    #[test]
    fn selection_stays_in_bounds_for_any_navigation_sequence() {
        let moves = [key(KeyCode::Up), key(KeyCode::Down), ch('j'), ch('k'), ch('1'), ch('9')];
        for project_count in 0..5 {
            let projects = (0..project_count)
                .map(|i| Project::new(format!("p{i}"), format!("/p/{i}")))
                .collect();
            let mut model = MainMenuModel::new(projects, vec!["claude".to_string()], "claude");
            let mut state = 7usize;
            for _ in 0..200 {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345) % 65_536;
                let (next, command) = update(model, moves[state % moves.len()].clone());
                assert!(matches!(command, AppCommand::None));
                model = next;
                assert!(model.selected_item < model.total_items());
            }
        }
    }

    #[test]
    fn tool_cycling_is_modular_and_reversible() {
        for count in 1..5usize {
            let tools: Vec<String> = (0..count).map(|i| format!("tool{i}")).collect();
            let model = MainMenuModel::new(Vec::new(), tools, "tool0");
            let forward = vec![key(KeyCode::Right); count];
            let (model, _) = run(model, forward);
            assert_eq!(model.selected_tool_index, 0);

            let (model, _) = run(model, vec![key(KeyCode::Left)]);
            assert!(model.selected_tool_index < count);
            assert_eq!(model.selected_tool_index, count - 1);

            let mut events = vec![key(KeyCode::Right)];
            events.extend(vec![key(KeyCode::Right); count]);
            events.extend(vec![key(KeyCode::Left); count]);
            let (model, _) = run(model, events);
            assert_eq!(model.selected_tool_index, 0);
        }
    }

    #[test]
    fn initial_tool_not_offered_falls_back_to_first() {
        let model = MainMenuModel::new(Vec::new(), vec!["codex".to_string()], "claude");
        assert_eq!(model.current_tool(), "codex");
    }

    #[test]
    fn empty_tool_list_reports_an_empty_tool() {
        let model = MainMenuModel::new(Vec::new(), Vec::new(), "claude");
        let (_, result) = run(model, vec![key(KeyCode::Right), key(KeyCode::Esc)]);
        assert_eq!(json(result), r#"{"action":"quit","ai_tool":""}"#);
    }

    #[test]
    fn resize_updates_dimensions_only() {
        let (model, result) = run(
            two_projects(),
            vec![key(KeyCode::Down), AppEvent::Resize { width: 100, height: 40 }],
        );
        assert!(result.is_none());
        assert_eq!((model.terminal_width, model.terminal_height), (100, 40));
        assert_eq!(model.selected_item, 1);
    }

    #[test]
    fn idle_ticks_put_the_figure_to_sleep_and_keys_wake_it() {
        let ticks = vec![AppEvent::Tick; SLEEP_AFTER_TICKS as usize];
        let (model, _) = run(two_projects(), ticks);
        assert!(model.sleeping);

        let (model, _) = run(model, vec![AppEvent::Tick, AppEvent::Tick]);
        assert_eq!(model.zzz_frame, 2);

        let (model, _) = run(model, vec![key(KeyCode::Down)]);
        assert!(!model.sleeping);
        assert_eq!(model.idle_ticks, 0);
    }

    #[test]
    fn static_display_ignores_ticks() {
        let model = two_projects().with_ghost_display(GhostDisplay::Static);
        assert_eq!(model.tick_interval(), None);
        let ticks = vec![AppEvent::Tick; SLEEP_AFTER_TICKS as usize * 2];
        let (model, _) = run(model, ticks);
        assert!(!model.sleeping);
        assert_eq!(model.idle_ticks, 0);
    }

    #[test]
    fn identical_inputs_give_identical_documents() {
        let events = || vec![key(KeyCode::Right), ch('о'), key(KeyCode::Down), key(KeyCode::Enter)];
        let (_, first) = run(two_projects(), events());
        let (_, second) = run(two_projects(), events());
        assert_eq!(json(first), json(second));
    }
}
