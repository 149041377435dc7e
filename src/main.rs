mod app;
mod cli;
mod domain;
mod infra;
mod ui;

use crate::app::{
    AddProjectModel, AppCommand, AppError, AppEvent, ConfirmModel, MainMenuModel,
    MultiSelectToolModel, Screen, SelectProjectModel, SelectToolModel, SettingsModel,
};
use crate::cli::{CliCommand, CliInvocation, CliParseError, MainMenuArgs};
use crate::infra::{
    InitLoggingError, LoadProjectsError, LogConfig, OpenTtyError, TerminalSession, TtyTerminal,
    init_logging, load_projects, load_projects_if_present, resolve_home_dir,
};
use crate::ui::{Pose, Theme};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::size as terminal_size;
use ratatui::Frame;
use serde::Serialize;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Poll timeout for screens without animation; only bounds how long a
/// blocked read can delay a redraw.
const IDLE_POLL: Duration = Duration::from_millis(250);
const SHOW_LOGO_SLEEP_FRAME: u8 = 2;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Cli(#[from] CliParseError),

    #[error(transparent)]
    Projects(#[from] LoadProjectsError),

    #[error(transparent)]
    Tty(#[from] OpenTtyError),

    #[error(transparent)]
    Logging(#[from] InitLoggingError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl MainError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Cli(_) => 2,
            Self::Projects(_) | Self::Tty(_) | Self::Logging(_) | Self::App(_) | Self::Encode(_) => {
                1
            }
        }
    }
}

fn main() {
    if let Err(error) = run_main() {
        tracing::error!(%error, "exiting with error");
        let mut err = io::stderr().lock();
        match &error {
            MainError::Cli(_) => {
                let _ = writeln!(err, "{error} (run with --help for usage)");
            }
            _ => {
                let _ = writeln!(err, "{error}");
            }
        }
        std::process::exit(error.exit_code());
    }
}

fn run_main() -> Result<(), MainError> {
    let args = std::env::args().collect::<Vec<_>>();
    match crate::cli::parse_invocation(&args)? {
        CliInvocation::PrintHelp => {
            print_help();
            Ok(())
        }
        CliInvocation::PrintVersion => {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliInvocation::Command(command) => {
            init_logging(&LogConfig::from_env())?;
            tracing::info!(
                subcommand = command.name(),
                version = env!("CARGO_PKG_VERSION"),
                "starting"
            );
            run_command(command)
        }
    }
}

fn print_help() {
    let text = format!(
        "{name} - terminal launcher menu for AI coding assistants\n\nUSAGE:\n  {name} [--ai-tool TOOL] <subcommand> [options]\n  {name} --help | --version\n\nSUBCOMMANDS:\n  main-menu             Pick a project, an action and the AI tool\n  confirm <message>     Ask a yes/no question\n  show-logo             Print the figure for --ai-tool (add --sleeping for the sleeping pose)\n  select-project        Pick one project from --projects-file\n  select-ai-tool        Pick one tool from --ai-tools\n  add-project           Enter a name and a path for a new project\n  settings-menu         Change --ghost-display and --tab-title\n  multi-select-ai-tool  Check the tools to offer (--ai-tools pre-checks)\n\nOPTIONS:\n  --ai-tool TOOL          Current tool: claude|codex|copilot|opencode (default: claude)\n  --ai-tools LIST         Comma-separated tools, in display order (default: claude)\n  --projects-file PATH    Projects file, one name:path per line\n  --ghost-display MODE    animated|static|none (default: animated)\n  --tab-title MODE        full|project (default: full)\n  --update-version V      Show an update banner for version V\n\n  Every option also accepts --name=VALUE.\n\nOUTPUT:\n  Interactive subcommands print one JSON line on stdout. The UI is drawn on the\n  controlling terminal.\n\nENV:\n  GHOST_TAB_LOG_FILE    Append log events to this file (logging is off otherwise)\n  GHOST_TAB_LOG         Log filter, e.g. debug or ghost_tab=trace (default: info)\n",
        name = env!("CARGO_PKG_NAME")
    );
    let mut out = io::stdout().lock();
    let _ = write!(out, "{text}");
}

fn run_command(command: CliCommand) -> Result<(), MainError> {
    match command {
        CliCommand::MainMenu(args) => {
            let model = build_main_menu(args)?;
            emit(&run_screen(model, ui::render_main_menu)?)
        }
        CliCommand::Confirm { message, ai_tool } => {
            let model = ConfirmModel::new(message, ai_tool);
            emit(&run_screen(model, ui::render_confirm)?)
        }
        CliCommand::ShowLogo { ai_tool, sleeping } => show_logo(&ai_tool, sleeping),
        CliCommand::SelectProject {
            projects_file,
            ai_tool,
        } => {
            let parsed = load_projects(&projects_file)?;
            tracing::info!(projects = parsed.projects.len(), "loaded projects");
            let model = SelectProjectModel::new(parsed.projects, ai_tool);
            emit(&run_screen(model, ui::render_select_project)?)
        }
        CliCommand::SelectAiTool { ai_tools, ai_tool } => {
            let model = SelectToolModel::new(ai_tools, &ai_tool);
            emit(&run_screen(model, ui::render_select_tool)?)
        }
        CliCommand::AddProject {
            projects_file,
            ai_tool,
        } => {
            let existing = match projects_file {
                Some(path) => load_projects_if_present(&path)?.projects,
                None => Vec::new(),
            };
            let model = AddProjectModel::new(existing, ai_tool);
            emit(&run_screen(model, ui::render_add_project)?)
        }
        CliCommand::SettingsMenu {
            ghost_display,
            tab_title,
            ai_tool,
        } => {
            let model = SettingsModel::new(ghost_display, tab_title, ai_tool);
            emit(&run_screen(model, ui::render_settings)?)
        }
        CliCommand::MultiSelectAiTool { checked, ai_tool } => {
            let model = MultiSelectToolModel::new(&checked, ai_tool);
            emit(&run_screen(model, ui::render_multi_select_tool)?)
        }
    }
}

fn build_main_menu(args: MainMenuArgs) -> Result<MainMenuModel, MainError> {
    let parsed = load_projects(&args.projects_file)?;
    tracing::info!(
        projects = parsed.projects.len(),
        skipped_lines = parsed.skipped_lines,
        tools = args.ai_tools.len(),
        ghost_display = args.ghost_display.token(),
        "loaded main menu"
    );
    Ok(
        MainMenuModel::new(parsed.projects, args.ai_tools, &args.ai_tool)
            .with_ghost_display(args.ghost_display)
            .with_tab_title(args.tab_title)
            .with_update_version(args.update_version)
            .with_home_dir(resolve_home_dir()),
    )
}

fn show_logo(ai_tool: &str, sleeping: bool) -> Result<(), MainError> {
    let theme = Theme::for_tool(ai_tool);
    let pose = if sleeping {
        Pose::Asleep(SHOW_LOGO_SLEEP_FRAME)
    } else {
        Pose::Awake
    };
    let text = ui::encode_lines(&ui::render_figure(ai_tool, &theme, pose));
    let mut out = io::stdout().lock();
    writeln!(out, "{text}").map_err(AppError::from)?;
    Ok(())
}

fn emit<T: Serialize>(output: &T) -> Result<(), MainError> {
    let json = serde_json::to_string(output)?;
    tracing::info!(result = %json, "emitting result");
    let mut out = io::stdout().lock();
    writeln!(out, "{json}").map_err(AppError::from)?;
    out.flush().map_err(AppError::from)?;
    Ok(())
}

/// Runs `screen` on the controlling terminal until it exits. The terminal is
/// restored before the output is returned, on success and on error alike.
fn run_screen<S, R>(screen: S, render: R) -> Result<S::Output, MainError>
where
    S: Screen,
    R: Fn(&mut Frame, &S),
{
    let mut session = TerminalSession::enter()?;
    let result = drive(session.terminal(), screen, render);
    if let Err(error) = session.restore() {
        tracing::warn!(%error, "failed to restore terminal");
    }
    Ok(result?)
}

fn drive<S, R>(terminal: &mut TtyTerminal, mut screen: S, render: R) -> Result<S::Output, AppError>
where
    S: Screen,
    R: Fn(&mut Frame, &S),
{
    if let Ok((width, height)) = terminal_size() {
        let (next, command) = screen.update(AppEvent::Resize { width, height });
        screen = next;
        if let AppCommand::Exit(output) = command {
            return Ok(output);
        }
    }

    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| render(frame, &screen))?;

        let tick = screen.tick_interval();
        let timeout = tick.map_or(IDLE_POLL, |interval| {
            interval.saturating_sub(last_tick.elapsed())
        });

        let mut events: Vec<AppEvent> = Vec::with_capacity(2);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    events.push(AppEvent::Key(key));
                }
                Event::Paste(text) => events.push(AppEvent::Paste(text)),
                Event::Resize(width, height) => events.push(AppEvent::Resize { width, height }),
                _ => {}
            }
        }
        if let Some(interval) = tick {
            if last_tick.elapsed() >= interval {
                last_tick = Instant::now();
                events.push(AppEvent::Tick);
            }
        }

        for event in events {
            let (next, command) = screen.update(event);
            screen = next;
            if let AppCommand::Exit(output) = command {
                return Ok(output);
            }
        }
    }
}
