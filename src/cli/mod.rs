use crate::app::{GhostDisplay, TabTitle};
use crate::domain::{DEFAULT_TOOL, parse_tool_list};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliInvocation {
    PrintHelp,
    PrintVersion,
    Command(CliCommand),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MainMenuArgs {
    pub projects_file: PathBuf,
    pub ai_tool: String,
    pub ai_tools: Vec<String>,
    pub ghost_display: GhostDisplay,
    pub tab_title: TabTitle,
    pub update_version: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliCommand {
    MainMenu(MainMenuArgs),
    Confirm {
        message: String,
        ai_tool: String,
    },
    ShowLogo {
        ai_tool: String,
        sleeping: bool,
    },
    SelectProject {
        projects_file: PathBuf,
        ai_tool: String,
    },
    SelectAiTool {
        ai_tools: Vec<String>,
        ai_tool: String,
    },
    AddProject {
        projects_file: Option<PathBuf>,
        ai_tool: String,
    },
    SettingsMenu {
        ghost_display: GhostDisplay,
        tab_title: TabTitle,
        ai_tool: String,
    },
    MultiSelectAiTool {
        checked: Vec<String>,
        ai_tool: String,
    },
}

impl CliCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MainMenu(_) => "main-menu",
            Self::Confirm { .. } => "confirm",
            Self::ShowLogo { .. } => "show-logo",
            Self::SelectProject { .. } => "select-project",
            Self::SelectAiTool { .. } => "select-ai-tool",
            Self::AddProject { .. } => "add-project",
            Self::SettingsMenu { .. } => "settings-menu",
            Self::MultiSelectAiTool { .. } => "multi-select-ai-tool",
        }
    }
}

#[derive(Debug, Error)]
pub enum CliParseError {
    #[error("missing subcommand")]
    MissingSubcommand,

    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("missing value for flag: {0}")]
    MissingFlagValue(String),

    #[error("invalid value for {flag}: {value}")]
    InvalidFlagValue { flag: String, value: String },

    #[error("missing required flag: {0}")]
    MissingRequiredFlag(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("empty tool list for {0}")]
    EmptyToolList(String),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

enum Arg<'a> {
    Flag {
        name: &'a str,
        inline: Option<&'a str>,
    },
    Positional(&'a str),
}

/// Splits raw arguments into flags (`--name`, `--name=value`, `-x`) and
/// positionals. Everything after `--` is positional.
struct ArgScanner<'a> {
    args: std::slice::Iter<'a, String>,
    options_done: bool,
}

impl<'a> ArgScanner<'a> {
    fn new(args: &'a [String]) -> Self {
        Self {
            args: args.iter(),
            options_done: false,
        }
    }

    fn next_arg(&mut self) -> Option<Arg<'a>> {
        loop {
            let arg = self.args.next()?.as_str();
            if self.options_done || arg == "-" || !arg.starts_with('-') {
                return Some(Arg::Positional(arg));
            }
            if arg == "--" {
                self.options_done = true;
                continue;
            }
            return Some(match arg.split_once('=') {
                Some((name, value)) if name.starts_with("--") => Arg::Flag {
                    name,
                    inline: Some(value),
                },
                _ => Arg::Flag {
                    name: arg,
                    inline: None,
                },
            });
        }
    }

    fn value(&mut self, name: &str, inline: Option<&str>) -> Result<String, CliParseError> {
        match inline {
            Some(value) => Ok(value.to_string()),
            None => self
                .args
                .next()
                .cloned()
                .ok_or_else(|| CliParseError::MissingFlagValue(name.to_string())),
        }
    }
}

fn no_value(name: &str, inline: Option<&str>) -> Result<(), CliParseError> {
    match inline {
        Some(value) => Err(CliParseError::InvalidFlagValue {
            flag: name.to_string(),
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn parse_invocation(args: &[String]) -> Result<CliInvocation, CliParseError> {
    let before_separator = args
        .iter()
        .skip(1)
        .take_while(|arg| arg.as_str() != "--");
    for arg in before_separator {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliInvocation::PrintHelp),
            "--version" | "-V" => return Ok(CliInvocation::PrintVersion),
            _ => {}
        }
    }

    let rest = args.get(1..).unwrap_or_default();
    let mut scanner = ArgScanner::new(rest);
    let mut ai_tool = DEFAULT_TOOL.to_string();
    let subcommand = loop {
        match scanner.next_arg() {
            None => return Err(CliParseError::MissingSubcommand),
            Some(Arg::Flag {
                name: "--ai-tool",
                inline,
            }) => {
                ai_tool = parse_ai_tool("--ai-tool", &scanner.value("--ai-tool", inline)?)?;
            }
            Some(Arg::Flag { name, .. }) => {
                return Err(CliParseError::UnknownFlag(name.to_string()));
            }
            Some(Arg::Positional(name)) => break name,
        }
    };

    let command = match subcommand {
        "main-menu" => parse_main_menu(scanner, ai_tool)?,
        "confirm" => parse_confirm(scanner, ai_tool)?,
        "show-logo" => parse_show_logo(scanner, ai_tool)?,
        "select-project" => parse_select_project(scanner, ai_tool)?,
        "select-ai-tool" => parse_select_ai_tool(scanner, ai_tool)?,
        "add-project" => parse_add_project(scanner, ai_tool)?,
        "settings-menu" => parse_settings_menu(scanner, ai_tool)?,
        "multi-select-ai-tool" => parse_multi_select_ai_tool(scanner, ai_tool)?,
        other => return Err(CliParseError::UnknownSubcommand(other.to_string())),
    };
    Ok(CliInvocation::Command(command))
}

fn parse_main_menu(mut args: ArgScanner<'_>, ai_tool: String) -> Result<CliCommand, CliParseError> {
    let mut projects_file: Option<PathBuf> = None;
    let mut ai_tool = ai_tool;
    let mut ai_tools = vec![DEFAULT_TOOL.to_string()];
    let mut ghost_display = GhostDisplay::Animated;
    let mut tab_title = TabTitle::Full;
    let mut update_version: Option<String> = None;

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag { name, inline } => match name {
                "--projects-file" => {
                    projects_file = Some(parse_path(name, &args.value(name, inline)?)?);
                }
                "--ai-tool" => ai_tool = parse_ai_tool(name, &args.value(name, inline)?)?,
                "--ai-tools" => ai_tools = parse_tools_flag(name, &args.value(name, inline)?)?,
                "--ghost-display" => {
                    ghost_display = parse_ghost_display(name, &args.value(name, inline)?)?;
                }
                "--tab-title" => tab_title = parse_tab_title(name, &args.value(name, inline)?)?,
                "--update-version" => {
                    let value = args.value(name, inline)?;
                    let value = value.trim();
                    update_version = (!value.is_empty()).then(|| value.to_string());
                }
                _ => return Err(CliParseError::UnknownFlag(name.to_string())),
            },
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    let projects_file = projects_file
        .ok_or_else(|| CliParseError::MissingRequiredFlag("--projects-file".to_string()))?;
    Ok(CliCommand::MainMenu(MainMenuArgs {
        projects_file,
        ai_tool,
        ai_tools,
        ghost_display,
        tab_title,
        update_version,
    }))
}

fn parse_confirm(mut args: ArgScanner<'_>, ai_tool: String) -> Result<CliCommand, CliParseError> {
    let mut ai_tool = ai_tool;
    let mut message: Option<String> = None;

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag {
                name: "--ai-tool",
                inline,
            } => ai_tool = parse_ai_tool("--ai-tool", &args.value("--ai-tool", inline)?)?,
            Arg::Flag { name, .. } => return Err(CliParseError::UnknownFlag(name.to_string())),
            Arg::Positional(value) if message.is_none() => message = Some(value.to_string()),
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    let message = message.ok_or_else(|| CliParseError::MissingArgument("message".to_string()))?;
    Ok(CliCommand::Confirm { message, ai_tool })
}

fn parse_show_logo(mut args: ArgScanner<'_>, ai_tool: String) -> Result<CliCommand, CliParseError> {
    let mut ai_tool = ai_tool;
    let mut sleeping = false;

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag { name, inline } => match name {
                "--ai-tool" => ai_tool = parse_ai_tool(name, &args.value(name, inline)?)?,
                "--sleeping" => {
                    no_value(name, inline)?;
                    sleeping = true;
                }
                _ => return Err(CliParseError::UnknownFlag(name.to_string())),
            },
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    Ok(CliCommand::ShowLogo { ai_tool, sleeping })
}

fn parse_select_project(
    mut args: ArgScanner<'_>,
    ai_tool: String,
) -> Result<CliCommand, CliParseError> {
    let mut ai_tool = ai_tool;
    let mut projects_file: Option<PathBuf> = None;

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag { name, inline } => match name {
                "--ai-tool" => ai_tool = parse_ai_tool(name, &args.value(name, inline)?)?,
                "--projects-file" => {
                    projects_file = Some(parse_path(name, &args.value(name, inline)?)?);
                }
                _ => return Err(CliParseError::UnknownFlag(name.to_string())),
            },
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    let projects_file = projects_file
        .ok_or_else(|| CliParseError::MissingRequiredFlag("--projects-file".to_string()))?;
    Ok(CliCommand::SelectProject {
        projects_file,
        ai_tool,
    })
}

fn parse_select_ai_tool(
    mut args: ArgScanner<'_>,
    ai_tool: String,
) -> Result<CliCommand, CliParseError> {
    let mut ai_tool = ai_tool;
    let mut ai_tools = vec![DEFAULT_TOOL.to_string()];

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag { name, inline } => match name {
                "--ai-tool" => ai_tool = parse_ai_tool(name, &args.value(name, inline)?)?,
                "--ai-tools" => ai_tools = parse_tools_flag(name, &args.value(name, inline)?)?,
                _ => return Err(CliParseError::UnknownFlag(name.to_string())),
            },
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    Ok(CliCommand::SelectAiTool { ai_tools, ai_tool })
}

fn parse_add_project(
    mut args: ArgScanner<'_>,
    ai_tool: String,
) -> Result<CliCommand, CliParseError> {
    let mut ai_tool = ai_tool;
    let mut projects_file: Option<PathBuf> = None;

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag { name, inline } => match name {
                "--ai-tool" => ai_tool = parse_ai_tool(name, &args.value(name, inline)?)?,
                "--projects-file" => {
                    projects_file = Some(parse_path(name, &args.value(name, inline)?)?);
                }
                _ => return Err(CliParseError::UnknownFlag(name.to_string())),
            },
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    Ok(CliCommand::AddProject {
        projects_file,
        ai_tool,
    })
}

fn parse_settings_menu(
    mut args: ArgScanner<'_>,
    ai_tool: String,
) -> Result<CliCommand, CliParseError> {
    let mut ai_tool = ai_tool;
    let mut ghost_display = GhostDisplay::Animated;
    let mut tab_title = TabTitle::Full;

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag { name, inline } => match name {
                "--ai-tool" => ai_tool = parse_ai_tool(name, &args.value(name, inline)?)?,
                "--ghost-display" => {
                    ghost_display = parse_ghost_display(name, &args.value(name, inline)?)?;
                }
                "--tab-title" => tab_title = parse_tab_title(name, &args.value(name, inline)?)?,
                _ => return Err(CliParseError::UnknownFlag(name.to_string())),
            },
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    Ok(CliCommand::SettingsMenu {
        ghost_display,
        tab_title,
        ai_tool,
    })
}

fn parse_multi_select_ai_tool(
    mut args: ArgScanner<'_>,
    ai_tool: String,
) -> Result<CliCommand, CliParseError> {
    let mut ai_tool = ai_tool;
    let mut checked: Option<Vec<String>> = None;

    while let Some(arg) = args.next_arg() {
        match arg {
            Arg::Flag { name, inline } => match name {
                "--ai-tool" => ai_tool = parse_ai_tool(name, &args.value(name, inline)?)?,
                // An empty list is allowed here: nothing starts checked.
                "--ai-tools" => checked = Some(parse_tool_list(&args.value(name, inline)?)),
                _ => return Err(CliParseError::UnknownFlag(name.to_string())),
            },
            Arg::Positional(value) => {
                return Err(CliParseError::UnexpectedArgument(value.to_string()));
            }
        }
    }

    let checked = checked.unwrap_or_else(|| vec![ai_tool.clone()]);
    Ok(CliCommand::MultiSelectAiTool { checked, ai_tool })
}

fn parse_ai_tool(flag: &str, value: &str) -> Result<String, CliParseError> {
    let token = value.trim().to_ascii_lowercase();
    if token.is_empty() || token.contains(',') {
        return Err(CliParseError::InvalidFlagValue {
            flag: flag.to_string(),
            value: value.to_string(),
        });
    }
    Ok(token)
}

fn parse_tools_flag(flag: &str, value: &str) -> Result<Vec<String>, CliParseError> {
    let tools = parse_tool_list(value);
    if tools.is_empty() {
        return Err(CliParseError::EmptyToolList(flag.to_string()));
    }
    Ok(tools)
}

fn parse_path(flag: &str, value: &str) -> Result<PathBuf, CliParseError> {
    if value.trim().is_empty() {
        return Err(CliParseError::InvalidFlagValue {
            flag: flag.to_string(),
            value: value.to_string(),
        });
    }
    Ok(PathBuf::from(value))
}

fn parse_ghost_display(flag: &str, value: &str) -> Result<GhostDisplay, CliParseError> {
    GhostDisplay::from_token(&value.trim().to_ascii_lowercase()).ok_or_else(|| {
        CliParseError::InvalidFlagValue {
            flag: flag.to_string(),
            value: value.to_string(),
        }
    })
}

fn parse_tab_title(flag: &str, value: &str) -> Result<TabTitle, CliParseError> {
    TabTitle::from_token(&value.trim().to_ascii_lowercase()).ok_or_else(|| {
        CliParseError::InvalidFlagValue {
            flag: flag.to_string(),
            value: value.to_string(),
        }
    })
}
