use std::path::Path;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub name: String,
    pub path: String,
}

impl Project {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedProjects {
    pub projects: Vec<Project>,
    pub skipped_lines: usize,
}

/// Parses `name:path` records, one per line. The first colon splits the
/// record, so paths may contain further colons.
pub fn parse_projects(text: &str) -> ParsedProjects {
    let mut parsed = ParsedProjects::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, path)) = line.split_once(':') else {
            parsed.skipped_lines += 1;
            continue;
        };

        let name = name.trim();
        let path = path.trim();
        if name.is_empty() || path.is_empty() {
            parsed.skipped_lines += 1;
            continue;
        }

        parsed.projects.push(Project::new(name, path));
    }

    parsed
}

pub fn same_project_path(left: &str, right: &str) -> bool {
    trim_trailing_separator(left) == trim_trailing_separator(right)
}

pub fn contains_project_path(projects: &[Project], path: &str) -> bool {
    projects
        .iter()
        .any(|project| same_project_path(&project.path, path))
}

fn trim_trailing_separator(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Collapses the home directory prefix to `~` for display.
pub fn shorten_home(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    let home = trim_trailing_separator(&home);
    if home.is_empty() {
        return path.to_string();
    }

    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(home) {
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

/// Last path component, used when a project is added without a name.
pub fn default_project_name(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if name.is_empty() || name == "~" {
        return trimmed.to_string();
    }
    name.to_string()
}
