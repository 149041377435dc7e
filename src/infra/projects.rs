use crate::domain::{ParsedProjects, parse_projects};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadProjectsError {
    #[error("failed to read projects file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub fn load_projects(path: &Path) -> Result<ParsedProjects, LoadProjectsError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadProjectsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let parsed = parse_projects(&text);
    if parsed.skipped_lines > 0 {
        tracing::debug!(
            path = %path.display(),
            skipped = parsed.skipped_lines,
            "skipped malformed projects file lines"
        );
    }
    Ok(parsed)
}

/// Like [`load_projects`], but a file that does not exist yet reads as an
/// empty list.
pub fn load_projects_if_present(path: &Path) -> Result<ParsedProjects, LoadProjectsError> {
    match load_projects(path) {
        Err(LoadProjectsError::Read { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Ok(ParsedProjects::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Project;
    use std::io::Write;

    #[test]
    fn loads_projects_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# saved projects").unwrap();
        writeln!(file, "beta:/p/b").unwrap();
        writeln!(file, "broken line").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "alpha : /p/a").unwrap();

        let parsed = load_projects(file.path()).unwrap();
        assert_eq!(
            parsed.projects,
            vec![Project::new("beta", "/p/b"), Project::new("alpha", "/p/a")]
        );
        assert_eq!(parsed.skipped_lines, 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects");
        let error = load_projects(&path).unwrap_err();
        assert!(error.to_string().starts_with("failed to read projects file"));
        assert!(error.to_string().contains("projects"));
    }

    #[test]
    fn optional_load_treats_missing_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let parsed = load_projects_if_present(&dir.path().join("projects")).unwrap();
        assert!(parsed.projects.is_empty());
    }

    #[test]
    fn optional_load_still_reports_other_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_projects_if_present(dir.path()).is_err());
    }
}
