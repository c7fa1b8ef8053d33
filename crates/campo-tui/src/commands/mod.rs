// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use std::path::PathBuf;

use campo_core::LoadPolicy;

use crate::app::{AppState, Focus, Status};
use crate::theme::Theme;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    /// Load a sheet using the configured policy. Under `if-empty` this
    /// replaces data that is empty or missing a required column.
    Load(PathBuf),
    /// Forced replace; without a path, re-reads the last loaded file.
    Reload(Option<PathBuf>),
    /// Append a sheet's records to the current data.
    Merge(PathBuf),
    /// Export all records; without a path, uses `[export] file_name`.
    Export(Option<PathBuf>),
    /// Open the manual entry form.
    Add,
    Theme(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));
        let path = (!rest.is_empty()).then(|| PathBuf::from(rest.trim_matches('"')));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "add" => Ok(Command::Add),
            "load" => path.map(Command::Load).ok_or_else(|| "usage: load <path>".to_string()),
            "merge" => path.map(Command::Merge).ok_or_else(|| "usage: merge <path>".to_string()),
            "reload" => Ok(Command::Reload(path)),
            "export" => Ok(Command::Export(path)),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Load(path) => {
            let policy = s.config.ingest.load_policy;
            s.load(&path, policy);
        }
        Command::Reload(path) => match path.or_else(|| s.last_path.clone()) {
            Some(path) => s.load(&path, LoadPolicy::Replace),
            None => {
                s.status = Some(Status::Error("nothing loaded yet: use reload <path>".to_string()));
            }
        },
        Command::Merge(path) => {
            s.load(&path, LoadPolicy::Append);
        }
        Command::Export(path) => {
            s.export(path);
        }
        Command::Add => {
            s.form.reset();
            s.focus = Focus::Form;
        }
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => {
                s.theme = theme;
                s.status = Some(Status::Info(format!("theme: {name}")));
            }
            None => {
                s.status = Some(Status::Error(format!("unknown theme: {name}")));
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use campo_core::config::Config;
    use campo_core::Store;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::new(Store::new(), Config::defaults(), Theme::load_default())
    }

    #[test]
    fn parse_simple_words() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit  "), Ok(Command::Quit));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("add"), Ok(Command::Add));
    }

    #[test]
    fn parse_paths_keep_spaces() {
        assert_eq!(
            Command::parse("load Aplicaciones 2024.xlsx"),
            Ok(Command::Load(PathBuf::from("Aplicaciones 2024.xlsx")))
        );
        assert_eq!(
            Command::parse("merge \"extra.csv\""),
            Ok(Command::Merge(PathBuf::from("extra.csv")))
        );
        assert_eq!(Command::parse("reload"), Ok(Command::Reload(None)));
        assert_eq!(Command::parse("export"), Ok(Command::Export(None)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert!(Command::parse("load").is_err());
        assert!(Command::parse("theme").is_err());
        assert!(Command::parse("frobnicate").unwrap_err().contains("frobnicate"));
    }

    #[test]
    fn reload_without_history_reports_error() {
        let mut s = state();
        execute_command(&mut s, Command::Reload(None));
        assert!(matches!(s.status, Some(Status::Error(_))));
    }

    #[test]
    fn add_opens_form() {
        let mut s = state();
        execute_command(&mut s, Command::Add);
        assert_eq!(s.focus, Focus::Form);
    }

    #[test]
    fn unknown_theme_keeps_current() {
        let mut s = state();
        execute_command(&mut s, Command::Theme("gruvbox".into()));
        assert_eq!(s.theme, Theme::load_gruvbox_dark());
        execute_command(&mut s, Command::Theme("neon".into()));
        assert_eq!(s.theme, Theme::load_gruvbox_dark());
        assert!(matches!(s.status, Some(Status::Error(_))));
    }

    #[test]
    fn load_replaces_data_missing_a_required_column() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("sin_has.csv");
        std::fs::write(&partial, "FECHA,CATEGORIA\n2024-03-05,CICLO\n").unwrap();
        let complete = dir.path().join("completa.csv");
        std::fs::write(&complete, "FECHA,CATEGORIA,HAS\n2024-03-05,CICLO,10\n2024-03-19,FOLIAR,4\n").unwrap();

        let mut s = state();
        execute_command(&mut s, Command::Load(partial));
        assert_eq!(s.store.len(), 1);
        assert!(!s.store.is_ready());

        execute_command(&mut s, Command::Load(complete));
        assert!(s.store.is_ready());
        assert_eq!(s.store.len(), 2);
        assert!(matches!(s.status, Some(Status::Info(ref m)) if m.contains("2 records loaded")));
    }

    #[test]
    fn merge_appends_after_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, "FECHA,CATEGORIA,HAS\n2024-03-05,CICLO,10\n").unwrap();

        let mut s = state();
        execute_command(&mut s, Command::Load(path.clone()));
        assert_eq!(s.store.len(), 1);
        execute_command(&mut s, Command::Load(path.clone()));
        assert_eq!(s.store.len(), 1, "if-empty policy skips a second load");
        execute_command(&mut s, Command::Merge(path.clone()));
        assert_eq!(s.store.len(), 2);
        execute_command(&mut s, Command::Reload(None));
        assert_eq!(s.store.len(), 1);
    }
}
