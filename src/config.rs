//! YAML shortcut configuration
//!
//! Lets applications ship their chord table as data instead of code:
//!
//! ```yaml
//! shortcuts:
//!   - keys: "ctrl+shift+s"
//!     action: save_all
//!   - keys: "alt+f"
//!     action: focus_search
//!     target: "searchBox"
//! ```
//!
//! Actions are names; the application supplies the name→binding
//! resolution when applying the config to a directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::directory::ShortcutDirectory;
use crate::host::Host;
use crate::keycodes;
use crate::registry::{Binding, RegisterError};
use crate::types::{Chord, Modifiers};

/// Root structure of a shortcuts YAML file
#[derive(Debug, Deserialize)]
pub struct ShortcutConfig {
    pub shortcuts: Vec<ShortcutEntry>,
}

/// A single shortcut entry from YAML
#[derive(Debug, Deserialize)]
pub struct ShortcutEntry {
    /// Chord string, e.g. "ctrl+shift+s" or "alt+f4"
    pub keys: String,
    /// Application-defined action name
    pub action: String,
    /// Target element; global (document-level) when absent
    #[serde(default)]
    pub target: Option<String>,
    /// Opt in to chords the reserved table refuses by default
    #[serde(default)]
    pub allow_reserved: bool,
}

/// Errors from loading or applying a shortcut configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read shortcut config: {0}")]
    Io(String),
    #[error("failed to parse shortcut config: {0}")]
    Parse(String),
    #[error("invalid chord string \"{0}\"")]
    InvalidChord(String),
    #[error("unknown action \"{0}\"")]
    UnknownAction(String),
    #[error(transparent)]
    Register(#[from] RegisterError),
}

/// Load a shortcut configuration from a YAML file
pub fn load_config_file(path: &Path) -> Result<ShortcutConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    parse_config_yaml(&content)
}

/// Parse a shortcut configuration from a YAML string
pub fn parse_config_yaml(yaml: &str) -> Result<ShortcutConfig, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Parse a chord string like "ctrl+shift+s" into a [`Chord`].
///
/// Modifier names: ctrl/control, shift, alt/option. Exactly one
/// non-modifier key name is required; see [`keycodes::from_name`].
pub fn parse_chord(keys: &str) -> Result<Chord, ConfigError> {
    let mut mods = Modifiers::NONE;
    let mut code = None;

    for part in keys.split('+') {
        let part = part.trim().to_lowercase();
        match part.as_str() {
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            _ => {
                if code.is_some() {
                    return Err(ConfigError::InvalidChord(keys.to_string()));
                }
                code = Some(
                    keycodes::from_name(&part)
                        .ok_or_else(|| ConfigError::InvalidChord(keys.to_string()))?,
                );
            }
        }
    }

    let code = code.ok_or_else(|| ConfigError::InvalidChord(keys.to_string()))?;
    Ok(Chord::new(code, mods))
}

/// The per-user shortcuts file, `~/.config/keychord/shortcuts.yaml` on
/// Unix and the equivalent config directory elsewhere.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("keychord").join("shortcuts.yaml"))
}

impl ShortcutConfig {
    /// Apply every entry to a directory, resolving action names through
    /// `resolve`.
    ///
    /// Entries keep being applied after a failure; the first error is
    /// returned once the rest have been attempted, so one bad entry does
    /// not silently drop the ones after it.
    pub fn register_all<H, F>(
        &self,
        directory: &ShortcutDirectory<H>,
        resolve: F,
    ) -> Result<(), ConfigError>
    where
        H: Host + 'static,
        F: Fn(&str) -> Option<Binding>,
    {
        let mut first_error = None;
        let mut applied = 0usize;

        for entry in &self.shortcuts {
            match apply_entry(directory, &resolve, entry) {
                Ok(()) => applied += 1,
                Err(err) => {
                    warn!(
                        keys = %entry.keys,
                        action = %entry.action,
                        %err,
                        "skipping shortcut entry"
                    );
                    first_error.get_or_insert(err);
                }
            }
        }

        info!(applied, total = self.shortcuts.len(), "applied shortcut config");
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn apply_entry<H, F>(
    directory: &ShortcutDirectory<H>,
    resolve: &F,
    entry: &ShortcutEntry,
) -> Result<(), ConfigError>
where
    H: Host + 'static,
    F: Fn(&str) -> Option<Binding>,
{
    let chord = parse_chord(&entry.keys)?;
    let binding =
        resolve(&entry.action).ok_or_else(|| ConfigError::UnknownAction(entry.action.clone()))?;

    match &entry.target {
        Some(target) => directory.register(target, chord.spec(), binding, entry.allow_reserved)?,
        None => directory.register_global(chord.spec(), binding, entry.allow_reserved)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_chord() {
        let chord = parse_chord("s").unwrap();
        assert_eq!(chord, Chord::bare(b'S' as u16));
    }

    #[test]
    fn test_parse_chord_with_modifiers() {
        let chord = parse_chord("ctrl+shift+s").unwrap();
        assert_eq!(chord.code, b'S' as u16);
        assert!(chord.mods.ctrl());
        assert!(chord.mods.shift());
        assert!(!chord.mods.alt());
    }

    #[test]
    fn test_parse_named_key() {
        let chord = parse_chord("alt+f4").unwrap();
        assert_eq!(chord.code, keycodes::F4);
        assert!(chord.mods.is_alt_only());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_chord("ctrl+bogus"),
            Err(ConfigError::InvalidChord(_))
        ));
        assert!(matches!(
            parse_chord("ctrl+shift"),
            Err(ConfigError::InvalidChord(_))
        ));
        assert!(matches!(parse_chord("a+b"), Err(ConfigError::InvalidChord(_))));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
shortcuts:
  - keys: "ctrl+s"
    action: save
  - keys: "alt+f"
    action: focus_search
    target: "searchBox"
    allow_reserved: false
"#;
        let config = parse_config_yaml(yaml).unwrap();
        assert_eq!(config.shortcuts.len(), 2);
        assert_eq!(config.shortcuts[0].action, "save");
        assert!(config.shortcuts[0].target.is_none());
        assert_eq!(config.shortcuts[1].target.as_deref(), Some("searchBox"));
    }

    #[test]
    fn test_parse_yaml_rejects_malformed() {
        assert!(parse_config_yaml("shortcuts: 12").is_err());
    }

    #[test]
    fn test_load_config_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "shortcuts:\n  - keys: \"ctrl+k\"\n    action: palette\n"
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.shortcuts.len(), 1);
        assert_eq!(config.shortcuts[0].keys, "ctrl+k");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config_file(Path::new("/nonexistent/shortcuts.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
