use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::fill_missing_keys;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            let json = serde_json::to_string_pretty(cfg)
                .map_err(|e| AppError::Config(format!("failed to serialize configuration: {e}")))?;
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{json}");
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            let added = fill_missing_keys(path)?;
            println!(
                "🔎 Configuration check: {} missing key(s) added.",
                added.len()
            );
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            edit(path, editor.as_deref());
        }
    }

    Ok(())
}

/// Open `path` in the requested editor, falling back to $EDITOR / $VISUAL
/// or the platform default.
fn edit(path: &Path, requested: Option<&str>) {
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.unwrap_or(&default_editor);

    match Command::new(editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{editor_to_use}'"
            ));
            return;
        }
        _ if editor_to_use == default_editor => {
            error(format!("Failed to edit configuration file using '{editor_to_use}'"));
            return;
        }
        _ => warning(format!(
            "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
        )),
    }

    match Command::new(&default_editor).arg(path).status() {
        Ok(s) if s.success() => success(format!(
            "Configuration file edited successfully using fallback '{default_editor}'"
        )),
        _ => error(format!(
            "Failed to edit configuration file using fallback '{default_editor}'"
        )),
    }
}
