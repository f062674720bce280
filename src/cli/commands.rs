//! Command dispatch
//!
//! Every editing command loads a snapshot, selects one entry, runs one panel
//! action and writes the reindexed snapshot back.

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::EntryPanel;
use crate::application::{ApplicationError, ApplicationResult, Event};
use crate::cli::args::{ClipboardCommands, Cli, Commands, ConfigCommands, Target};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::TreeDisplay;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::{InfraError, RecordingNotifier};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let events = Arc::new(RecordingNotifier::new());
    let container = ServiceContainer::new(settings, events.clone());
    let ctx = Context {
        container: &container,
        events: &events,
    };

    match &cli.command {
        Some(Commands::Show { file }) => cmd_show(&ctx, file),
        Some(Commands::Entry { target }) => cmd_entry(&ctx, target),
        Some(Commands::Subtree { target }) => cmd_subtree(&ctx, target),
        Some(Commands::Reindex { file }) => cmd_reindex(&ctx, file),
        Some(Commands::AddChild { target }) => {
            ctx.edit(target, true, |panel| Ok(panel.add_child()? > 0))
        }
        Some(Commands::Append { target }) => ctx.edit(target, true, |panel| Ok(panel.append()? > 0)),
        Some(Commands::Insert { target }) => ctx.edit(target, true, |panel| Ok(panel.insert()? > 0)),
        Some(Commands::Delete {
            target,
            cascade,
            keep_children,
        }) => {
            let cascade = resolve_flag(*cascade, *keep_children, container.settings.delete_children);
            ctx.edit(target, true, |panel| Ok(panel.delete(cascade) > 0))
        }
        Some(Commands::Copy {
            target,
            no_children,
        }) => {
            let include_children = !no_children && container.settings.copy_children;
            ctx.edit(target, false, |panel| Ok(panel.copy(include_children)? > 0))
        }
        Some(Commands::Paste { target }) => ctx.edit(target, true, |panel| panel.paste()),
        Some(Commands::Actions { target }) => cmd_actions(&ctx, target),
        Some(Commands::Clipboard { command }) => cmd_clipboard(&container, command),
        Some(Commands::Config { command }) => cmd_config(&container.settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "bcmtree", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `bcmtree --help`".to_string(),
        )),
    }
}

/// `--cascade` wins, then `--keep-children`, then the configured default.
fn resolve_flag(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

struct Context<'a> {
    container: &'a ServiceContainer,
    events: &'a RecordingNotifier,
}

impl Context<'_> {
    fn open(&self, file: &Path) -> CliResult<EntryPanel> {
        let entries = self.container.document_service().load(file)?;
        Ok(self.container.entry_panel(entries)?)
    }

    fn open_selected(&self, target: &Target) -> CliResult<EntryPanel> {
        let mut panel = self.open(&target.file)?;
        if panel.select(target.index).is_none() {
            return Err(CliError::InvalidArgs(format!(
                "no entry at position {} ({} entries)",
                target.index,
                panel.tree().len()
            )));
        }
        Ok(panel)
    }

    /// Run one panel action, report its status and persist if asked to.
    #[instrument(level = "debug", skip(self, action))]
    fn edit<F>(&self, target: &Target, persist: bool, action: F) -> CliResult<()>
    where
        F: FnOnce(&mut EntryPanel) -> ApplicationResult<bool>,
    {
        let mut panel = self.open_selected(target)?;
        let changed = action(&mut panel)?;
        if changed && persist {
            self.container
                .document_service()
                .save(&target.file, panel.document())?;
        }
        self.report(changed);
        if !changed {
            debug!("action was a no-op for entry {}", target.index);
        }
        Ok(())
    }

    fn report(&self, changed: bool) {
        for event in self.events.take() {
            match event {
                Event::StatusText(text) => output::status(&text, changed),
                other => debug!("event: {}", other),
            }
        }
    }
}

#[instrument(skip(ctx))]
fn cmd_show(ctx: &Context, file: &Path) -> CliResult<()> {
    let panel = ctx.open(file)?;
    let tree = panel.tree();
    output::info(&tree.to_tree_string());
    output::detail(&format!("{} entries, depth {}", tree.len(), tree.depth()));
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_entry(ctx: &Context, target: &Target) -> CliResult<()> {
    let panel = ctx.open_selected(target)?;
    if let Some(entry) = panel.selected_entry() {
        let json = serde_json::to_string_pretty(entry).map_err(|e| ApplicationError::Transfer {
            message: e.to_string(),
        })?;
        output::header(entry);
        output::info(&json);
    }
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_subtree(ctx: &Context, target: &Target) -> CliResult<()> {
    let panel = ctx.open_selected(target)?;
    let Some(node) = panel.selection() else {
        return Ok(());
    };
    let entries = panel.tree().get_subtree_entries(node);
    output::header(&entries.iter().join(", "));
    entries.iter().for_each(output::entry_links);
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_reindex(ctx: &Context, file: &Path) -> CliResult<()> {
    let panel = ctx.open(file)?;
    ctx.container
        .document_service()
        .save(file, panel.document())?;
    output::action("Reindexed", &format!("{} entries", panel.document().len()));
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_actions(ctx: &Context, target: &Target) -> CliResult<()> {
    let panel = ctx.open_selected(target)?;
    let actions = panel.actions();
    if let Some(node) = panel.selection() {
        output::header(&panel.tree().label(node));
    }
    for (name, enabled) in [
        ("copy", actions.copy),
        ("paste", actions.paste),
        ("delete", actions.delete),
        ("append", actions.append),
        ("insert", actions.insert),
        ("add-child", actions.add_child),
    ] {
        output::availability(name, enabled);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_clipboard(container: &ServiceContainer, command: &ClipboardCommands) -> CliResult<()> {
    match command {
        ClipboardCommands::Show => {
            let entries = container
                .clipboard
                .read_entries()
                .map_err(|e| InfraError::io("read clipboard", e))?;
            match entries {
                Some(entries) => {
                    output::header(&format!("{} entries on the clipboard", entries.len()));
                    entries.iter().for_each(output::entry_links);
                }
                None => output::warning("clipboard holds no entries"),
            }
        }
        ClipboardCommands::Clear => {
            container
                .clipboard
                .clear()
                .map_err(|e| InfraError::io("clear clipboard", e))?;
            output::action("Cleared", &container.settings.clipboard_path.display());
        }
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_flags_when_resolving_cascade_then_explicit_flags_win() {
        assert!(resolve_flag(true, false, false));
        assert!(!resolve_flag(false, true, true));
        assert!(resolve_flag(false, false, true));
        assert!(!resolve_flag(false, false, false));
    }
}
