//! # CLI Layer
//!
//! The only place in the codebase that:
//! - Reads and writes outline files
//! - Prints to stdout
//! - Installs the tracing subscriber
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: `setup::Cli` via clap
//! 2. **Context Setup**: logging, configuration, the document being edited
//! 3. **Dispatch**: one handler per command, each calling the API facade
//! 4. **Output Formatting**: `render` for text, serde for `--json`

use super::render;
use super::setup::{Cli, Commands};
use anyhow::{bail, Context, Result};
use clap::Parser;
use nodelineapp::api::{Destination, NodelineApi};
use nodelineapp::config::NodelineConfig;
use nodelineapp::content::{self, ContentManager};
use nodelineapp::hierarchy::DiffAction;
use nodelineapp::index::OutlinePath;
use nodelineapp::model::{Item, ItemId};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = NodelineConfig::load().context("loading configuration")?;
    debug!(?config, "configuration loaded");

    let file = cli.command.file().clone();
    let type_name = type_name(&file, cli.file_type.as_deref(), &config);
    let create_missing = matches!(cli.command, Commands::Add { .. });
    let mut doc = Document::open(file, type_name, &config, create_missing)?;

    match cli.command {
        Commands::Show { .. } => {
            if cli.json {
                println!("{}", render::render_outline_json(doc.api())?);
            } else {
                print!("{}", render::render_outline(doc.api()));
            }
            Ok(())
        }
        Commands::Normalize { .. } => {
            doc.save()?;
            info!(path = %doc.path.display(), "normalized");
            Ok(())
        }
        Commands::Add {
            text,
            into,
            at,
            done,
            ..
        } => {
            let api = doc.api_mut();
            let destination = destination(api, into.as_deref(), at)?;
            let items = text.into_iter().map(|t| Item::new(t).done(done)).collect();
            let actions = api.add_items(items, destination)?;
            doc.finish(&actions, cli.json)
        }
        Commands::Remove { paths, .. } => {
            let api = doc.api_mut();
            let ids = api.resolve_selectors(&paths)?;
            let actions = api.remove_items(&ids)?;
            doc.finish(&actions, cli.json)
        }
        Commands::Move { paths, into, at, .. } => {
            let api = doc.api_mut();
            let ids = api.resolve_selectors(&paths)?;
            let destination = destination(api, into.as_deref(), at)?;
            if !api.can_move(&ids, destination.target())? {
                bail!("cannot move items into themselves or their own children");
            }
            let actions = api.move_items(&ids, destination)?;
            doc.finish(&actions, cli.json)
        }
        Commands::Done { paths, .. } => {
            let actions = set_done(doc.api_mut(), &paths, true)?;
            doc.finish(&actions, cli.json)
        }
        Commands::Reopen { paths, .. } => {
            let actions = set_done(doc.api_mut(), &paths, false)?;
            doc.finish(&actions, cli.json)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A second init only happens in tests; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

/// `--type` wins, then the file extension, then the configured default.
fn type_name(path: &Path, explicit: Option<&str>, config: &NodelineConfig) -> String {
    match explicit {
        Some(name) => name.to_string(),
        None => content::type_name_for(path, &config.default_type),
    }
}

fn destination(api: &NodelineApi, into: Option<&str>, at: Option<usize>) -> Result<Destination> {
    let target = match into {
        Some(path) => Some(api.resolve_path(&path.parse::<OutlinePath>()?)?),
        None => None,
    };
    let offset = match at {
        Some(0) => bail!("--at is 1-based; use --at 1 for the first position"),
        Some(n) => Some(n - 1),
        None => None,
    };
    Ok(Destination::new(target, offset))
}

fn set_done(api: &mut NodelineApi, paths: &[String], done: bool) -> Result<Vec<DiffAction>> {
    let ids: Vec<ItemId> = api.resolve_selectors(paths)?;
    let mut actions = Vec::with_capacity(ids.len());
    for id in ids {
        actions.extend(api.set_done(id, done)?);
    }
    Ok(actions)
}

/// The outline file being edited by this invocation.
struct Document {
    path: PathBuf,
    type_name: String,
    content: ContentManager,
}

impl Document {
    fn open(path: PathBuf, type_name: String, config: &NodelineConfig, create_missing: bool) -> Result<Self> {
        let mut content = ContentManager::new(config.render_options());
        if path.exists() {
            let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            content
                .read(&data, &type_name)
                .with_context(|| format!("loading {}", path.display()))?;
        } else if create_missing {
            // Fail on an unreadable type now rather than after the edit.
            content.data(&type_name)?;
        } else {
            bail!("{} does not exist", path.display());
        }
        debug!(path = %path.display(), items = content.api().total_count(), "opened outline");
        Ok(Self {
            path,
            type_name,
            content,
        })
    }

    fn api(&self) -> &NodelineApi {
        self.content.api()
    }

    fn api_mut(&mut self) -> &mut NodelineApi {
        self.content.api_mut()
    }

    fn save(&self) -> Result<()> {
        let data = self.content.data(&self.type_name)?;
        fs::write(&self.path, data).with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    /// Saves and reports the actions of an edit.
    fn finish(&self, actions: &[DiffAction], json: bool) -> Result<()> {
        self.save()?;
        if json {
            println!("{}", render::render_actions_json(actions)?);
        } else {
            print!("{}", render::render_actions(self.api(), actions));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_precedence() {
        let config = NodelineConfig::default();
        assert_eq!(type_name(Path::new("a.md"), Some("txt"), &config), "txt");
        assert_eq!(type_name(Path::new("a.text"), None, &config), "text");
        assert_eq!(type_name(Path::new("TODO"), None, &config), "txt");

        let config = NodelineConfig {
            default_type: "public.plain-text".to_string(),
            ..NodelineConfig::default()
        };
        assert_eq!(type_name(Path::new("TODO"), None, &config), "public.plain-text");
    }

    #[test]
    fn test_destination_positions_are_one_based() {
        let mut api = NodelineApi::new();
        let parent = Item::new("parent");
        let id = parent.id;
        api.add_items(vec![parent], Destination::OnRoot).unwrap();

        assert_eq!(destination(&api, None, None).unwrap(), Destination::OnRoot);
        assert_eq!(
            destination(&api, None, Some(1)).unwrap(),
            Destination::IntoRoot { offset: 0 }
        );
        assert_eq!(
            destination(&api, Some("1"), Some(2)).unwrap(),
            Destination::IntoTarget { target: id, offset: 1 }
        );
        assert!(destination(&api, None, Some(0)).is_err());
        assert!(destination(&api, Some("2"), None).is_err());
    }

    #[test]
    fn test_set_done_over_range() {
        let mut api = NodelineApi::new();
        api.add_items(vec![Item::new("a"), Item::new("b"), Item::new("c")], Destination::OnRoot)
            .unwrap();

        let actions = set_done(&mut api, &["1-2".to_string()], true).unwrap();

        assert_eq!(actions.len(), 2);
        let done: Vec<bool> = api.iter().map(|item| item.done).collect();
        assert_eq!(done, vec![true, true, false]);
    }
}
