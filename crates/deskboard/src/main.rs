//! deskboard - CLI entry point
//!
//! Runs the terminal board and exposes one-shot commands for the layout, the
//! to-do list, the memo pad and the configuration file.

use chrono::{DateTime, Local, Utc};
use clap::{Args, Parser, Subcommand};
use deskboard::board::{BoardError, WidgetBoard};
use deskboard::config::error::ConfigError;
use deskboard::config::schema::Config;
use deskboard::config::{default, loader::ConfigLoader, xdg};
use deskboard::layout::{DropOutcome, WidgetCatalog};
use deskboard::logging::{self, LogTarget};
use deskboard::memo::{MemoError, MemoPad};
use deskboard::notify::{LogNotifier, StatusLine};
use deskboard::storage::{FileStore, SharedStore};
use deskboard::todo::{parse_deadline, Todo, TodoError, TodoList, TodoPatch};
use deskboard::tui::app::App;
use deskboard::Column;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Personal productivity widget board
#[derive(Parser)]
#[command(name = "deskboard")]
#[command(version, about = "Personal productivity widget board for the terminal")]
struct Cli {
    /// Directory holding the board state (overrides `storage.data_dir`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the deskboard CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface
    Tui,

    /// Show or rearrange the widget layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Manage the to-do list
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Manage the memo pad
    Memo {
        #[command(subcommand)]
        action: MemoAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print the widgets of each column, top to bottom
    Show,
    /// Move a widget to a column
    Move {
        /// Widget id (e.g. todoList)
        id: String,
        /// Target column: left, center or right
        column: Column,
        /// Place in front of this widget instead of at the end of the column
        #[arg(long, value_name = "ID")]
        before: Option<String>,
    },
    /// Restore the default layout
    Reset,
}

/// Actions for the `todo` subcommand.
#[derive(Subcommand)]
enum TodoAction {
    /// Add a to-do
    Add {
        /// What needs doing
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Deadline: RFC 3339, "YYYY-MM-DD HH:MM" (local time) or "YYYY-MM-DD"
        #[arg(long, value_name = "WHEN")]
        deadline: Option<String>,
    },
    /// List to-dos
    List(ListArgs),
    /// Change a to-do
    Edit {
        /// To-do id
        id: String,
        /// New text
        #[arg(long)]
        text: Option<String>,
        /// New deadline
        #[arg(long, value_name = "WHEN", conflicts_with = "clear_deadline")]
        deadline: Option<String>,
        /// Remove the deadline
        #[arg(long)]
        clear_deadline: bool,
        /// Mark as done
        #[arg(long, conflicts_with = "undone")]
        done: bool,
        /// Mark as not done
        #[arg(long)]
        undone: bool,
    },
    /// Flip a to-do between done and not done
    Toggle {
        /// To-do id
        id: String,
    },
    /// Delete a to-do
    Remove {
        /// To-do id
        id: String,
    },
    /// Mark several to-dos as done
    Complete {
        /// Mark as not done instead
        #[arg(long)]
        undo: bool,
        /// To-do ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Delete several to-dos
    Purge {
        /// To-do ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

/// Filters and format for `todo list`.
#[derive(Args)]
struct ListArgs {
    /// Only open to-dos whose deadline has passed
    #[arg(long, conflicts_with = "due_soon")]
    overdue: bool,
    /// Only open to-dos due within `tui.due_soon`
    #[arg(long)]
    due_soon: bool,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Actions for the `memo` subcommand.
#[derive(Subcommand)]
enum MemoAction {
    /// Add a memo
    Add {
        /// Memo content
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// List memos, oldest first
    List,
    /// Replace a memo's content
    Edit {
        /// Memo id
        id: String,
        /// New content
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Delete a memo
    Remove {
        /// Memo id
        id: String,
    },
    /// Delete all memos
    Clear,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let action = match cli.command {
        Commands::Config { action } => return run_config_command(action),
        other => other,
    };

    let config = match ConfigLoader::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.storage.resolved_data_dir());

    let is_tui = matches!(action, Commands::Tui);
    let log_result = if is_tui {
        let path = config
            .log
            .file_path()
            .unwrap_or_else(|| xdg::log_path_in(&data_dir));
        logging::init(config.log.level, LogTarget::File(&path))
    } else {
        logging::init(config.log.level, LogTarget::Stderr)
    };
    if let Err(e) = log_result {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    let storage: SharedStore = match FileStore::open(&data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Storage error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match action {
        Commands::Tui => {
            if let Err(e) = run_tui(&config, storage) {
                eprintln!("TUI error: {e}");
                return ExitCode::FAILURE;
            }
        }
        Commands::Layout { action } => {
            if let Err(e) = run_layout_command(storage, action) {
                eprintln!("Layout error: {e}");
                return ExitCode::FAILURE;
            }
        }
        Commands::Todo { action } => {
            let due_soon = match config.tui.due_soon() {
                Ok(window) => window,
                Err(e) => {
                    eprintln!("Config error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = run_todo_command(storage, action, due_soon) {
                eprintln!("To-do error: {e}");
                return ExitCode::FAILURE;
            }
        }
        Commands::Memo { action } => {
            if let Err(e) = run_memo_command(storage, action) {
                eprintln!("Memo error: {e}");
                return ExitCode::FAILURE;
            }
        }
        Commands::Config { .. } => {}
    }

    ExitCode::SUCCESS
}

/// Handles `config init|path|validate`. Never touches the data directory.
fn run_config_command(action: ConfigAction) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
            println!("Created configuration at {}", path.display());
        }),
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            Ok(())
        }
        ConfigAction::Validate => validate_config().map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the config file, which must exist, and checks every duration.
fn validate_config() -> Result<Config, ConfigError> {
    ConfigLoader::load_from_path(&xdg::config_path())
}

/// Starts the tokio runtime and runs the board until the user quits.
fn run_tui(config: &Config, storage: SharedStore) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = config.tui.tick_rate()?;
    let status = StatusLine::new(config.tui.toast_duration()?);
    let due_soon = config.tui.due_soon()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut app = App::new(storage, status, due_soon);
        app.run(tick_rate).await
    })?;
    Ok(())
}

fn run_layout_command(storage: SharedStore, action: LayoutAction) -> Result<(), BoardError> {
    let mut board = WidgetBoard::open(storage, WidgetCatalog::builtin(), Arc::new(LogNotifier));
    match action {
        LayoutAction::Show => print_layout(&board),
        LayoutAction::Move { id, column, before } => {
            match board.move_widget(&id, column, before.as_deref())? {
                DropOutcome::Moved => println!("Moved {id} to the {column} column"),
                _ => println!("{id} is already there"),
            }
            print_layout(&board);
        }
        LayoutAction::Reset => {
            board.reset_layout();
            println!("Layout reset to defaults");
            print_layout(&board);
        }
    }
    Ok(())
}

/// One line per column: `left    clock, calendar`.
fn print_layout(board: &WidgetBoard) {
    for view in board.columns() {
        let ids: Vec<String> = view
            .slots
            .iter()
            .map(|slot| {
                if slot.locked {
                    format!("{} [locked]", slot.placement.id)
                } else {
                    slot.placement.id.clone()
                }
            })
            .collect();
        println!("{:<7} {}", view.column.to_string(), ids.join(", "));
    }
}

fn run_todo_command(
    storage: SharedStore,
    action: TodoAction,
    due_soon: std::time::Duration,
) -> Result<(), TodoError> {
    let mut list = TodoList::load(storage)?;
    match action {
        TodoAction::Add { text, deadline } => {
            let deadline = parse_cli_deadline(deadline.as_deref())?;
            let todo = list.add(&text.join(" "), deadline)?;
            println!("Added {}", todo.id);
        }
        TodoAction::List(args) => {
            let now = Utc::now();
            let items: Vec<&Todo> = if args.overdue {
                list.overdue(now)
            } else if args.due_soon {
                list.due_soon(now, due_soon)
            } else {
                list.items().iter().collect()
            };
            if args.json {
                match serde_json::to_string_pretty(&items) {
                    Ok(json) => println!("{json}"),
                    Err(e) => tracing::error!("Failed to encode to-dos: {e}"),
                }
            } else if items.is_empty() {
                println!("No to-dos");
            } else {
                for todo in items {
                    println!("{}", format_todo(todo, now));
                }
            }
        }
        TodoAction::Edit {
            id,
            text,
            deadline,
            clear_deadline,
            done,
            undone,
        } => {
            let deadline = if clear_deadline {
                Some(None)
            } else {
                match deadline {
                    Some(input) => Some(parse_cli_deadline(Some(&input))?),
                    None => None,
                }
            };
            let completed = match (done, undone) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let patch = TodoPatch {
                text,
                completed,
                deadline,
            };
            let todo = list.update(&id, patch)?;
            println!("{}", format_todo(todo, Utc::now()));
        }
        TodoAction::Toggle { id } => {
            let completed = list.toggle(&id)?;
            println!("{id} is now {}", if completed { "done" } else { "open" });
        }
        TodoAction::Remove { id } => {
            let removed = list.remove(&id)?;
            println!("Removed {}: {}", removed.id, removed.text);
        }
        TodoAction::Complete { undo, ids } => {
            let changed = list.set_completed_batch(&ids, !undo)?;
            let state = if undo { "open" } else { "done" };
            println!("Marked {changed} to-do(s) {state}");
        }
        TodoAction::Purge { ids } => {
            let removed = list.remove_batch(&ids)?;
            println!("Removed {removed} to-do(s)");
        }
    }
    Ok(())
}

/// Naive deadlines typed on the command line are local time.
fn parse_cli_deadline(input: Option<&str>) -> Result<Option<DateTime<Utc>>, TodoError> {
    match input {
        Some(input) => parse_deadline(input, &Local),
        None => Ok(None),
    }
}

/// `<id>  [x] text  (due 2026-10-20 17:00)`
fn format_todo(todo: &Todo, now: DateTime<Utc>) -> String {
    let marker = if todo.completed {
        "[x]"
    } else if todo.is_overdue(now) {
        "[!]"
    } else {
        "[ ]"
    };
    let mut line = format!("{}  {} {}", todo.id, marker, todo.text);
    if let Some(deadline) = todo.deadline {
        let local = deadline.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        line.push_str(&format!("  (due {local})"));
    }
    line
}

fn run_memo_command(storage: SharedStore, action: MemoAction) -> Result<(), MemoError> {
    let mut pad = MemoPad::load(storage)?;
    match action {
        MemoAction::Add { content } => {
            let memo = pad.add(&content.join(" "))?;
            println!("Added {}", memo.id);
        }
        MemoAction::List => {
            if pad.list().is_empty() {
                println!("No memos");
            }
            for memo in pad.list() {
                let mut lines = memo.content.lines();
                println!("{}  {}", memo.id, lines.next().unwrap_or_default());
                for line in lines {
                    println!("    {line}");
                }
            }
        }
        MemoAction::Edit { id, content } => {
            let memo = pad.edit(&id, &content.join(" "))?;
            println!("Updated {}", memo.id);
        }
        MemoAction::Remove { id } => {
            let memo = pad.remove(&id)?;
            println!("Removed {}", memo.id);
        }
        MemoAction::Clear => {
            let removed = pad.clear()?;
            println!("Removed {removed} memo(s)");
        }
    }
    Ok(())
}
