//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction, LayoutAction, MemoAction, TodoAction};
use clap::{CommandFactory, Parser};
use deskboard::Column;
use std::path::PathBuf;

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn test_command_is_required() {
    assert!(Cli::try_parse_from(["deskboard"]).is_err());
}

#[test]
fn test_data_dir_is_global() {
    let cli = Cli::try_parse_from(["deskboard", "todo", "list", "--data-dir", "/tmp/board"])
        .expect("should parse");
    assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/board")));
    assert!(matches!(cli.command, Commands::Todo { .. }));
}

#[test]
fn test_data_dir_defaults_to_none() {
    let cli = Cli::try_parse_from(["deskboard", "tui"]).expect("should parse");
    assert!(cli.data_dir.is_none());
    assert!(matches!(cli.command, Commands::Tui));
}

// --- layout ---

#[test]
fn test_layout_move_parses_column() {
    let cli = Cli::try_parse_from(["deskboard", "layout", "move", "todoList", "right"])
        .expect("should parse");
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Move { id, column, before },
        } => {
            assert_eq!(id, "todoList");
            assert_eq!(column, Column::Right);
            assert!(before.is_none());
        }
        _ => panic!("expected layout move"),
    }
}

#[test]
fn test_layout_move_with_before() {
    let cli = Cli::try_parse_from([
        "deskboard", "layout", "move", "memo", "center", "--before", "addTodo",
    ])
    .expect("should parse");
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Move { before, column, .. },
        } => {
            assert_eq!(column, Column::Center);
            assert_eq!(before.as_deref(), Some("addTodo"));
        }
        _ => panic!("expected layout move"),
    }
}

#[test]
fn test_layout_move_rejects_unknown_column() {
    let result = Cli::try_parse_from(["deskboard", "layout", "move", "memo", "middle"]);
    assert!(result.is_err());
}

#[test]
fn test_layout_without_action_fails() {
    assert!(Cli::try_parse_from(["deskboard", "layout"]).is_err());
}

// --- todo ---

#[test]
fn test_todo_add_joins_words() {
    let cli = Cli::try_parse_from([
        "deskboard",
        "todo",
        "add",
        "buy",
        "milk",
        "--deadline",
        "2026-10-20",
    ])
    .expect("should parse");
    match cli.command {
        Commands::Todo {
            action: TodoAction::Add { text, deadline },
        } => {
            assert_eq!(text, vec!["buy", "milk"]);
            assert_eq!(deadline.as_deref(), Some("2026-10-20"));
        }
        _ => panic!("expected todo add"),
    }
}

#[test]
fn test_todo_add_requires_text() {
    assert!(Cli::try_parse_from(["deskboard", "todo", "add"]).is_err());
}

#[test]
fn test_todo_list_filters_conflict() {
    let result = Cli::try_parse_from(["deskboard", "todo", "list", "--overdue", "--due-soon"]);
    assert!(result.is_err());
}

#[test]
fn test_todo_list_json() {
    let cli = Cli::try_parse_from(["deskboard", "todo", "list", "--overdue", "--json"])
        .expect("should parse");
    match cli.command {
        Commands::Todo {
            action: TodoAction::List(args),
        } => {
            assert!(args.overdue);
            assert!(!args.due_soon);
            assert!(args.json);
        }
        _ => panic!("expected todo list"),
    }
}

#[test]
fn test_todo_edit_deadline_conflicts_with_clear() {
    let result = Cli::try_parse_from([
        "deskboard",
        "todo",
        "edit",
        "abc",
        "--deadline",
        "2026-10-20",
        "--clear-deadline",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_todo_edit_done_conflicts_with_undone() {
    let result = Cli::try_parse_from(["deskboard", "todo", "edit", "abc", "--done", "--undone"]);
    assert!(result.is_err());
}

#[test]
fn test_todo_complete_collects_ids() {
    let cli = Cli::try_parse_from(["deskboard", "todo", "complete", "--undo", "a", "b"])
        .expect("should parse");
    match cli.command {
        Commands::Todo {
            action: TodoAction::Complete { undo, ids },
        } => {
            assert!(undo);
            assert_eq!(ids, vec!["a", "b"]);
        }
        _ => panic!("expected todo complete"),
    }
}

#[test]
fn test_todo_purge_requires_ids() {
    assert!(Cli::try_parse_from(["deskboard", "todo", "purge"]).is_err());
}

// --- memo ---

#[test]
fn test_memo_edit() {
    let cli = Cli::try_parse_from(["deskboard", "memo", "edit", "m1", "new", "text"])
        .expect("should parse");
    match cli.command {
        Commands::Memo {
            action: MemoAction::Edit { id, content },
        } => {
            assert_eq!(id, "m1");
            assert_eq!(content.join(" "), "new text");
        }
        _ => panic!("expected memo edit"),
    }
}

#[test]
fn test_memo_clear() {
    let cli = Cli::try_parse_from(["deskboard", "memo", "clear"]).expect("should parse");
    assert!(matches!(
        cli.command,
        Commands::Memo {
            action: MemoAction::Clear
        }
    ));
}

// --- config ---

#[test]
fn test_config_init_force() {
    let cli = Cli::try_parse_from(["deskboard", "config", "init", "--force"])
        .expect("should parse");
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("expected config init"),
    }
}

#[test]
fn test_config_without_action_fails() {
    assert!(Cli::try_parse_from(["deskboard", "config"]).is_err());
}

#[test]
fn test_subcommands_in_help() {
    let cmd = Cli::command();
    for name in ["tui", "layout", "todo", "memo", "config"] {
        assert!(
            cmd.get_subcommands().any(|sc| sc.get_name() == name),
            "{name} subcommand should exist"
        );
    }
}
