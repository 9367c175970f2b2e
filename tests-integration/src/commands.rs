//! Integration tests for command dispatch and handlers

use prompt_library_core::commands;
use serde_json::json;

use crate::support::{ids, ok, open_at};

#[test]
fn test_ping_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_at(&dir.path().join("ping.db"), true);

    let result = commands::dispatch(&mut library, "ping", json!({"message": "hello"})).unwrap();

    assert_eq!(result["pong"], json!(true));
    assert_eq!(result["message"], json!("hello"));
}

#[test]
fn test_command_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_at(&dir.path().join("missing.db"), true);

    let result = commands::dispatch(&mut library, "nonexistent_command", json!({}));
    assert!(result.is_err());

    let value = commands::call(&mut library, "nonexistent_command", json!({}));
    assert_eq!(value["error"], json!(true));
    assert_eq!(value["category"], json!("command"));
}

#[test]
fn test_list_commands() {
    let commands = commands::list_commands();

    assert!(!commands.is_empty());
    assert!(commands.contains(&"ping".to_string()));
    assert!(commands.contains(&"prompts.use".to_string()));
    assert!(commands.contains(&"categories.tree".to_string()));
}

#[test]
fn test_search_matches_title_and_tag_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_at(&dir.path().join("search.db"), false);

    for (title, tags) in [
        ("SEO Blog Generator", json!([])),
        ("Keyword Brainstorm", json!(["seo"])),
        ("Haiku Writer", json!(["poetry"])),
    ] {
        ok(
            &mut library,
            "prompts.create",
            json!({"title": title, "content": "Do the thing", "tags": tags}),
        );
    }

    let listing = ok(&mut library, "prompts.list", json!({"filter": "all", "search": "seo"}));
    let mut found = ids(&listing);
    found.sort();
    assert_eq!(found.len(), 2);

    let titles: Vec<&str> = listing["prompts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"SEO Blog Generator"));
    assert!(titles.contains(&"Keyword Brainstorm"));
}

#[test]
fn test_validation_error_object() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_at(&dir.path().join("validation.db"), true);

    let value = commands::call(
        &mut library,
        "prompts.create",
        json!({"title": "", "content": "body"}),
    );
    assert_eq!(value["error"], json!(true));
    assert_eq!(value["category"], json!("validation"));

    let value = commands::call(&mut library, "prompts.create", json!({"content": "body"}));
    assert_eq!(value["category"], json!("arguments"));

    let value = commands::call(
        &mut library,
        "categories.create",
        json!({"name": "   "}),
    );
    assert_eq!(value["category"], json!("validation"));
}
