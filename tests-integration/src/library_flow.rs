//! Full workflows: seed, browse, edit, copy, reorganize, reopen

use serde_json::json;

use crate::support::{ids, ok, open_at};

#[test]
fn test_seeded_views() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_at(&dir.path().join("seeded.db"), true);

    let marketing = ok(&mut library, "prompts.list", json!({"filter": "marketing", "search": ""}));
    assert_eq!(ids(&marketing), vec!["p1"]);

    let favorites = ok(&mut library, "prompts.list", json!({"filter": "favorites"}));
    assert_eq!(ids(&favorites), vec!["p1"]);

    let writing = ok(&mut library, "prompts.list", json!({"filter": "writing"}));
    assert!(ids(&writing).is_empty());
}

#[test]
fn test_copying_twice_counts_twice() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_at(&dir.path().join("usage.db"), true);

    let first = ok(&mut library, "prompts.use", json!({"id": "p1"}));
    assert_eq!(first["usageCount"], json!(1));
    let second = ok(&mut library, "prompts.use", json!({"id": "p1"}));
    assert_eq!(second["usageCount"], json!(2));

    let p1 = ok(&mut library, "prompts.get", json!({"id": "p1"}));
    let last_used = p1["prompt"]["lastUsedAt"].as_i64().unwrap();
    assert!(last_used >= p1["prompt"]["createdAt"].as_i64().unwrap());

    let stats = ok(&mut library, "stats.summary", json!({}));
    assert_eq!(stats["totalUsage"], json!(7));
    assert_eq!(stats["mostUsed"][0]["id"], json!("p2"));
    assert_eq!(stats["mostUsed"][1]["id"], json!("p1"));
}

#[test]
fn test_category_delete_cascade_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cascade.db");

    {
        let mut library = open_at(&path, true);
        let deleted = ok(&mut library, "categories.delete", json!({"id": "social-media"}));
        assert_eq!(deleted["uncategorized"], json!(1));
    }

    let mut library = open_at(&path, true);
    let categories = ok(&mut library, "categories.list", json!({}));
    let category_ids: Vec<&str> = categories["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(!category_ids.contains(&"social-media"));
    assert_eq!(category_ids.len(), 5);

    let p1 = ok(&mut library, "prompts.get", json!({"id": "p1"}));
    assert_eq!(p1["prompt"]["categoryId"], json!(null));

    let stats = ok(&mut library, "stats.summary", json!({}));
    let buckets = stats["categoryDistribution"].as_array().unwrap();
    assert!(buckets.iter().any(|b| b["name"] == json!("Uncategorized")));
    let total: u64 = buckets.iter().map(|b| b["percentage"].as_u64().unwrap()).sum();
    assert!(total <= 100);
}

#[test]
fn test_reorganize_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_at(&dir.path().join("tree.db"), true);

    let hooks = ok(
        &mut library,
        "categories.create",
        json!({"name": "Hooks", "parentId": "react"}),
    );
    let hooks_id = hooks["id"].as_str().unwrap().to_string();

    ok(
        &mut library,
        "prompts.create",
        json!({
            "title": "useEffect Explainer",
            "content": "Explain the dependency array of useEffect",
            "categoryId": hooks_id,
        }),
    );

    let coding = ok(&mut library, "prompts.list", json!({"filter": "coding"}));
    assert_eq!(ids(&coding).len(), 2);

    // Hooks under React under Coding: moving Coding below Hooks is a cycle
    let cycle = prompt_library_core::commands::call(
        &mut library,
        "categories.move",
        json!({"id": "coding", "parentId": hooks_id}),
    );
    assert_eq!(cycle["category"], json!("validation"));

    ok(
        &mut library,
        "categories.move",
        json!({"id": "react", "parentId": "writing"}),
    );
    let coding = ok(&mut library, "prompts.list", json!({"filter": "coding"}));
    assert!(ids(&coding).is_empty());
    let writing = ok(&mut library, "prompts.list", json!({"filter": "writing"}));
    assert_eq!(ids(&writing).len(), 2);
}

#[test]
fn test_recent_is_prefix_of_all() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recent.db");
    let mut library = prompt_library_core::setup(json!({
        "dbPath": path,
        "recentLimit": 3,
    }))
    .unwrap();

    for i in 0..5 {
        ok(
            &mut library,
            "prompts.create",
            json!({"title": format!("Prompt {}", i), "content": "body"}),
        );
    }

    let all = ids(&ok(&mut library, "prompts.list", json!({"filter": "all"})));
    let recent = ids(&ok(&mut library, "prompts.list", json!({"filter": "recent"})));

    assert_eq!(all.len(), 7);
    assert_eq!(recent.len(), 3);
    assert_eq!(&all[..3], &recent[..]);
}
