#[cfg(test)]
mod tests {
    use crate::db::categories::{
        delete_category, delete_category_cascade, get_category, list_categories, put_category,
    };
    use crate::db::prompts::{delete_prompt, get_prompt, list_prompts, put_prompt};
    use crate::db::seed::{seed_categories, seed_if_empty};
    use crate::db::{Category, Db, Prompt};
    use crate::errors::{LibraryError, Result};
    use tempfile::tempdir;

    fn sample_prompt(id: &str, updated_at: i64) -> Prompt {
        Prompt {
            id:           id.to_string(),
            title:        format!("Title {}", id),
            content:      "Test Content".to_string(),
            category_id:  None,
            tags:         vec!["tag1".into(), "tag2".into(), "tag1".into()],
            is_favorite:  false,
            usage_count:  0,
            last_used_at: None,
            created_at:   1_000,
            updated_at,
        }
    }

    fn sample_category(id: &str, parent: Option<&str>) -> Category {
        Category {
            id:        id.to_string(),
            name:      id.to_string(),
            parent_id: parent.map(String::from),
            icon:      None,
            color:     Some("gray".into()),
        }
    }

    #[tokio::test]
    async fn test_crud_operations() -> Result<()> {
        // Setup isolated DB
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("test_prompts.db")).await?;

        // 1. Put
        let prompt = sample_prompt("a", 2_000);
        put_prompt(&db, &prompt).await?;

        // 2. List
        let prompts = list_prompts(&db).await?;
        assert_eq!(prompts, vec![prompt.clone()]);
        assert_eq!(prompts[0].tags, vec!["tag1", "tag2", "tag1"]);

        // 3. Replace wholesale
        let mut edited = prompt.clone();
        edited.title = "Updated Title".into();
        edited.category_id = Some("somewhere".into());
        edited.is_favorite = true;
        edited.usage_count = 3;
        edited.last_used_at = Some(2_500);
        edited.updated_at = 3_000;
        put_prompt(&db, &edited).await?;
        put_prompt(&db, &edited).await?;

        let prompts = list_prompts(&db).await?;
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], edited);
        assert_eq!(get_prompt(&db, "a").await?, Some(edited));

        // 4. Delete, twice
        delete_prompt(&db, "a").await?;
        delete_prompt(&db, "a").await?;
        assert!(list_prompts(&db).await?.is_empty());
        assert_eq!(get_prompt(&db, "a").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_by_updated_desc() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("order.db")).await?;

        put_prompt(&db, &sample_prompt("old", 1_000)).await?;
        put_prompt(&db, &sample_prompt("new", 5_000)).await?;
        put_prompt(&db, &sample_prompt("mid", 3_000)).await?;

        let ids: Vec<String> = list_prompts(&db).await?.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_collections_do_not_alias() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("alias.db")).await?;

        put_prompt(&db, &sample_prompt("same", 1_000)).await?;
        put_category(&db, &sample_category("same", None)).await?;

        delete_category(&db, "same").await?;
        assert!(get_prompt(&db, "same").await?.is_some());
        assert!(get_category(&db, "same").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_category_put_keeps_listing_order() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("cats.db")).await?;

        put_category(&db, &sample_category("first", None)).await?;
        put_category(&db, &sample_category("second", Some("first"))).await?;

        let mut renamed = sample_category("first", None);
        renamed.name = "First!".into();
        put_category(&db, &renamed).await?;

        let categories = list_categories(&db).await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0], renamed);
        assert_eq!(categories[1].parent_id.as_deref(), Some("first"));
        Ok(())
    }

    #[tokio::test]
    async fn test_cascade_is_applied_together() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("cascade.db")).await?;

        put_category(&db, &sample_category("parent", None)).await?;
        put_category(&db, &sample_category("child", Some("parent"))).await?;

        let mut inside = sample_prompt("inside", 2_000);
        inside.category_id = Some("parent".into());
        let mut in_child = sample_prompt("in-child", 2_000);
        in_child.category_id = Some("child".into());
        put_prompt(&db, &inside).await?;
        put_prompt(&db, &in_child).await?;

        assert_eq!(delete_category_cascade(&db, "parent").await?, 1);

        let inside = get_prompt(&db, "inside").await?.unwrap();
        assert_eq!(inside.category_id, None);
        assert!(inside.updated_at >= 2_000);

        let in_child = get_prompt(&db, "in-child").await?.unwrap();
        assert_eq!(in_child.category_id.as_deref(), Some("child"));

        let categories = list_categories(&db).await?;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].parent_id.as_deref(), Some("parent"));
        Ok(())
    }

    #[tokio::test]
    async fn test_cascade_never_moves_updated_at_back() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("clock.db")).await?;

        // Stamped by a clock running ahead of ours
        let ahead = i64::MAX / 2;
        put_category(&db, &sample_category("parent", None)).await?;
        let mut prompt = sample_prompt("ahead", ahead);
        prompt.category_id = Some("parent".into());
        put_prompt(&db, &prompt).await?;

        delete_category_cascade(&db, "parent").await?;

        let prompt = get_prompt(&db, "ahead").await?.unwrap();
        assert_eq!(prompt.category_id, None);
        assert_eq!(prompt.updated_at, ahead);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() -> Result<()> {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path().join("seed.db")).await?;

        assert!(seed_if_empty(&db).await?);
        assert!(!seed_if_empty(&db).await?);

        assert_eq!(list_categories(&db).await?, seed_categories());
        assert_eq!(list_prompts(&db).await?.len(), 2);
        let p1 = get_prompt(&db, "p1").await?.unwrap();
        assert!(p1.content.starts_with("Write a comprehensive blog post about [TOPIC]. structure it"));

        // Removing prompts does not bring the samples back
        delete_prompt(&db, "p1").await?;
        delete_prompt(&db, "p2").await?;
        assert!(!seed_if_empty(&db).await?);
        assert!(list_prompts(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_open_creates_missing_directory() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("library.db");
        let db = Db::open(&path).await?;
        assert!(path.exists());
        db.close().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_open_under_regular_file_is_storage_failure() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plainfile");
        std::fs::write(&file, b"not a directory").unwrap();

        let err = Db::open(file.join("sub").join("library.db")).await.unwrap_err();
        assert!(matches!(err, LibraryError::IoError(_)));
        assert_eq!(err.category(), "storage");
    }
}
