//! First-run sample data
//!
//! Seeding only happens while the categories table is empty; once any
//! category exists (including after the user deletes every seeded prompt)
//! nothing is inserted again.

use tracing::info;

use super::{categories, prompts, Category, Db, Prompt};
use crate::errors::Result;
use crate::util::now_millis;

fn category(id: &str, name: &str, parent_id: Option<&str>, icon: &str, color: &str) -> Category {
    Category {
        id:        id.to_string(),
        name:      name.to_string(),
        parent_id: parent_id.map(str::to_string),
        icon:      Some(icon.to_string()),
        color:     Some(color.to_string()),
    }
}

/// The built-in two-level category tree
pub fn seed_categories() -> Vec<Category> {
    vec![
        category("marketing", "Marketing", None, "megaphone", "blue"),
        category("social-media", "Social Media", Some("marketing"), "share", "indigo"),
        category("seo", "SEO", Some("marketing"), "search", "green"),
        category("coding", "Coding", None, "code", "slate"),
        category("react", "React", Some("coding"), "atom", "cyan"),
        category("writing", "Creative Writing", None, "pen-tool", "purple"),
    ]
}

/// The two sample prompts, stamped with `now`
pub fn seed_prompts(now: i64) -> Vec<Prompt> {
    vec![
        Prompt {
            id:           "p1".to_string(),
            title:        "Blog Post Generator".to_string(),
            content:      "Write a comprehensive blog post about [TOPIC]. structure it with an \
                           engaging introduction, 3 main points with examples, and a conclusion \
                           with a call to action. Tone: Professional yet accessible."
                .to_string(),
            category_id:  Some("social-media".to_string()),
            tags:         vec!["blog".to_string(), "content".to_string()],
            is_favorite:  true,
            usage_count:  0,
            last_used_at: None,
            created_at:   now,
            updated_at:   now,
        },
        Prompt {
            id:           "p2".to_string(),
            title:        "React Component Specialist".to_string(),
            content:      "Act as a Senior React Engineer. Create a functional component for \
                           [COMPONENT_NAME] using TypeScript and Tailwind CSS. Ensure \
                           accessibility (a11y) and handle loading/error states."
                .to_string(),
            category_id:  Some("react".to_string()),
            tags:         vec!["dev".to_string(), "frontend".to_string()],
            is_favorite:  false,
            usage_count:  5,
            last_used_at: None,
            created_at:   now,
            updated_at:   now,
        },
    ]
}

/// Insert the sample data if the library has no categories yet
///
/// Returns whether anything was inserted. The check and the inserts share
/// one transaction.
pub async fn seed_if_empty(db: &Db) -> Result<bool> {
    let mut tx = db.pool().begin().await?;

    if categories::count_categories(&mut *tx).await? > 0 {
        return Ok(false);
    }

    for category in seed_categories() {
        categories::put_category_with(&mut *tx, &category).await?;
    }
    for prompt in seed_prompts(now_millis()) {
        prompts::put_prompt_with(&mut *tx, &prompt).await?;
    }

    tx.commit().await?;
    info!("seeded empty library with sample categories and prompts");
    Ok(true)
}
