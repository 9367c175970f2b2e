//! Read-only summary metrics over a library snapshot
//!
//! Each figure is derived on its own from the same inputs and none of them
//! can fail: degenerate inputs (no prompts, no tags, no usage) produce zeros
//! or empty lists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::db::{Category, Prompt};
use crate::util::tag_key;

/// Length of the "most used" list
pub const TOP_PROMPTS: usize = 5;
/// Length of the "top tags" list
pub const TOP_TAGS: usize = 8;
/// Bucket name for prompts without a (live) category
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_prompts:         usize,
    pub total_favorites:       usize,
    pub total_usage:           u64,
    pub total_categories:      usize,
    pub most_used:             Vec<Prompt>,
    pub category_distribution: Vec<CategoryShare>,
    pub top_tags:              Vec<TagCount>,
}

/// Prompt count for one category bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    /// `None` for the uncategorized bucket
    pub category_id: Option<String>,
    pub name:        String,
    pub color:       Option<String>,
    pub count:       usize,
    /// Whole percent of all prompts
    pub percentage:  u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag:   String,
    pub count: usize,
}

pub fn summarize(prompts: &[Prompt], categories: &[Category]) -> StatsSnapshot {
    StatsSnapshot {
        total_prompts:         prompts.len(),
        total_favorites:       prompts.iter().filter(|p| p.is_favorite).count(),
        total_usage:           prompts.iter().map(|p| u64::from(p.usage_count)).sum(),
        total_categories:      categories.len(),
        most_used:             most_used(prompts, TOP_PROMPTS),
        category_distribution: category_distribution(prompts, categories),
        top_tags:              top_tags(prompts, TOP_TAGS),
    }
}

/// Highest usage first; prompts never used are left out
pub fn most_used(prompts: &[Prompt], limit: usize) -> Vec<Prompt> {
    let mut used: Vec<&Prompt> = prompts.iter().filter(|p| p.usage_count > 0).collect();
    // stable: equal counts keep snapshot order
    used.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
    used.into_iter().take(limit).cloned().collect()
}

/// Prompt counts per category, largest first
///
/// Prompts with no category, or whose category is gone, share the
/// uncategorized bucket. Buckets with equal counts keep the order in which
/// they were first seen.
pub fn category_distribution(prompts: &[Prompt], categories: &[Category]) -> Vec<CategoryShare> {
    let by_id: HashMap<&str, &Category> = categories.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut slots: HashMap<Option<&str>, usize> = HashMap::new();
    let mut buckets: Vec<(Option<&Category>, usize)> = Vec::new();

    for prompt in prompts {
        let category = prompt
            .category_id
            .as_deref()
            .and_then(|id| by_id.get(id).copied());
        let key = category.map(|c| c.id.as_str());

        let slot = *slots.entry(key).or_insert_with(|| {
            buckets.push((category, 0));
            buckets.len() - 1
        });
        buckets[slot].1 += 1;
    }

    buckets.sort_by(|a, b| b.1.cmp(&a.1));

    let counts: Vec<usize> = buckets.iter().map(|(_, count)| *count).collect();
    let percentages = percentages(&counts, prompts.len());

    buckets
        .into_iter()
        .zip(percentages)
        .map(|((category, count), percentage)| match category {
            Some(category) => CategoryShare {
                category_id: Some(category.id.clone()),
                name: category.name.clone(),
                color: category.color.clone(),
                count,
                percentage,
            },
            None => CategoryShare {
                category_id: None,
                name: UNCATEGORIZED.to_string(),
                color: None,
                count,
                percentage,
            },
        })
        .collect()
}

/// Whole-number shares of `total`, rounded half up, never summing past 100
///
/// When rounding up several entries overshoots, the entries that were
/// rounded up by the most (smallest fractional part) give back one point
/// each until the sum is 100. A zero total yields zeros.
pub fn percentages(counts: &[usize], total: usize) -> Vec<u32> {
    if total == 0 {
        return vec![0; counts.len()];
    }

    let total = total as u64;
    let mut shares: Vec<u32> = Vec::with_capacity(counts.len());
    // remainder of count*100 / total, in units of 1/total percent
    let mut remainders: Vec<u64> = Vec::with_capacity(counts.len());

    for &count in counts {
        let scaled = count as u64 * 100;
        let rounded = (scaled * 2 + total) / (total * 2);
        shares.push(rounded as u32);
        remainders.push(scaled % total);
    }

    let sum: u32 = shares.iter().sum();
    if sum > 100 {
        let mut rounded_up: Vec<usize> = (0..counts.len())
            .filter(|&i| remainders[i] * 2 >= total && remainders[i] != 0)
            .collect();
        rounded_up.sort_by_key(|&i| remainders[i]);

        for i in rounded_up.into_iter().take((sum - 100) as usize) {
            shares[i] -= 1;
        }
    }

    shares
}

/// Most frequent tags, compared lowercased and trimmed; blanks ignored
///
/// Ties keep first-appearance order.
pub fn top_tags(prompts: &[Prompt], limit: usize) -> Vec<TagCount> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TagCount> = Vec::new();

    for tag in prompts.iter().flat_map(|p| p.tags.iter()) {
        let key = tag_key(tag);
        if key.is_empty() {
            continue;
        }
        match slots.get(&key) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push(TagCount { tag: key, count: 1 });
            },
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
