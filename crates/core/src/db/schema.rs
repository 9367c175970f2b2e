pub const SCHEMA: &str = "
-- Core prompts table
CREATE TABLE IF NOT EXISTS prompts (
    id TEXT PRIMARY KEY,            -- UUID v4 string (seed rows use slugs)
    title TEXT NOT NULL,            -- Display title
    content TEXT NOT NULL,          -- The prompt text
    category_id TEXT,               -- categories.id, NULL = uncategorized
    tags TEXT NOT NULL DEFAULT '[]',-- JSON array of strings: [\"code\", \"debug\"]
    is_favorite INTEGER NOT NULL DEFAULT 0,
    usage_count INTEGER NOT NULL DEFAULT 0, -- Increment on use
    last_used_at INTEGER,           -- Unix timestamp (milliseconds)
    created_at INTEGER NOT NULL,    -- Unix timestamp (milliseconds)
    updated_at INTEGER NOT NULL     -- Unix timestamp (milliseconds)
);

-- Category tree, stored flat. parent_id may dangle after a parent is deleted.
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    parent_id TEXT,                 -- NULL = root
    icon TEXT,                      -- Presentation hint
    color TEXT                      -- Presentation hint
);

-- Indexes for performance
CREATE INDEX IF NOT EXISTS idx_prompts_category ON prompts(category_id);
CREATE INDEX IF NOT EXISTS idx_prompts_favorite ON prompts(is_favorite);
CREATE INDEX IF NOT EXISTS idx_prompts_updated ON prompts(updated_at DESC);
CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories(parent_id);
";
