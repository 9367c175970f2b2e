use serde_json::{json, Value};

use crate::errors::Result;
use crate::library::PromptLibrary;

pub fn summary(library: &mut PromptLibrary, _args: Value) -> Result<Value> {
    Ok(json!(library.stats()))
}
