use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use super::Tool;

/// Registry for tools, keyed by name
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Name, description and parameter schema of every tool, as a host
    /// would receive them at registration.
    pub fn definitions(&self) -> Value {
        Value::Array(
            self.tools
                .values()
                .map(|tool| {
                    json!({
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.schema(),
                    })
                })
                .collect(),
        )
    }

    /// Call a tool by name; unknown names produce an `Error: ...` result
    /// like any other failure.
    pub async fn invoke(&self, name: &str, params: Value) -> String {
        match self.get(name) {
            Some(tool) => tool.invoke(params).await,
            None => format!("Error: unknown tool '{name}'"),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
