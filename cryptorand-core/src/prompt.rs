//! Guidance prompt steering a client toward the generator tools.

use crate::registry::Registry;

pub const PROMPT_DESCRIPTION: &str =
    "Help me generate random values using cryptographically secure methods";

/// Renders the `generate_random` prompt. Both arguments are optional hints
/// from the caller and are echoed back verbatim.
pub fn generate_random(registry: &Registry, kind: Option<&str>, requirements: Option<&str>) -> String {
    let mut out = String::from("I'll help you generate cryptographically secure random values.");
    if let Some(requirements) = requirements.filter(|s| !s.is_empty()) {
        out.push_str(&format!(" Requirements: {requirements}"));
    }
    if let Some(kind) = kind.filter(|s| !s.is_empty()) {
        out.push_str(&format!(" Type: {kind}"));
    }
    out.push_str(
        "\n\nI cannot produce true randomness myself, but I can call tools backed by \
         the operating system's cryptographically secure random number generator.\n\n\
         Available random generation tools:\n\n",
    );
    for (i, spec) in registry.list_operations().iter().enumerate() {
        out.push_str(&format!("{}. **{}** - {}\n", i + 1, spec.name, spec.description));
    }
    out.push_str("\nWhat type of random value would you like me to generate?");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_tool() {
        let registry = Registry::new();
        let text = generate_random(&registry, None, None);
        for spec in registry.list_operations() {
            assert!(text.contains(spec.name), "missing {}", spec.name);
        }
        assert!(!text.contains("Type:"));
        assert!(text.starts_with("I'll help you"));
    }

    #[test]
    fn test_echoes_hints() {
        let text = generate_random(&Registry::new(), Some("uuid"), Some("ten of them"));
        assert!(text.contains("Type: uuid"));
        assert!(text.contains("Requirements: ten of them"));
    }
}
