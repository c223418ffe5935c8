//! Style-template expansion applied to prompts before dispatch.

use crate::error::GenError;

/// Placeholder that marks where the original prompt goes in a template.
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// Default augmentation applied when a request sets the style flag.
pub const DEFAULT_TEMPLATE: &str =
    "Hyper-realistic {prompt}, cinematic lighting, 8k resolution, detailed facial features";

/// A prompt rewrite template. Substituting a prompt into the template is a
/// pure string transform: same input, same output, no side effects.
#[derive(Debug, Clone)]
pub struct StyleTemplate {
    template: String,
}

impl Default for StyleTemplate {
    fn default() -> Self {
        Self { template: DEFAULT_TEMPLATE.to_string() }
    }
}

impl StyleTemplate {
    /// Create a template from a configured string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string lacks the `{prompt}` placeholder,
    /// which would make every styled prompt identical.
    pub fn new(template: impl Into<String>) -> Result<Self, GenError> {
        let template = template.into();
        if !template.contains(PROMPT_PLACEHOLDER) {
            return Err(GenError::Config(format!(
                "style template must contain the {PROMPT_PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { template })
    }

    /// Rewrite a prompt. Identity when `styled` is false.
    #[must_use]
    pub fn rewrite(&self, prompt: &str, styled: bool) -> String {
        if styled {
            self.template.replace(PROMPT_PLACEHOLDER, prompt)
        } else {
            prompt.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstyled_is_identity() {
        let style = StyleTemplate::default();
        assert_eq!(style.rewrite("a cat", false), "a cat");
        assert_eq!(style.rewrite("", false), "");
        assert_eq!(style.rewrite("{prompt}", false), "{prompt}");
    }

    #[test]
    fn styled_substitutes_prompt() {
        let style = StyleTemplate::new("epic {prompt} at dawn").unwrap();
        assert_eq!(style.rewrite("a cat", true), "epic a cat at dawn");
    }

    #[test]
    fn styled_is_deterministic() {
        let style = StyleTemplate::default();
        assert_eq!(style.rewrite("a dog", true), style.rewrite("a dog", true));
    }

    #[test]
    fn default_template_embeds_prompt() {
        let style = StyleTemplate::default();
        let rewritten = style.rewrite("a wrestler", true);
        assert!(rewritten.contains("a wrestler"));
        assert!(rewritten.starts_with("Hyper-realistic"));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert!(StyleTemplate::new("no placeholder here").is_err());
    }
}
