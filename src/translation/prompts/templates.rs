/*!
 * System prompt templates.
 *
 * Placeholders: `{source_language}`, `{target_language}` and
 * `{preserved_terms}` (a comma-separated list, or "none").
 */

/// System prompt template for quest-book translation.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default system prompt for quest-book translation.
    pub const QUEST_BOOK_TRANSLATOR: &'static str = r#"You translate Minecraft modpack quest-book text from {source_language} to {target_language}.

## Rules
- Output ONLY the translation of the text you are given
- Never add a preamble such as "Here is the translation" or "Translated as follows"
- Never answer with acknowledgements ("Yes", "Understood"), apologies, questions or explanations
- Do not start the output with a line break
- Keep Minecraft formatting codes such as &a, &b, &f and &r exactly where they are
- Keep leading symbols and list markers such as "- " exactly as in the input
- Do not add information that is not in the input
- Keep mod names, item names, block names, place names and mob names in their original form
- If you cannot translate the text, return an empty response

## Terms that must never be translated
{preserved_terms}"#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default quest-book translator template.
    pub fn quest_book_translator() -> Self {
        Self::new(Self::QUEST_BOOK_TRANSLATOR)
    }

    /// Render the template with the given variables.
    pub fn render(&self, source_language: &str, target_language: &str, preserved_terms: &[String]) -> String {
        let terms = if preserved_terms.is_empty() {
            "none".to_string()
        } else {
            preserved_terms.join(", ")
        };

        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
            .replace("{preserved_terms}", &terms)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::quest_book_translator()
    }
}
