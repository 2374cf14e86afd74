//! Prompt templates sent to the generation service.

use crate::language::Language;

/// Build the stylist prompt for a user query.
pub fn advice_prompt(query: &str, language: Language) -> String {
    format!(
        "{directive}. You are a friendly, professional fashion stylist.

User: \"{query}\"

Provide COMPLETE and DETAILED advice. Do not stop mid-sentence. Include:
1. Full outfit suggestions with specific items
2. Complete color combinations
3. All accessories recommendations
4. Complete styling tips

Make sure to finish all your thoughts and sentences completely.",
        directive = language.directive(),
    )
}

/// Build the trends prompt for a month label such as `October 2026`.
pub fn trends_prompt(language: Language, month: &str) -> String {
    format!(
        "{}. List 5 current fashion trends for {} with brief styling tips.",
        language.directive(),
        month
    )
}

/// Current local month in `%B %Y` form.
pub fn current_month() -> String {
    chrono::Local::now().format("%B %Y").to_string()
}
