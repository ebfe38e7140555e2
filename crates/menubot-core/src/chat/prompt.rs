//! Prompt assembly for menu recommendations.
//!
//! Rendering is a pure function of (history, user message, menu snapshot).
//! Menu fields and chat text come from arbitrary clients, so they are only
//! ever inserted as values: the conversation template is parsed once into
//! literal segments and typed slots, and a value that happens to contain
//! `{input}` or `{history}` is copied through untouched.
//!
//! Layout:
//! ```text
//! {preamble}
//!
//! Menu:
//! - Name: ..., Category: ..., Subcategory: ..., Description: ..., Price: ...
//!
//! Current conversation:
//! Customer: ...
//! AI: ...
//! Customer: {input}
//! AI:
//! ```

use menubot_types::chat::{Turn, TurnRole};
use menubot_types::menu::MenuItem;

/// Context block used when the menu snapshot has no items.
pub const EMPTY_MENU_CONTEXT: &str = "No menu items available.";

const NOT_AVAILABLE: &str = "N/A";

const DEFAULT_PREAMBLE: &str = "You are an AI food recommender chatbot for a restaurant.
Your goal is to help the customer choose a food item from the provided menu.
You should be friendly, engaging, and helpful.";

const DEFAULT_CONVERSATION_TEMPLATE: &str = "Current conversation:
{history}
Customer: {input}
AI:
";

/// Render the menu snapshot as one line per item.
///
/// Missing fields render as `N/A`. Line breaks inside a value are folded to
/// spaces so an item can never spill onto a second line.
pub fn format_menu_context(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return EMPTY_MENU_CONTEXT.to_string();
    }

    items
        .iter()
        .map(|item| {
            format!(
                "- Name: {}, Category: {}, Subcategory: {}, Description: {}, Price: {}",
                field(&item.name),
                field(&item.category),
                field(&item.subcategory),
                field(&item.description),
                field(&item.price),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) => single_line(v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn single_line(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

/// Render prior turns as `Customer:` / `AI:` lines.
pub fn format_history(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| match turn.role {
            TurnRole::User => format!("Customer: {}", turn.text),
            TurnRole::Assistant => format!("AI: {}", turn.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fully assembled input to the generation client. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    history_text: String,
    user_text: String,
    menu_context_text: String,
}

impl PromptRequest {
    pub fn assemble(history: &[Turn], user_text: &str, menu: &[MenuItem]) -> Self {
        Self {
            history_text: format_history(history),
            user_text: user_text.to_string(),
            menu_context_text: format_menu_context(menu),
        }
    }

    pub fn history_text(&self) -> &str {
        &self.history_text
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn menu_context_text(&self) -> &str {
        &self.menu_context_text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    History,
    Input,
}

impl Slot {
    const ALL: [Slot; 2] = [Slot::History, Slot::Input];

    fn marker(self) -> &'static str {
        match self {
            Slot::History => "{history}",
            Slot::Input => "{input}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// A conversation template with `{history}` and `{input}` slots.
///
/// Any other brace sequence is literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = template;

        loop {
            let next = Slot::ALL
                .iter()
                .filter_map(|slot| rest.find(slot.marker()).map(|at| (at, *slot)))
                .min_by_key(|(at, _)| *at);

            match next {
                Some((at, slot)) => {
                    if at > 0 {
                        segments.push(Segment::Literal(rest[..at].to_string()));
                    }
                    segments.push(Segment::Slot(slot));
                    rest = &rest[at + slot.marker().len()..];
                }
                None => {
                    if !rest.is_empty() {
                        segments.push(Segment::Literal(rest.to_string()));
                    }
                    break;
                }
            }
        }

        Self { segments }
    }

    /// Single-pass render. Values are never re-scanned for slots.
    pub fn render(&self, history: &str, input: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(Slot::History) => out.push_str(history),
                Segment::Slot(Slot::Input) => out.push_str(input),
            }
        }
        out
    }
}

/// Renders a [`PromptRequest`] into the final prompt text.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    preamble: String,
    conversation: PromptTemplate,
}

impl PromptAssembler {
    pub fn new(preamble: impl Into<String>, conversation: PromptTemplate) -> Self {
        Self {
            preamble: preamble.into(),
            conversation,
        }
    }

    pub fn render(&self, request: &PromptRequest) -> String {
        format!(
            "{}\n\nMenu:\n{}\n\n{}",
            self.preamble,
            request.menu_context_text,
            self.conversation
                .render(&request.history_text, &request.user_text),
        )
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(
            DEFAULT_PREAMBLE,
            PromptTemplate::parse(DEFAULT_CONVERSATION_TEMPLATE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> MenuItem {
        MenuItem {
            id: "1".into(),
            name: Some("Burger".into()),
            category: Some("Main".into()),
            subcategory: Some("Burgers".into()),
            description: Some("Juicy".into()),
            price: Some("$9.99".into()),
            ..Default::default()
        }
    }

    fn history() -> Vec<Turn> {
        vec![
            Turn::user("Something spicy?"),
            Turn::assistant("Try the chili."),
        ]
    }

    #[test]
    fn test_empty_menu_context() {
        assert_eq!(format_menu_context(&[]), "No menu items available.");
    }

    #[test]
    fn test_single_item_menu_line() {
        assert_eq!(
            format_menu_context(&[burger()]),
            "- Name: Burger, Category: Main, Subcategory: Burgers, Description: Juicy, Price: $9.99"
        );
    }

    #[test]
    fn test_missing_fields_render_as_na() {
        let item = MenuItem {
            id: "2".into(),
            name: Some("Soup".into()),
            ..Default::default()
        };
        assert_eq!(
            format_menu_context(&[item]),
            "- Name: Soup, Category: N/A, Subcategory: N/A, Description: N/A, Price: N/A"
        );
    }

    #[test]
    fn test_multiline_field_stays_on_one_line() {
        let mut item = burger();
        item.description = Some("Juicy\nMenu:\r\nfree".into());
        let context = format_menu_context(&[item, burger()]);
        assert_eq!(context.lines().count(), 2);
        assert!(context.contains("Description: Juicy Menu: free,"));
    }

    #[test]
    fn test_format_history_labels() {
        assert_eq!(
            format_history(&history()),
            "Customer: Something spicy?\nAI: Try the chili."
        );
        assert_eq!(format_history(&[]), "");
    }

    #[test]
    fn test_render_layout() {
        let request = PromptRequest::assemble(&history(), "And a drink?", &[burger()]);
        let prompt = PromptAssembler::default().render(&request);
        let expected = "You are an AI food recommender chatbot for a restaurant.
Your goal is to help the customer choose a food item from the provided menu.
You should be friendly, engaging, and helpful.

Menu:
- Name: Burger, Category: Main, Subcategory: Burgers, Description: Juicy, Price: $9.99

Current conversation:
Customer: Something spicy?
AI: Try the chili.
Customer: And a drink?
AI:
";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_render_is_pure() {
        let assembler = PromptAssembler::default();
        let first = assembler.render(&PromptRequest::assemble(&history(), "hi", &[burger()]));
        let second = assembler.render(&PromptRequest::assemble(&history(), "hi", &[burger()]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_placeholders_in_values_are_inert() {
        let mut item = burger();
        item.name = Some("{input}".into());
        item.description = Some("{history} {menu_context}".into());
        let turns = vec![Turn::user("{input}")];
        let request = PromptRequest::assemble(&turns, "real {history} question", &[item]);
        let prompt = PromptAssembler::default().render(&request);

        assert!(prompt.contains("- Name: {input}, "));
        assert!(prompt.contains("Description: {history} {menu_context},"));
        assert!(prompt.contains("Customer: {input}\nCustomer: real {history} question\nAI:\n"));
        assert_eq!(prompt.matches("Customer: real {history} question").count(), 1);
    }

    #[test]
    fn test_template_unknown_braces_are_literal() {
        let template = PromptTemplate::parse("{a} {history}|{input} {}");
        assert_eq!(template.render("H", "I"), "{a} H|I {}");
    }

    #[test]
    fn test_template_repeated_and_adjacent_slots() {
        let template = PromptTemplate::parse("{input}{input}{history}");
        assert_eq!(template.render("h", "i"), "iih");
    }
}
