/// Number of trailing history entries embedded in the prompt
pub const HISTORY_WINDOW: usize = 5;

const EMPTY_HISTORY: &str = "none";

/// Renders the instruction prompt sent to the vision model.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the prompt for a cursor position and the recent action history.
    ///
    /// Only the last [`HISTORY_WINDOW`] entries are used, in their original
    /// order. The response parser relies on the "ONLY a JSON object" wording.
    pub fn build(cursor_x: i32, cursor_y: i32, history: &[String]) -> String {
        let history = Self::render_history(history);
        format!(
            r#"You are an AI assistant that predicts the user's next action on their desktop.

Looking at this screenshot, the cursor is at position ({cursor_x}, {cursor_y}).

Recent actions: {history}

Predict the SINGLE most likely next action:
- If the cursor is in/near a text field, search bar, terminal, or code editor: predict TEXT to type
- If the cursor is over a button, link, or clickable UI element: predict a CLICK

Respond with ONLY a JSON object:
- For text: {{"action_type": "text", "text": "<text to type>", "confidence": <0.0-1.0>}}
- For click: {{"action_type": "click", "x": <number>, "y": <number>, "confidence": <0.0-1.0>}}

JSON response:"#
        )
    }

    fn render_history(history: &[String]) -> String {
        if history.is_empty() {
            return EMPTY_HISTORY.to_string();
        }
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        history[start..].join(", ")
    }
}
