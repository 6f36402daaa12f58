//! Post-conversation coaching analysis
//!
//! Renders a finished transcript and asks the backend for feedback in a fixed
//! five-section layout. The layout is requested, never enforced: whatever text
//! comes back is what the caller gets. [`FeedbackSections`] offers a lenient
//! structured reading of that text for callers that want it.

use crate::backend::Backend;
use crate::llm::{Message, Role, SamplingConfig};
use crate::prompts::{ANALYSIS_FALLBACK, ANALYSIS_PROMPT, ANALYSIS_REQUEST_PREFIX};
use serde::Serialize;

/// Section headers the coaching instruction asks for, in order
pub const FEEDBACK_SECTIONS: [&str; 5] = [
    "STRENGTHS",
    "AREAS FOR IMPROVEMENT",
    "CONVERSATION FLOW",
    "KEY TAKEAWAYS",
    "NEXT STEPS",
];

/// Bullets requested per section
pub const BULLETS_PER_SECTION: usize = 3;

#[derive(Clone)]
pub struct AnalysisEngine {
    backend: Backend,
}

impl AnalysisEngine {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Produce coaching feedback for a transcript
    pub async fn analyze(&self, messages: &[Message]) -> String {
        let transcript = render_transcript(messages);
        let request = vec![
            Message::system(ANALYSIS_PROMPT),
            Message::user(format!("{ANALYSIS_REQUEST_PREFIX}{transcript}")),
        ];

        self.backend
            .complete(request, SamplingConfig::ANALYSIS, ANALYSIS_FALLBACK)
            .await
    }
}

/// Render non-system messages as `User: ...` / `AI: ...` lines
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .filter_map(|m| match m.role {
            Role::System => None,
            Role::User => Some(format!("User: {}", m.content)),
            Role::Assistant => Some(format!("AI: {}", m.content)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Best-effort structured reading of coaching feedback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackSections {
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub conversation_flow: Vec<String>,
    pub key_takeaways: Vec<String>,
    pub next_steps: Vec<String>,
}

impl FeedbackSections {
    /// Collect bullets under each recognised header. Text outside a known
    /// section is ignored.
    pub fn parse(text: &str) -> Self {
        let mut sections = Self::default();
        let mut current: Option<usize> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(index) = header_index(line) {
                current = Some(index);
                continue;
            }
            let Some(bullet) = bullet_text(line) else {
                continue;
            };
            if let Some(index) = current {
                sections.section_mut(index).push(bullet.to_string());
            }
        }

        sections
    }

    /// All five sections present with exactly three bullets each
    pub fn is_complete(&self) -> bool {
        (0..FEEDBACK_SECTIONS.len()).all(|i| self.section(i).len() == BULLETS_PER_SECTION)
    }

    fn section(&self, index: usize) -> &Vec<String> {
        match index {
            0 => &self.strengths,
            1 => &self.areas_for_improvement,
            2 => &self.conversation_flow,
            3 => &self.key_takeaways,
            _ => &self.next_steps,
        }
    }

    fn section_mut(&mut self, index: usize) -> &mut Vec<String> {
        match index {
            0 => &mut self.strengths,
            1 => &mut self.areas_for_improvement,
            2 => &mut self.conversation_flow,
            3 => &mut self.key_takeaways,
            _ => &mut self.next_steps,
        }
    }
}

/// Match lines like `**STRENGTHS:**`, `## Next Steps`, `Key takeaways:`
fn header_index(line: &str) -> Option<usize> {
    let normalized: String = line
        .chars()
        .filter(|c| !matches!(c, '*' | '#' | ':' | '_'))
        .collect::<String>()
        .trim()
        .to_ascii_uppercase();

    FEEDBACK_SECTIONS.iter().position(|h| *h == normalized)
}

fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
        .map(str::trim)
        .filter(|b| !b.is_empty())
}
