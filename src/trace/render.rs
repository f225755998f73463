use super::{Outcome, TraceEvent};

/// Width the `file:line` column is right-aligned to.
const LOCATION_WIDTH: usize = 28;

/// A traced rule with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub rule_id: u32,
    pub file: String,
    pub line: usize,
    pub content: String,
}

impl RuleInfo {
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

/// Six-line key for the outcome codes.
pub fn legend() -> Vec<String> {
    Outcome::ALL
        .iter()
        .map(|o| format!("  {} => {}", o.code(), o.meaning()))
        .collect()
}

/// One output line for a trail event. Rules the registry does not know are
/// rendered with a blank location.
pub fn render_event(event: TraceEvent, info: Option<&RuleInfo>) -> String {
    match event {
        TraceEvent::Fallthrough => format!("{} (fallthru)", Outcome::Fallthrough.code()),
        TraceEvent::Rule { outcome, .. } => {
            let (location, content) = match info {
                Some(info) => (info.location(), info.content.as_str()),
                None => (String::new(), ""),
            };
            format!(
                "{} {location:>width$} {content}",
                outcome.code(),
                width = LOCATION_WIDTH
            )
            .trim_end()
            .to_string()
        }
    }
}
