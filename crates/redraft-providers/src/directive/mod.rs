//! Rewrite directives: what the provider is asked to do on one attempt.
//!
//! A directive carries the structured controls alongside a rendered prompt
//! so that both model-backed and rule-based providers can act on it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use redraft_core::{Controls, Level};

/// Instructions for a single rewrite attempt.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use redraft_core::Controls;
/// use redraft_providers::RewriteDirective;
///
/// let directive = RewriteDirective::new(&Controls::default(), vec!["(Smith, 2020)".into()])
///     .with_attempt(2)
///     .with_reinforcement(vec!["(Smith, 2020)".into()])
///     .with_time_budget(Duration::from_secs(10));
/// assert_eq!(directive.attempt(), 2);
/// assert!(directive.prompt().contains("\"(Smith, 2020)\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteDirective {
    formality: Level,
    concision: Level,
    variation: Level,
    protected: Vec<String>,
    #[serde(default)]
    reinforcement: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_flag: Option<String>,
    attempt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    time_budget_ms: u64,
}

impl RewriteDirective {
    /// Creates a first-attempt directive with no time limit.
    #[must_use]
    pub fn new(controls: &Controls, protected: Vec<String>) -> Self {
        Self {
            formality: controls.formality,
            concision: controls.concision,
            variation: controls.variation,
            protected,
            reinforcement: Vec::new(),
            output_flag: None,
            attempt: 1,
            instructions: None,
            time_budget_ms: u64::MAX,
        }
    }

    /// Sets the one-based attempt number.
    #[must_use]
    pub const fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = attempt;
        self
    }

    /// Restates literals the previous attempt failed to reproduce.
    #[must_use]
    pub fn with_reinforcement(mut self, literals: Vec<String>) -> Self {
        self.reinforcement = literals;
        self
    }

    /// Records why the previous attempt's output was rejected by screening.
    #[must_use]
    pub fn with_output_flag(mut self, flag: impl Into<String>) -> Self {
        self.output_flag = Some(flag.into());
        self
    }

    /// Forwards the user's own guidance.
    #[must_use]
    pub fn with_instructions(mut self, instructions: Option<&str>) -> Self {
        self.instructions = instructions.map(str::to_owned);
        self
    }

    /// Sets the wall-clock time left for this attempt.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Formality level.
    #[must_use]
    pub const fn formality(&self) -> Level {
        self.formality
    }

    /// Concision level.
    #[must_use]
    pub const fn concision(&self) -> Level {
        self.concision
    }

    /// Variation level.
    #[must_use]
    pub const fn variation(&self) -> Level {
        self.variation
    }

    /// Literals that must appear verbatim in the output.
    #[must_use]
    pub fn protected(&self) -> &[String] {
        &self.protected
    }

    /// Literals the previous attempt dropped.
    #[must_use]
    pub fn reinforcement(&self) -> &[String] {
        &self.reinforcement
    }

    /// Screening failure of the previous attempt, if any.
    #[must_use]
    pub fn output_flag(&self) -> Option<&str> {
        self.output_flag.as_deref()
    }

    /// One-based attempt number.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// User guidance, if any.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// Time left for this attempt.
    #[must_use]
    pub const fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Renders the directive as natural-language instructions.
    #[must_use]
    pub fn prompt(&self) -> String {
        let mut prompt = String::from(
            "Revise the text below for clarity and style. Preserve its meaning and every citation.\n",
        );
        prompt.push_str(&format!(
            "Formality: {}. Concision: {}. Variation: {}.\n",
            describe(self.formality),
            describe(self.concision),
            describe(self.variation),
        ));
        push_literals(
            &mut prompt,
            "Reproduce each of these passages exactly, character for character:",
            &self.protected,
        );
        push_literals(
            &mut prompt,
            "The previous attempt dropped these passages. Include every one verbatim:",
            &self.reinforcement,
        );
        if let Some(flag) = &self.output_flag {
            prompt.push_str(&format!(
                "The previous attempt was rejected ({flag}). Do not add hidden characters, \
                 look-alike letters, or notes about detection.\n"
            ));
        }
        if let Some(instructions) = &self.instructions {
            prompt.push_str(&format!("User guidance: {instructions}\n"));
        }
        prompt.push_str("Return only the revised text.");
        prompt
    }
}

const fn describe(level: Level) -> &'static str {
    match level {
        Level::Low => "keep as is",
        Level::Medium => "adjust moderately",
        Level::High => "adjust strongly",
    }
}

fn push_literals(prompt: &mut String, heading: &str, literals: &[String]) {
    if literals.is_empty() {
        return;
    }
    prompt.push_str(heading);
    prompt.push('\n');
    for literal in literals {
        prompt.push_str(&format!("- \"{literal}\"\n"));
    }
}
