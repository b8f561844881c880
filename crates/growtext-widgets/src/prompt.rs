#![forbid(unsafe_code)]

//! Per-row prompt glyphs.
//!
//! A [`PromptRule`] maps a row's position to the string drawn in the prompt
//! column in front of it. Every prompt is fitted to the rule's fixed width so
//! the text column never shifts between rows.

use std::fmt;
use std::sync::Arc;

use growtext_core::text_width::truncate_to_width;

/// Where a row sits, as seen by a prompt rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptContext {
    /// Absolute visual row index.
    pub visual_row: usize,
    /// Logical line the row belongs to.
    pub line: usize,
    /// Soft-wrapped continuation of the line above.
    pub continuation: bool,
    /// The very first row of the document.
    pub first_in_document: bool,
}

type PromptFn = dyn Fn(&PromptContext) -> String + Send + Sync;

/// Produces the prompt for each visual row.
#[derive(Clone)]
pub struct PromptRule {
    func: Arc<PromptFn>,
    width: usize,
}

impl PromptRule {
    pub const DEFAULT_WIDTH: usize = 2;

    /// A rule from an arbitrary function. Output is fitted to `width` cells.
    pub fn new<F>(width: usize, func: F) -> Self
    where
        F: Fn(&PromptContext) -> String + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            width,
        }
    }

    /// `lead` on the first row of the document, `rest` everywhere else.
    #[must_use]
    pub fn lead(lead: impl Into<String>, rest: impl Into<String>) -> Self {
        let (lead, rest) = (lead.into(), rest.into());
        Self::new(Self::DEFAULT_WIDTH, move |ctx| {
            if ctx.first_in_document {
                lead.clone()
            } else {
                rest.clone()
            }
        })
    }

    /// `first` on the first row of every logical line, `wrapped` on soft
    /// continuations.
    #[must_use]
    pub fn per_line(first: impl Into<String>, wrapped: impl Into<String>) -> Self {
        let (first, wrapped) = (first.into(), wrapped.into());
        Self::new(Self::DEFAULT_WIDTH, move |ctx| {
            if ctx.continuation {
                wrapped.clone()
            } else {
                first.clone()
            }
        })
    }

    /// The same prompt on every row.
    #[must_use]
    pub fn fixed(prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        Self::new(Self::DEFAULT_WIDTH, move |_| prompt.clone())
    }

    /// Same rule, different fitted width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Prompt column width in cells.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The prompt for `ctx`, truncated or space-padded to exactly
    /// [`width`](Self::width) cells.
    #[must_use]
    pub fn prompt_for(&self, ctx: &PromptContext) -> String {
        let raw = (self.func)(ctx);
        let (fitted, used) = truncate_to_width(&raw, self.width);
        let mut out = String::with_capacity(self.width);
        out.push_str(fitted);
        out.extend(std::iter::repeat_n(' ', self.width - used));
        out
    }
}

impl Default for PromptRule {
    fn default() -> Self {
        Self::lead("> ", "  ")
    }
}

impl fmt::Debug for PromptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptRule")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(visual_row: usize, line: usize, continuation: bool) -> PromptContext {
        PromptContext {
            visual_row,
            line,
            continuation,
            first_in_document: visual_row == 0,
        }
    }

    #[test]
    fn default_leads_only_the_first_row() {
        let rule = PromptRule::default();
        assert_eq!(rule.prompt_for(&ctx(0, 0, false)), "> ");
        assert_eq!(rule.prompt_for(&ctx(1, 0, true)), "  ");
        assert_eq!(rule.prompt_for(&ctx(2, 1, false)), "  ");
    }

    #[test]
    fn per_line_marks_hard_lines() {
        let rule = PromptRule::per_line("│ ", "· ");
        assert_eq!(rule.prompt_for(&ctx(1, 0, true)), "· ");
        assert_eq!(rule.prompt_for(&ctx(2, 1, false)), "│ ");
    }

    #[test]
    fn prompts_are_fitted_to_width() {
        let rule = PromptRule::fixed(">>>>").with_width(3);
        assert_eq!(rule.prompt_for(&ctx(0, 0, false)), ">>>");
        let rule = PromptRule::fixed(">").with_width(3);
        assert_eq!(rule.prompt_for(&ctx(0, 0, false)), ">  ");
        let rule = PromptRule::fixed("中中").with_width(3);
        assert_eq!(rule.prompt_for(&ctx(0, 0, false)), "中 ");
    }

    #[test]
    fn zero_width_prompt_is_empty() {
        let rule = PromptRule::default().with_width(0);
        assert_eq!(rule.prompt_for(&ctx(0, 0, false)), "");
    }

    #[test]
    fn custom_rule_sees_context() {
        let rule = PromptRule::new(3, |ctx| format!("{}:", ctx.line + 1));
        assert_eq!(rule.prompt_for(&ctx(5, 1, false)), "2: ");
    }
}
