//! Evaluation context for tracking nesting during recursive evaluation.

use crate::interpreter::EvalError;

/// Default limit on nested directive evaluations.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Evaluation context carried through one top-level call.
///
/// Every directive pushes its label before it runs and pops it when its
/// output is final, including the re-evaluation of that output. The stack
/// therefore names the chain of directives that led to the current one, and
/// its length is the current nesting depth.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Labels of the directives currently being evaluated, outermost first.
    call_stack: Vec<String>,
    /// Data categories of the keys being resolved, innermost last.
    categories: Vec<String>,
    /// Maximum allowed depth.
    max_depth: usize,
}

impl EvalContext {
    /// Create a context allowing at most `max_depth` nested directives.
    pub fn new(max_depth: usize) -> Self {
        Self {
            call_stack: Vec::new(),
            categories: Vec::new(),
            max_depth,
        }
    }

    /// Push a directive onto the stack.
    ///
    /// Returns [`EvalError::MaxDepthExceeded`] when the stack is already
    /// `max_depth` entries deep; the error carries the full chain including
    /// the rejected directive.
    pub fn push_call(&mut self, label: &str) -> Result<(), EvalError> {
        if self.call_stack.len() >= self.max_depth {
            let mut chain = self.call_stack.clone();
            chain.push(label.to_string());
            return Err(EvalError::MaxDepthExceeded {
                limit: self.max_depth,
                chain,
            });
        }
        self.call_stack.push(label.to_string());
        Ok(())
    }

    /// Pop the innermost directive.
    pub fn pop_call(&mut self) {
        self.call_stack.pop();
    }

    /// Enter the category of `key` (its first path segment) while the
    /// key's value is evaluated.
    pub fn enter_category(&mut self, key: &str) {
        let category = key.split_once('.').map_or(key, |(category, _)| category);
        self.categories.push(category.to_string());
    }

    /// Leave the innermost category.
    pub fn leave_category(&mut self) {
        self.categories.pop();
    }

    /// Category of the innermost key being resolved, if any.
    pub fn current_category(&self) -> Option<&str> {
        self.categories.last().map(String::as_str)
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Directive labels for error reporting, outermost first.
    pub fn call_stack(&self) -> &[String] {
        &self.call_stack
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
