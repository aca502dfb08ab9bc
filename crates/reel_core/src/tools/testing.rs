//! Scripted [`CommandRunner`] for unit tests.

use std::cell::RefCell;

use super::runner::{CommandRunner, Invocation};
use super::types::{CommandOutput, ToolResult};

/// Records every invocation and answers it with a scripted handler.
pub struct FakeRunner<F>
where
    F: Fn(&Invocation) -> CommandOutput,
{
    handler: F,
    calls: RefCell<Vec<Invocation>>,
}

impl<F> FakeRunner<F>
where
    F: Fn(&Invocation) -> CommandOutput,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// All invocations seen so far.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Number of invocations of `tool`.
    pub fn calls_to(&self, tool: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.tool() == tool).count()
    }

    fn answer(&self, invocation: &Invocation) -> CommandOutput {
        self.calls.borrow_mut().push(invocation.clone());
        (self.handler)(invocation)
    }
}

impl<F> CommandRunner for FakeRunner<F>
where
    F: Fn(&Invocation) -> CommandOutput,
{
    fn capture(&self, invocation: &Invocation) -> ToolResult<CommandOutput> {
        Ok(self.answer(invocation))
    }

    fn stream(&self, invocation: &Invocation) -> ToolResult<i32> {
        Ok(self.answer(invocation).exit_code)
    }
}
