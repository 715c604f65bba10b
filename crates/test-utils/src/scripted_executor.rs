use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use kubewait::exec::{BoxFuture, ExecutionOutcome, Invocation, ProcessExecutor};

/// Per-key scripted behaviour.
#[derive(Debug, Clone)]
enum Script {
    /// Pop one pass/fail per call; once empty, fall back to `then`.
    Sequence { steps: VecDeque<bool>, then: bool },
    /// Always return this outcome (command line is filled in per call).
    Fixed(ExecutionOutcome),
}

#[derive(Debug, Default)]
struct State {
    scripts: HashMap<String, Script>,
    invocations: Vec<Invocation>,
}

/// A fake executor that:
/// - records every invocation it receives
/// - answers from a script keyed by the command's **last argument** (the
///   resource type for probes)
/// - succeeds for anything unscripted, unless built with
///   [`ScriptedExecutor::failing_by_default`].
///
/// Clones share state, so a test can hand one clone to `Kubectl` and keep
/// another for assertions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    state: Arc<Mutex<State>>,
    default_success: Option<bool>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_by_default() -> Self {
        Self {
            default_success: Some(false),
            ..Self::default()
        }
    }

    /// Fail the first `k` calls for `key`, succeed afterwards.
    pub fn fail_times(self, key: &str, k: usize) -> Self {
        self.sequence(key, std::iter::repeat_n(false, k), true)
    }

    /// Fail every call for `key`.
    pub fn always_fail(self, key: &str) -> Self {
        self.sequence(key, [], false)
    }

    /// Explicit pass/fail steps, then `then` forever.
    pub fn sequence(self, key: &str, steps: impl IntoIterator<Item = bool>, then: bool) -> Self {
        self.state.lock().unwrap().scripts.insert(
            key.to_string(),
            Script::Sequence {
                steps: steps.into_iter().collect(),
                then,
            },
        );
        self
    }

    /// Answer every call for `key` with `outcome`.
    pub fn respond(self, key: &str, outcome: ExecutionOutcome) -> Self {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(key.to_string(), Script::Fixed(outcome));
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.state.lock().unwrap().invocations.clone()
    }

    /// Rendered command lines, in call order.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|inv| inv.spec.to_string())
            .collect()
    }

    /// How many calls had `key` as their last argument.
    pub fn calls_for(&self, key: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|inv| last_arg(inv) == key)
            .count()
    }

    fn answer(&self, invocation: &Invocation) -> ExecutionOutcome {
        let command = invocation.spec.to_string();
        let mut state = self.state.lock().unwrap();
        let key = last_arg(invocation);
        let default_success = self.default_success.unwrap_or(true);

        match state.scripts.get_mut(&key) {
            Some(Script::Fixed(outcome)) => ExecutionOutcome {
                command,
                ..outcome.clone()
            },
            Some(Script::Sequence { steps, then }) => {
                let ok = steps.pop_front().unwrap_or(*then);
                pass_fail(command, ok)
            }
            None => pass_fail(command, default_success),
        }
    }
}

fn last_arg(invocation: &Invocation) -> String {
    invocation
        .spec
        .arguments()
        .last()
        .cloned()
        .unwrap_or_default()
}

fn pass_fail(command: String, ok: bool) -> ExecutionOutcome {
    if ok {
        ExecutionOutcome::success(command)
    } else {
        ExecutionOutcome::failed(command, Some(1))
    }
}

impl ProcessExecutor for ScriptedExecutor {
    fn execute(&self, invocation: Invocation) -> BoxFuture<'_, ExecutionOutcome> {
        let outcome = self.answer(&invocation);
        self.state.lock().unwrap().invocations.push(invocation);
        Box::pin(async move { outcome })
    }
}
