use std::{
    cell::RefCell,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Waker},
};

use crate::action::{Action, ActionRequestQueue};

pub(crate) use self::tasks::*;

mod helpers;
mod tasks;

/// Lightweight async flow executor for UI orchestration.
///
/// Polled from the app update loop; drives flow futures that await the
/// session and profile capabilities and request UI actions.
pub(crate) struct FlowExecutor {
    state: Rc<RefCell<FlowState>>,
    tasks: Vec<FlowTask>,
}

impl std::fmt::Debug for FlowExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowExecutor")
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl Default for FlowExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowExecutor {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FlowState::default())),
            tasks: Vec::new(),
        }
    }

    /// Returns a handle for flows to request actions.
    #[must_use]
    pub(crate) fn handle(&self) -> FlowHandle {
        FlowHandle {
            state: Rc::clone(&self.state),
        }
    }

    /// Returns true if no flows are currently running.
    #[must_use]
    pub(crate) fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Spawn a new flow future.
    pub(crate) fn spawn(&mut self, future: impl Future<Output = ()> + 'static) {
        self.tasks.push(FlowTask {
            future: Box::pin(future),
        });
    }

    /// Poll all active flows and drain any queued actions into the UI action queue.
    pub(crate) fn poll(&mut self, action_queue: &mut ActionRequestQueue) {
        self.drain_actions(action_queue);

        let mut cx = Context::from_waker(Waker::noop());

        let mut i = 0;
        while i < self.tasks.len() {
            let task = &mut self.tasks[i];
            if task.future.as_mut().poll(&mut cx).is_ready() {
                self.tasks.swap_remove(i);
            } else {
                i += 1;
            }
        }

        self.drain_actions(action_queue);
    }

    fn drain_actions(&mut self, action_queue: &mut ActionRequestQueue) {
        let mut state = self.state.borrow_mut();
        for action in state.pending_actions.drain(..) {
            action_queue.request(action);
        }
    }
}

/// Handle used by flows and session listeners to request actions.
#[derive(Clone)]
pub(crate) struct FlowHandle {
    state: Rc<RefCell<FlowState>>,
}

impl FlowHandle {
    pub(crate) fn request_action(&self, action: Action) {
        self.state.borrow_mut().pending_actions.push(action);
    }
}

struct FlowTask {
    future: Pin<Box<dyn Future<Output = ()>>>,
}

#[derive(Default)]
struct FlowState {
    pending_actions: Vec<Action>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, FlowAction};

    #[test]
    fn poll_runs_ready_flows_and_drains_actions() {
        let mut executor = FlowExecutor::new();
        let handle = executor.handle();
        executor.spawn(async move {
            handle.request_action(FlowAction::SignOut.into());
        });
        assert!(!executor.is_idle());

        let mut queue = ActionRequestQueue::default();
        executor.poll(&mut queue);

        assert!(executor.is_idle());
        let actions = queue.take_all();
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::Flow(FlowAction::SignOut)));
    }

    #[test]
    fn actions_requested_outside_flows_are_drained() {
        let mut executor = FlowExecutor::new();
        executor
            .handle()
            .request_action(FlowAction::SignInAnonymously.into());

        let mut queue = ActionRequestQueue::default();
        executor.poll(&mut queue);
        assert_eq!(queue.take_all().len(), 1);
    }
}
