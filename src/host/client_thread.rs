//! Client-thread task queue
//!
//! Widget tasks are queued from event handlers and executed FIFO when the
//! client reaches its next tick.

use crate::core::host::{Scheduler, WidgetTask, WidgetTree};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Cloneable handle to the client's deferred-execution queue
#[derive(Clone, Default)]
pub struct ClientThread {
    queue: Rc<RefCell<VecDeque<WidgetTask>>>,
}

impl ClientThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every queued task against `tree`, including tasks queued while
    /// draining. Returns how many ran.
    pub fn drain_into(&self, tree: &mut dyn WidgetTree) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            task(&mut *tree);
            ran += 1;
        }
        ran
    }
}

impl Scheduler for ClientThread {
    fn invoke_later(&self, task: WidgetTask) {
        self.queue.borrow_mut().push_back(task);
    }
}
