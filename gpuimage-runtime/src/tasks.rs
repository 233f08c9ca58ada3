use std::collections::VecDeque;

/// A FIFO of work deferred until the next draw on the render thread.
pub struct PendingTasks<F> {
    queue: VecDeque<F>,
}

impl<F> PendingTasks<F> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue a task.
    pub fn push(&mut self, task: F) {
        self.queue.push_back(task)
    }

    /// Remove every queued task in the order they were pushed.
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, F> {
        self.queue.drain(..)
    }

    /// Move every task queued in `other` to the back of this queue.
    pub fn append(&mut self, other: &mut PendingTasks<F>) {
        self.queue.append(&mut other.queue)
    }

    /// Drop every queued task without running it.
    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// The number of queued tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether there are no queued tasks.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<F> Default for PendingTasks<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;

    #[test]
    pub fn runs_in_push_order_once() {
        let log = RefCell::new(Vec::new());
        let mut tasks: PendingTasks<Box<dyn FnOnce(&RefCell<Vec<u32>>)>> = PendingTasks::new();
        tasks.push(Box::new(|log: &RefCell<Vec<u32>>| log.borrow_mut().push(1)));
        tasks.push(Box::new(|log: &RefCell<Vec<u32>>| log.borrow_mut().push(2)));
        assert_eq!(tasks.len(), 2);

        for task in tasks.drain() {
            task(&log);
        }
        assert!(tasks.is_empty());

        for task in tasks.drain() {
            task(&log);
        }
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    pub fn append_moves_tasks_behind_existing() {
        let mut first = PendingTasks::new();
        let mut second = PendingTasks::new();
        first.push(1);
        second.push(2);
        second.push(3);

        first.append(&mut second);
        assert!(second.is_empty());
        assert_eq!(first.drain().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
