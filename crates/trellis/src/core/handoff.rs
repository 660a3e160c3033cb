use std::sync::mpsc;

use tracing::debug;

use crate::{core::tree::Tree, error::Result};

/// Work to run on the UI thread against the tree.
pub type UiTask = Box<dyn FnOnce(&mut Tree) -> Result<()> + Send>;

/// A cloneable handle for posting work to the UI thread from anywhere.
#[derive(Debug, Clone)]
pub struct UiSender {
    /// Channel into the queue.
    tx: mpsc::Sender<UiTask>,
}

impl UiSender {
    /// Queue a task to run at the start of the next frame.
    pub fn run_on_ui(&self, task: impl FnOnce(&mut Tree) -> Result<()> + Send + 'static) -> Result<()> {
        self.tx.send(Box::new(task))?;
        Ok(())
    }
}

/// Tasks posted to the UI thread, drained once per frame.
#[derive(Debug)]
pub struct UiQueue {
    /// Sending half, cloned into senders.
    tx: mpsc::Sender<UiTask>,
    /// Receiving half.
    rx: mpsc::Receiver<UiTask>,
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UiQueue {
    /// An empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A handle for posting tasks.
    pub fn sender(&self) -> UiSender {
        UiSender {
            tx: self.tx.clone(),
        }
    }

    /// Run every task queued so far, in order. Tasks posted while draining
    /// run on the next drain. Stops at the first failing task.
    pub fn drain(&self, tree: &mut Tree) -> Result<usize> {
        let tasks: Vec<UiTask> = self.rx.try_iter().collect();
        let n = tasks.len();
        for task in tasks {
            task(tree)?;
        }
        if n > 0 {
            debug!(n, "ran ui tasks");
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{error::Error, layout::Lp, widgets::Blank};

    #[test]
    fn tasks_from_other_threads() -> Result<()> {
        let q = UiQueue::new();
        let mut tree = Tree::new();
        let root = tree.root_id();
        let s = q.sender();
        thread::spawn(move || {
            for _ in 0..3 {
                s.run_on_ui(move |t| {
                    t.add_child(root, Blank, Lp::min())?;
                    Ok(())
                })
                .ok();
            }
        })
        .join()
        .map_err(|_| Error::Internal("sender thread panicked".into()))?;
        assert_eq!(q.drain(&mut tree)?, 3);
        assert_eq!(tree.children_of(root).len(), 3);
        assert_eq!(q.drain(&mut tree)?, 0);
        Ok(())
    }
}
