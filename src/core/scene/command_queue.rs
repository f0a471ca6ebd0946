//=========================================================================
// Command Queue
//=========================================================================
//
// Queue for controller commands.
//
// Scenes queue commands here during updates. The controller processes
// this queue at tick boundaries, so a scene is never torn down while one
// of its own methods is still running.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneKind;

//=== Command =============================================================

/// Requests a scene can make of the controller.
#[derive(Debug)]
pub enum Command {
    /// Stop the run loop.
    Quit,

    /// Replace the current scene.
    ChangeScene(SceneKind),

    /// Move the current scene's page cursor by the given delta.
    NavigatePage(i32),
}

//=== CommandQueue ========================================================

#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command to be processed at the next tick boundary.
    pub fn push(&mut self, command: Command) {
        self.queue.push(command);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all commands in FIFO order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_preserves_fifo_order_and_empties() {
        let mut queue = CommandQueue::new();
        queue.push(Command::NavigatePage(1));
        queue.push(Command::Quit);
        assert_eq!(queue.len(), 2);

        let taken = queue.take();
        assert!(matches!(taken[0], Command::NavigatePage(1)));
        assert!(matches!(taken[1], Command::Quit));
        assert!(queue.is_empty());
    }
}
