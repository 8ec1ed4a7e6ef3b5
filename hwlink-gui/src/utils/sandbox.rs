use std::collections::VecDeque;

use iced::{futures::StreamExt, Task};
use iced_runtime::{task::into_stream, Action};

use crate::app::{App, Message};

/// Runs the application update loop without a window: every message produced by the tasks is
/// fed back to the application until none is left.
pub struct Sandbox {
    app: App,
    messages: Vec<Message>,
}

impl Sandbox {
    pub fn new(app: App) -> Self {
        Self {
            app,
            messages: Vec::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Every message handled so far, in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub async fn update(mut self, message: Message) -> Self {
        let task = self.app.update(message.clone());
        self.messages.push(message);
        self.run(task).await
    }

    /// Runs a task returned by the application, then every message it yields.
    pub async fn run(mut self, task: Task<Message>) -> Self {
        let mut queue = VecDeque::new();
        let mut task = Some(task);
        while let Some(current) = task.take() {
            if let Some(mut stream) = into_stream(current) {
                while let Some(action) = stream.next().await {
                    if let Action::Output(msg) = action {
                        queue.push_back(msg);
                    }
                }
            }
            if let Some(message) = queue.pop_front() {
                self.messages.push(message.clone());
                task = Some(self.app.update(message));
            }
        }
        self
    }
}
