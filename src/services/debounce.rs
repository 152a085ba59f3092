//! Trailing-edge debounce for rapidly changing values such as search text.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Propagates the latest input only after it has been stable for `delay`.
///
/// Must be created inside a tokio runtime. Dropping the debouncer cancels any
/// pending emission.
pub struct Debouncer<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);
        let task = tokio::spawn(run(input_rx, output_tx, delay));

        Self {
            input,
            output,
            task,
        }
    }

    /// Records a new input value, restarting the delay.
    pub fn push(&self, value: T) {
        self.input.send_replace(value);
    }

    /// Latest raw input.
    pub fn pending(&self) -> T {
        self.input.borrow().clone()
    }

    /// Latest debounced value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// Receiver notified whenever the debounced value changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(mut input: watch::Receiver<T>, output: watch::Sender<T>, delay: Duration)
where
    T: Clone + PartialEq,
{
    loop {
        if input.changed().await.is_err() {
            return;
        }
        // Each new input restarts the timer.
        loop {
            tokio::select! {
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = sleep(delay) => {
                    let value = input.borrow_and_update().clone();
                    output.send_if_modified(|current| {
                        if *current == value {
                            false
                        } else {
                            *current = value;
                            true
                        }
                    });
                    break;
                }
            }
        }
    }
}
