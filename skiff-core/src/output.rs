//! Deferred stack output values.
//!
//! Some resource attributes (a load balancer's public address) are only
//! known once the engine has actually provisioned the resource. An
//! [`Output`] represents such a value: the graph hands the producing
//! [`OutputSlot`] to the engine, and the single consumer awaits the value
//! through [`Output::resolve`]. Derived values (`"http://" + ip`) are
//! built with [`Output::map`] without waiting.

use crate::error::{Result, SkiffError};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::oneshot;

/// Producer half of a deferred output.
///
/// Exactly one producer exists per pending output. The engine fulfills it
/// when the producing resource reaches a provisioned state; dropping the
/// slot without fulfilling marks the output as never resolved.
pub struct OutputSlot<T> {
    tx: oneshot::Sender<T>,
}

impl<T> OutputSlot<T> {
    /// Fulfill the output with its provisioned value.
    ///
    /// Consumes the slot. If the consumer is already gone the value is
    /// discarded.
    pub fn fulfill(self, value: T) {
        let _ = self.tx.send(value);
    }
}

impl<T> fmt::Debug for OutputSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSlot").finish_non_exhaustive()
    }
}

enum State<T> {
    Ready(T),
    Pending(oneshot::Receiver<T>),
    Derived(Pin<Box<dyn Future<Output = Option<T>> + Send>>),
}

/// A value not available until its producing resource is provisioned.
pub struct Output<T> {
    name: String,
    state: State<T>,
}

impl<T: Send + 'static> Output<T> {
    /// Create a pending output and its producer slot.
    pub fn pending(name: impl Into<String>) -> (OutputSlot<T>, Output<T>) {
        let (tx, rx) = oneshot::channel();
        (OutputSlot { tx }, Output { name: name.into(), state: State::Pending(rx) })
    }

    /// Create an output that already holds its value.
    pub fn resolved(value: T) -> Output<T> {
        Output { name: "value".to_string(), state: State::Ready(value) }
    }

    /// The name this output resolves (or fails to resolve) under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the output, e.g. when exported under a stack-output name.
    pub(crate) fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    async fn wait(self) -> Option<T> {
        match self.state {
            State::Ready(value) => Some(value),
            State::Pending(rx) => rx.await.ok(),
            State::Derived(fut) => fut.await,
        }
    }

    /// Derive a new deferred value from this one.
    ///
    /// The closure runs once the source value resolves; until then the
    /// derived output is pending too.
    pub fn map<U, F>(self, f: F) -> Output<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let name = self.name.clone();
        Output { name, state: State::Derived(Box::pin(async move { self.wait().await.map(f) })) }
    }

    /// Wait for the value.
    ///
    /// Fails with `OutputUnresolved` if the producer went away without
    /// fulfilling, i.e. the resource never reached a provisioned state.
    pub async fn resolve(self) -> Result<T> {
        let name = self.name.clone();
        self.wait().await.ok_or(SkiffError::OutputUnresolved { name })
    }
}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Ready(_) => "ready",
            State::Pending(_) => "pending",
            State::Derived(_) => "derived",
        };
        f.debug_struct("Output").field("name", &self.name).field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fulfill_then_resolve() {
        let (slot, output) = Output::pending("ip");
        slot.fulfill("203.0.113.10".to_string());
        assert_eq!(output.resolve().await.unwrap(), "203.0.113.10");
    }

    #[tokio::test]
    async fn test_dropped_producer_is_unresolved() {
        let (slot, output) = Output::<String>::pending("ip");
        drop(slot);

        let err = output.resolve().await.unwrap_err();
        assert!(matches!(err, SkiffError::OutputUnresolved { name } if name == "ip"));
    }

    #[tokio::test]
    async fn test_map_derives_value() {
        let (slot, output) = Output::pending("ip");
        let endpoint = output.map(|ip| format!("http://{}", ip));

        slot.fulfill("10.0.0.1".to_string());
        assert_eq!(endpoint.resolve().await.unwrap(), "http://10.0.0.1");
    }

    #[tokio::test]
    async fn test_map_propagates_unresolved() {
        let (slot, output) = Output::<String>::pending("ip");
        let endpoint = output.map(|ip| format!("http://{}", ip));
        drop(slot);

        assert!(matches!(
            endpoint.resolve().await,
            Err(SkiffError::OutputUnresolved { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolved_is_immediate() {
        let output = Output::resolved(42u16);
        assert_eq!(output.resolve().await.unwrap(), 42);
    }
}
