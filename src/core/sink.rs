//! Row sinks: where list hydrates stream their items

use tokio::sync::mpsc::UnboundedSender;

/// Receives items one at a time as a table lists them
pub trait RowSink<T> {
    fn stream_item(&mut self, item: T);
}

impl<T> RowSink<T> for Vec<T> {
    fn stream_item(&mut self, item: T) {
        self.push(item);
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<T, F: FnMut(T)> RowSink<T> for FnSink<F> {
    fn stream_item(&mut self, item: T) {
        (self.0)(item)
    }
}

/// Forwards items into a tokio channel
///
/// Items sent after the receiver is dropped are discarded.
pub struct ChannelSink<T> {
    tx: UnboundedSender<T>,
}

impl<T> ChannelSink<T> {
    pub fn new(tx: UnboundedSender<T>) -> Self {
        Self { tx }
    }
}

impl<T> RowSink<T> for ChannelSink<T> {
    fn stream_item(&mut self, item: T) {
        if self.tx.send(item).is_err() {
            tracing::debug!("row receiver dropped, discarding item");
        }
    }
}

/// Maps items before handing them to an inner sink
pub struct MapSink<'a, S: ?Sized, F> {
    inner: &'a mut S,
    map: F,
}

impl<'a, S: ?Sized, F> MapSink<'a, S, F> {
    pub fn new(inner: &'a mut S, map: F) -> Self {
        Self { inner, map }
    }
}

impl<T, U, S, F> RowSink<T> for MapSink<'_, S, F>
where
    S: RowSink<U> + ?Sized,
    F: FnMut(T) -> U,
{
    fn stream_item(&mut self, item: T) {
        let mapped = (self.map)(item);
        self.inner.stream_item(mapped);
    }
}
