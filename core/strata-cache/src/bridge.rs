//! Value bridge between synchronous and asynchronous cache backends.

use futures::future::{BoxFuture, Either};
use std::fmt;
use std::future::{self, Future, IntoFuture, Ready};

/// A value that is either already known or still being computed.
///
/// Every cache read returns one of these. Awaiting a `Ready` value resolves
/// immediately through [`std::future::Ready`] with no allocation; a caller
/// that only needs synchronous backends can skip the await entirely with
/// [`Bridged::try_ready`].
pub enum Bridged<'a, T> {
    Ready(T),
    Pending(BoxFuture<'a, T>),
}

/// Wraps an already-known value.
pub fn wrap<'a, T>(value: T) -> Bridged<'a, T> {
    Bridged::Ready(value)
}

impl<'a, T> Bridged<'a, T> {
    pub fn ready(value: T) -> Self {
        Bridged::Ready(value)
    }

    /// Defers to `future` unchanged.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'a,
    {
        Bridged::Pending(Box::pin(future))
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Bridged::Ready(_))
    }

    /// Takes the value if it is already known, handing the bridge back
    /// otherwise.
    pub fn try_ready(self) -> Result<T, Self> {
        match self {
            Bridged::Ready(value) => Ok(value),
            pending => Err(pending),
        }
    }

    /// Takes the value if it is already known.
    pub fn into_ready(self) -> Option<T> {
        self.try_ready().ok()
    }

    /// Transforms the value on whichever path it takes. A ready value stays
    /// ready.
    pub fn map<U, F>(self, f: F) -> Bridged<'a, U>
    where
        T: Send + 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        match self {
            Bridged::Ready(value) => Bridged::Ready(f(value)),
            Bridged::Pending(future) => Bridged::Pending(Box::pin(async move { f(future.await) })),
        }
    }
}

impl<'a, T> From<T> for Bridged<'a, T> {
    fn from(value: T) -> Self {
        Bridged::Ready(value)
    }
}

impl<'a, T> IntoFuture for Bridged<'a, T> {
    type Output = T;
    type IntoFuture = Either<Ready<T>, BoxFuture<'a, T>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Bridged::Ready(value) => Either::Left(future::ready(value)),
            Bridged::Pending(future) => Either::Right(future),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Bridged<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bridged::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Bridged::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
