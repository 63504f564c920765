//! Native / wasm32 differences
//!
//! Browser futures are not `Send`, so boxed streams and async trait
//! objects drop the bound on wasm32.

use futures::stream::Stream;
#[cfg(not(target_arch = "wasm32"))]
use futures::stream::BoxStream;
#[cfg(target_arch = "wasm32")]
use futures::stream::LocalBoxStream;
use futures::StreamExt;

#[cfg(not(target_arch = "wasm32"))]
pub type BoxedStream<T> = BoxStream<'static, T>;

#[cfg(target_arch = "wasm32")]
pub type BoxedStream<T> = LocalBoxStream<'static, T>;

#[cfg(not(target_arch = "wasm32"))]
pub fn boxed<S>(stream: S) -> BoxedStream<S::Item>
where
    S: Stream + Send + 'static,
{
    stream.boxed()
}

#[cfg(target_arch = "wasm32")]
pub fn boxed<S>(stream: S) -> BoxedStream<S::Item>
where
    S: Stream + 'static,
{
    stream.boxed_local()
}
