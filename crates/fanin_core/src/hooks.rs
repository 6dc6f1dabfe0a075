use crate::compilation::Compilation;
use crate::error::Error;

/// Post-emit integration point between a host bundler and a reporting pass.
///
/// The host invokes [`AfterEmit::after_emit`] exactly once per compilation,
/// after it has finished emitting build artifacts. The call runs to
/// completion before returning; returning is the completion signal the host
/// waits for. An `Err` tells the host the pass failed, and the host decides
/// whether that fails the build.
pub trait AfterEmit {
    fn after_emit(&self, compilation: &Compilation) -> Result<(), Error>;
}
