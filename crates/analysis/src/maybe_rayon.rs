/// Parallel/sequential execution shim.
///
/// With the `parallel` feature (default) the density-grid evaluation spreads
/// rows across cores via rayon. Without it the same call sites compile
/// against a sequential stand-in, so minimal or wasm builds need no rayon.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    use std::ops::Range;

    /// Sequential stand-in for rayon's `into_par_iter()` on the row ranges
    /// driving grid evaluation. The range is its own iterator, so the rest
    /// of the chain (`.flat_map()`, `.collect()`, ...) resolves to the
    /// standard `Iterator` methods.
    pub trait IntoParallelIterator {
        type Iter;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl IntoParallelIterator for Range<usize> {
        type Iter = Range<usize>;
        fn into_par_iter(self) -> Self::Iter {
            self
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
