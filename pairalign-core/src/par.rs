/// Parallel fallible map: apply `$f` returning Result to each element, collecting into Result<Vec>.
///
/// `rayon`'s thread pool when the `parallel` feature is enabled, a plain
/// serial iterator otherwise.
macro_rules! par_try_map {
    ($slice:expr, $f:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            $slice.par_iter().map($f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice.iter().map($f).collect()
        }
    }};
}
