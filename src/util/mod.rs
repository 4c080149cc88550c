/// Basic thread pool utility.
pub mod thread_pool;

/// Stream utility for combining Read and Write traits into one.
pub mod stream;

/// Utility for creating mock trait implementations.
#[cfg(test)]
pub mod mock;
