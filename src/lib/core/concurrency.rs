use anyhow::{anyhow, Result};
use log::warn;
use once_cell::sync::OnceCell;
use rayon::ThreadPoolBuilder;

static GLOBAL_RAYON_THREADS: OnceCell<usize> = OnceCell::new();

/// Validate and normalize a requested worker count.
pub fn determine_allowed_cpus(desired: usize) -> Result<usize> {
    if desired == 0 {
        Err(anyhow!("thread count must be greater than zero"))
    } else {
        if desired > num_cpus::get() {
            warn!(
                "Requested {} threads but only {} CPUs are available",
                desired,
                num_cpus::get()
            );
        }
        Ok(desired)
    }
}

/// Configure the global Rayon thread pool exactly once, returning the active
/// worker count. Subsequent calls reuse the first configured pool and warn
/// when the requested count differs from the established size.
pub fn configure_global_thread_pool(threads: usize) -> Result<usize> {
    let requested = determine_allowed_cpus(threads)?;

    if let Some(active) = GLOBAL_RAYON_THREADS.get() {
        if *active != requested {
            warn!(
                "Rayon global thread pool already initialised with {} threads; ignoring request for {}",
                active, requested
            );
        }
        return Ok(*active);
    }

    match ThreadPoolBuilder::new().num_threads(requested).build_global() {
        Ok(_) => {
            GLOBAL_RAYON_THREADS
                .set(requested)
                .map_err(|_| anyhow!("Failed to record global Rayon thread count"))?;
            Ok(requested)
        }
        Err(err) => {
            // The pool was likely initialised elsewhere; fall back to the current size.
            log::debug!("Global Rayon thread pool initialisation skipped: {}", err);
            let fallback = rayon::current_num_threads();
            if fallback != requested {
                warn!(
                    "Using existing Rayon pool with {} threads instead of requested {}",
                    fallback, requested
                );
            }
            GLOBAL_RAYON_THREADS.set(fallback).ok();
            Ok(fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_rejected() {
        assert!(determine_allowed_cpus(0).is_err());
    }

    #[test]
    fn positive_thread_counts_pass_through() {
        assert_eq!(determine_allowed_cpus(2).unwrap(), 2);
    }
}
