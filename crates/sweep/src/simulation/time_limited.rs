use std::{
    io,
    sync::{Arc, mpsc},
    thread,
    time::Duration,
};

use tbsweep_core::Model;
use thiserror::Error;

/// Errors from a [`TimeLimited`] simulation call.
#[derive(Debug, Error)]
pub enum TimeLimitError<E> {
    #[error("simulation did not finish within {limit:?}")]
    TimedOut { limit: Duration },

    #[error("simulation failed")]
    Model(#[source] E),

    #[error("simulation thread exited without a result")]
    Panicked,

    #[error("failed to spawn simulation thread")]
    Spawn(#[source] io::Error),
}

/// Bounds every call of the wrapped model by a fixed duration.
///
/// Each call runs on its own worker thread. When the limit passes the call
/// fails with [`TimeLimitError::TimedOut`] and the worker is abandoned; it
/// keeps running until the model returns, and its result is dropped. Models
/// that support their own cancellation should prefer it.
#[derive(Debug)]
pub struct TimeLimited<M> {
    model: Arc<M>,
    limit: Duration,
}

impl<M> TimeLimited<M> {
    pub fn new(model: M, limit: Duration) -> Self {
        Self {
            model: Arc::new(model),
            limit,
        }
    }

    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<M> Model for TimeLimited<M>
where
    M: Model + Send + Sync + 'static,
    M::Input: Clone + Send + 'static,
    M::Output: Send + 'static,
{
    type Input = M::Input;
    type Output = M::Output;
    type Error = TimeLimitError<M::Error>;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let (sender, receiver) = mpsc::channel();
        let model = Arc::clone(&self.model);
        let input = input.clone();

        thread::Builder::new()
            .name("tbsweep-simulation".into())
            .spawn(move || {
                // The receiver is gone if the call already timed out.
                let _ = sender.send(model.call(&input));
            })
            .map_err(TimeLimitError::Spawn)?;

        match receiver.recv_timeout(self.limit) {
            Ok(result) => result.map_err(TimeLimitError::Model),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(limit = ?self.limit, "simulation call timed out");
                Err(TimeLimitError::TimedOut { limit: self.limit })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(TimeLimitError::Panicked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fmt;

    #[derive(Debug)]
    struct Rejected;

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("rejected")
        }
    }

    impl std::error::Error for Rejected {}

    /// Sleeps for the input number of milliseconds, rejecting zero.
    struct Sleepy;

    impl Model for Sleepy {
        type Input = u64;
        type Output = u64;
        type Error = Rejected;

        fn call(&self, millis: &u64) -> Result<u64, Rejected> {
            if *millis == 0 {
                return Err(Rejected);
            }
            thread::sleep(Duration::from_millis(*millis));
            Ok(*millis)
        }
    }

    #[test]
    fn returns_results_within_the_limit() {
        let model = TimeLimited::new(Sleepy, Duration::from_secs(5));
        assert_eq!(model.call(&1).unwrap(), 1);
    }

    #[test]
    fn times_out_slow_calls() {
        let model = TimeLimited::new(Sleepy, Duration::from_millis(10));
        let result = model.call(&2_000);
        assert!(matches!(result, Err(TimeLimitError::TimedOut { .. })));
    }

    #[test]
    fn forwards_model_errors() {
        let model = TimeLimited::new(Sleepy, Duration::from_secs(5));
        assert!(matches!(model.call(&0), Err(TimeLimitError::Model(Rejected))));
    }

    #[test]
    fn reports_panicking_models() {
        struct Panics;

        impl Model for Panics {
            type Input = ();
            type Output = ();
            type Error = Rejected;

            fn call(&self, _input: &()) -> Result<(), Rejected> {
                panic!("solver blew up");
            }
        }

        let model = TimeLimited::new(Panics, Duration::from_secs(5));
        assert!(matches!(model.call(&()), Err(TimeLimitError::Panicked)));
    }
}
