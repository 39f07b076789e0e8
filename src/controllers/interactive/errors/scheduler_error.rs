use rayon::ThreadPoolBuildError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SchedulerError {
    ThreadPool(ThreadPoolBuildError),
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadPool(err) => write!(f, "failed to build render worker pool: {}", err),
        }
    }
}

impl Error for SchedulerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
        }
    }
}

impl From<ThreadPoolBuildError> for SchedulerError {
    fn from(err: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}
