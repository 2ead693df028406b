//! Tagged results returned across layer boundaries.
//!
//! Use-cases and repositories return plain [`Result`] aliases, so `?` and
//! [`Result::and_then`] give the flat-map composition; [`Result::inspect`]
//! and [`Result::inspect_err`] cover the success and error side effects.
//! The HTTP layer additionally knows a `Loading` state, hence its own enum.
use crate::error::{DataError, NetworkError, UseCaseError};

pub type DataResult<T> = Result<T, DataError>;

pub type UseCaseResult<T> = Result<T, UseCaseError>;

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResult<T> {
    Loading,
    Success(T),
    Error(NetworkError),
}

impl<T> NetworkResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> NetworkResult<U> {
        match self {
            Self::Loading => NetworkResult::Loading,
            Self::Success(data) => NetworkResult::Success(f(data)),
            Self::Error(err) => NetworkResult::Error(err),
        }
    }

    /// Chains a second step; it only runs when this one succeeded.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> NetworkResult<U>) -> NetworkResult<U> {
        match self {
            Self::Loading => NetworkResult::Loading,
            Self::Success(data) => f(data),
            Self::Error(err) => NetworkResult::Error(err),
        }
    }

    pub fn on_success(self, f: impl FnOnce(&T)) -> Self {
        if let Self::Success(data) = &self {
            f(data);
        }
        self
    }

    pub fn on_error(self, f: impl FnOnce(&NetworkError)) -> Self {
        if let Self::Error(err) = &self {
            f(err);
        }
        self
    }

    /// A result that is still loading cannot be consumed and becomes
    /// [`NetworkError::NotReady`].
    pub fn into_result(self) -> Result<T, NetworkError> {
        match self {
            Self::Loading => Err(NetworkError::NotReady),
            Self::Success(data) => Ok(data),
            Self::Error(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, NetworkError>> for NetworkResult<T> {
    fn from(value: Result<T, NetworkError>) -> Self {
        match value {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_then_short_circuits_on_error() {
        let mut called = false;
        let result: NetworkResult<u32> =
            NetworkResult::<u32>::Error(NetworkError::Transport("down".to_string())).and_then(
                |v| {
                    called = true;
                    NetworkResult::Success(v + 1)
                },
            );
        assert!(!called);
        assert_eq!(
            result,
            NetworkResult::Error(NetworkError::Transport("down".to_string()))
        );
    }

    #[test]
    fn and_then_chains_success() {
        let result = NetworkResult::Success(2).and_then(|v| NetworkResult::Success(v * 10));
        assert_eq!(result, NetworkResult::Success(20));
    }

    #[test]
    fn loading_is_not_ready() {
        let result: NetworkResult<()> = NetworkResult::Loading;
        assert!(result.is_loading());
        assert_eq!(result.into_result(), Err(NetworkError::NotReady));
    }

    #[test]
    fn callbacks_fire_on_matching_variant() {
        let mut seen = Vec::new();
        let _ = NetworkResult::Success(1)
            .on_success(|v| seen.push(format!("ok {v}")))
            .on_error(|e| seen.push(format!("err {e}")));
        let _ = NetworkResult::<i32>::Error(NetworkError::NotReady)
            .on_success(|v| seen.push(format!("ok {v}")))
            .on_error(|e| seen.push(format!("err {e}")));
        assert_eq!(seen, vec!["ok 1", "err request still in progress"]);
    }
}
