//! Tri-state outcome of every network-backed operation.
//!
//! `Loading` exists for observed UI state only; a completed repository
//! call always yields `Success` or `Error`.

use crate::api::ApiError;

#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Error(ApiError),
    Loading,
}

impl<T> Outcome<T> {
    /// Transform the `Success` payload; `Error` and `Loading` pass through.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Error(err) => Outcome::Error(err),
            Outcome::Loading => Outcome::Loading,
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Error(_) | Outcome::Loading => None,
        }
    }

    pub fn err(&self) -> Option<&ApiError> {
        match self {
            Outcome::Error(err) => Some(err),
            Outcome::Success(_) | Outcome::Loading => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Outcome::Loading)
    }

    /// Collapse into a `Result`. A `Loading` value at this point means the
    /// call never completed and is reported as `ApiError::Incomplete`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Error(err) => Err(err),
            Outcome::Loading => Err(ApiError::Incomplete),
        }
    }
}

impl<T> From<Result<T, ApiError>> for Outcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_transforms_success_only() {
        let success: Outcome<u32> = Outcome::Success(2);
        assert_eq!(success.map(|v| v * 10).ok(), Some(20));

        let error: Outcome<u32> = Outcome::Error(ApiError::Timeout);
        let mapped = error.map(|v| v * 10);
        assert!(mapped.is_error());
        assert!(matches!(mapped.err(), Some(ApiError::Timeout)));

        let loading: Outcome<u32> = Outcome::Loading;
        assert!(loading.map(|v| v + 1).is_loading());
    }

    #[test]
    fn predicates_are_exclusive() {
        let all: [Outcome<()>; 3] = [
            Outcome::Success(()),
            Outcome::Error(ApiError::Connectivity("down".into())),
            Outcome::Loading,
        ];
        for outcome in &all {
            let flags = [outcome.is_success(), outcome.is_error(), outcome.is_loading()];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        }
    }

    #[test]
    fn loading_collapses_to_incomplete() {
        let loading: Outcome<()> = Outcome::Loading;
        assert!(matches!(loading.into_result(), Err(ApiError::Incomplete)));
    }

    #[test]
    fn from_result_round_trips_variants() {
        let ok: Outcome<i32> = Ok(7).into();
        assert_eq!(ok.ok(), Some(7));
        let err: Outcome<i32> = Err(ApiError::EmptyBody).into();
        assert!(err.is_error());
    }
}
