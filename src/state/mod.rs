pub mod debounce;
pub mod mvi;
pub mod scope;
pub mod status;
pub mod store;

pub use debounce::Debouncer;
pub use mvi::{Intent, Reducer, UiState};
pub use scope::TaskScope;
pub use status::{FetchState, InFlight, InFlightGuard, OperationState, Submission};
pub use store::{Dispatcher, Store};
