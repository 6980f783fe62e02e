use margin_sdk::AsyncMarginSdk;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async margin SDK. Owns the current dataset snapshot and
    /// dispatches computations to the blocking thread pool.
    pub sdk: AsyncMarginSdk,
}
