use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

/// A JSON body that never rejects the request.
///
/// Anything `axum::Json` would refuse (wrong content type, syntax error,
/// shape mismatch) ends up in `Invalid` so the handler decides what an
/// unusable body means.
#[derive(Debug)]
pub enum JsonBody<T> {
    Parsed(T),
    Invalid(JsonRejection),
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Self::Parsed(value),
            Err(rejection) => Self::Invalid(rejection),
        })
    }
}
