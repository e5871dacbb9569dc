use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// How a successful response body turns into the caller's result, and back
/// into bytes for the response cache.
pub trait ResultSink {
    type Output: Send;

    fn decode(body: &[u8]) -> serde_json::Result<Self::Output>;

    fn encode(output: &Self::Output) -> serde_json::Result<Vec<u8>>;

    /// Result of a call that succeeded without payload.
    fn empty() -> Self::Output;
}

/// Decode the body as JSON into `R`.
pub struct Json<R>(PhantomData<fn() -> R>);

impl<R> ResultSink for Json<R>
where
    R: DeserializeOwned + Serialize + Default + Send,
{
    type Output = R;

    fn decode(body: &[u8]) -> serde_json::Result<R> {
        serde_json::from_slice(body)
    }

    fn encode(output: &R) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(output)
    }

    fn empty() -> R {
        R::default()
    }
}

/// Ignore the body; only the status matters.
pub struct Discard;

impl ResultSink for Discard {
    type Output = ();

    fn decode(_body: &[u8]) -> serde_json::Result<()> {
        Ok(())
    }

    fn encode(_output: &()) -> serde_json::Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn empty() {}
}
