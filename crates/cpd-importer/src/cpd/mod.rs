//! Copy/paste-detection tokens: the consumer that turns analyzer records
//! into per-file token lists, and the sink those lists are saved to.

pub(crate) mod consumer;
pub(crate) mod store;
pub(crate) mod tokens;

pub use consumer::CpdTokensConsumer;
pub use store::{CpdSink, CpdTokenStore, SinkError};
pub use tokens::{CpdToken, NewCpdTokens};
