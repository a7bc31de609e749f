//! Supporting types for the `LLMProvider` trait.

use std::pin::Pin;

use futures::Stream;

use crate::core::types::responses::ChatChunk;

/// A boxed stream of streaming chat-completion chunks, as returned by
/// [`super::trait_definition::LLMProvider::chat_completion_stream`].
///
/// Parameterized over the implementor's own associated `Error` rather than a
/// unified error type - the non-streaming methods carry `Self::Error` too,
/// and `core::providers` converts it to `ProviderError` at the dispatch site.
pub type ChatCompletionStream<E> = Pin<Box<dyn Stream<Item = Result<ChatChunk, E>> + Send + 'static>>;
