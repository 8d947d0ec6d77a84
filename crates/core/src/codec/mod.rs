// Text document codec: hand-written emitter, serde-based reader.
pub mod decode;
pub mod document;
pub mod encode;
pub mod escape;

pub(crate) mod serde_helpers;
