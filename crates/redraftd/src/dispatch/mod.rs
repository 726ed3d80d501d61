//! JSONL request dispatch.
//!
//! Each connection carries one request line shaped like an HTTP call:
//!
//! ```json
//! {"method":"POST","path":"/revise","body":{"originalText":"...","controls":{}}}
//! ```
//!
//! and receives one response line carrying an HTTP status and a body:
//!
//! ```json
//! {"status":200,"body":{"revisedText":"...","notes":[],"summary":"..."}}
//! ```
//!
//! Payloads are validated here, so the orchestrator only ever sees
//! well-formed requests. Guardrail refusals are successful responses whose
//! body carries the fixed refusal message.

mod errors;
mod handler;
mod request;
mod response;
mod router;

pub use self::errors::DispatchError;
pub use self::handler::DispatchConnectionHandler;
pub use self::request::ApiRequest;
pub use self::response::ApiResponse;
pub use self::router::{ApiRouter, Route};
