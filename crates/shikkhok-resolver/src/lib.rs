//! Answer resolution chain for the Shikkhok tutor.
//!
//! A query is answered by the first source in a fixed priority order that
//! produces usable output:
//!
//! 1. Calculator — local arithmetic/equation evaluation, pure
//! 2. Knowledge base — in-memory lookup, loaded once at startup
//! 3. Remote AI — gated on a connectivity probe, failures swallowed
//! 4. Fallback — fixed offline/no-answer message
//!
//! Exactly one [`Resolution`](shikkhok_types::Resolution) comes out per
//! query; the only error the caller ever sees is an empty query.

pub mod calc;
pub mod error;
pub mod memo;
pub mod probe;
pub mod resolver;

pub use error::{ResolveError, Result};
pub use memo::MemoCache;
pub use probe::{FixedProbe, Probe, SharedProbe, TcpProbe};
pub use resolver::{OFFLINE_MESSAGE, Resolver, ResolverOptions};
