//! Streaming block selection over markup events.
//!
//! A [`ChainSet`] decides, one event at a time and without buffering, which
//! events of a markup stream fall inside the fragments named by one or more
//! element paths. [`HtmlSource`] feeds it from html5ever's tokenizer.
mod chain;
mod chain_set;
mod error;
mod event;
mod handler;
mod levels;
mod segment;
mod selector;
mod source;

pub use chain::{Chain, ChainBuilder};
pub use chain_set::ChainSet;
pub use error::{Error, Result};
pub use event::MarkupEvent;
pub use handler::{Discard, MarkupHandler};
pub use levels::LevelFlags;
pub use segment::Segment;
pub use selector::{select_fragments, BlockSelector};
pub use source::{HtmlSource, SourceOptions};
