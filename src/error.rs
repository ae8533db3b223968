use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("a selection chain needs at least one segment")]
    EmptyChain,

    #[error("segment {position} has an empty element name")]
    EmptyPattern { position: usize },
}
