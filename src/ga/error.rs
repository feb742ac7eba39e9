use thiserror::Error;

/// The first structural defect found in a chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("chromosome is empty")]
    Empty,

    #[error("chromosome does not start with the depot")]
    MissingLeadingDepot,

    #[error("chromosome does not end with the depot")]
    MissingTrailingDepot,

    #[error("empty route: adjacent depots at position {position}")]
    EmptyRoute { position: usize },

    #[error("gene {client} at position {position} is not a client of the instance")]
    UnknownClient { client: usize, position: usize },

    #[error("client {client} visited twice (again at position {position})")]
    DuplicateClient { client: usize, position: usize },

    #[error("client {client} is never visited")]
    MissingClient { client: usize },
}
