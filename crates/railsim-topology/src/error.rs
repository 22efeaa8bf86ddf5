use railsim_graph::GraphError;

/// Topology-construction errors. All fatal: no partial topology is
/// returned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("invalid topology config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
