use rhs_core::Node;
use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct NodeResponse {
    pub node: Node,
}

#[derive(Deserialize)]
pub(crate) struct StatusResponse {
    pub status: String,
}
