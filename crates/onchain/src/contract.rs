use ethers::contract::abigen;

// Minimal ABI fragment for the on-chain tree store: node lookups by id,
// batched preimage submission, and the single/batched insert entry points
// the original identity-state contract exposes alongside them.
abigen!(
    OnchainIdentityTreeStore,
    r#"[
        function getNode(uint256 id) external view returns (uint256[] memory)
        function addNode(uint256[] memory preimage) external returns (uint256)
        function addNodes(uint256[][] memory preimages) external returns (uint256[] memory)
        function saveNodes(uint256[][] memory preimages) external
    ]"#
);
