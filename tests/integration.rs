//! Cross-crate integration test: an `HttpBackend` talking to a mock reverse
//! hash service, driving both the proof engine and the tree walker the way
//! a real caller would — a single facade import, no knowledge of the
//! underlying crate split.

use rhs_client::{collect_for_save, fetch_tree, generate_proof, Deadline, Hash, HttpBackend, Node};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn h(n: u64) -> Hash {
    Hash::from_big_int(n.into()).unwrap()
}

async fn serve_node(server: &MockServer, node: &Node) {
    Mock::given(method("GET"))
        .and(path(format!("/node/{}", node.hash.hex())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "node": node,
            "status": "OK",
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn proves_and_walks_the_same_tree_over_http() {
    let leaf_left = Node { hash: h(10), children: vec![h(2), h(9), Hash::ONE] };
    let leaf_right = Node { hash: h(11), children: vec![h(3), h(7), Hash::ONE] };
    let root = Node { hash: h(20), children: vec![leaf_left.hash, leaf_right.hash] };

    let server = MockServer::start().await;
    serve_node(&server, &root).await;
    serve_node(&server, &leaf_left).await;
    serve_node(&server, &leaf_right).await;

    let backend = HttpBackend::new(server.uri()).unwrap();

    let proof = generate_proof(&backend, &Deadline::none(), root.hash, h(2))
        .await
        .unwrap();
    assert!(proof.existence);
    assert_eq!(proof.siblings, vec![leaf_right.hash]);

    let missing_key_proof = generate_proof(&backend, &Deadline::none(), root.hash, h(4))
        .await
        .unwrap();
    assert!(!missing_key_proof.existence);
    assert_eq!(
        missing_key_proof.node_aux.as_ref().map(|aux| aux.key),
        Some(h(2))
    );

    let tree = fetch_tree(&backend, &Deadline::none(), root.hash).await.unwrap();
    let nodes = collect_for_save(&tree);
    assert_eq!(nodes.len(), 3);
    assert!(nodes.contains(&root));
    assert!(nodes.contains(&leaf_left));
    assert!(nodes.contains(&leaf_right));
}

#[tokio::test]
async fn unknown_root_surfaces_not_found_through_the_facade() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/node/{}", h(0xdead).hex())))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "status": "not found",
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let err = generate_proof(&backend, &Deadline::none(), h(0xdead), h(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        rhs_client::ProofError::Backend(rhs_client::BackendError::NotFound)
    ));
}
