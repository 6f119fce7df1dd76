//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every service
//! operation over real HTTP through `UreqTransport`. Validates that endpoint
//! composition, request encoding, and envelope decoding work end-to-end.

use chrono::{Duration, Utc};
use kanka_core::{ApiError, Client, ClientConfig, SimpleCharacter, SimpleLocation};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn character_crud_lifecycle() {
    let client = Client::new(ClientConfig::new(&start_server(), "test-token"));
    let characters = client.characters();

    // Step 1: index — should be empty.
    let all = characters.index(5, None).unwrap();
    assert!(all.is_empty(), "expected empty index");

    // Step 2: create a character with traits.
    let mut input = SimpleCharacter::new("Irwie Gemstone");
    input.title = Some("Queen".to_string());
    input.is_dead = Some(false);
    input.personality_name = vec!["Goals".to_string()];
    input.personality_entry = vec!["Rule the realm".to_string()];
    let created = characters.create(5, &input).unwrap();
    assert!(created.meta.id > 0);
    assert!(created.meta.entity_id > 0);
    assert_eq!(created.fields.name, "Irwie Gemstone");
    assert_eq!(created.fields.title.as_deref(), Some("Queen"));
    assert_eq!(created.traits.data.len(), 1);
    assert_eq!(created.traits.data[0].entry, "Rule the realm");
    let id = created.meta.id;

    // Step 3: get the created character.
    let fetched = characters.get(5, id).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update.
    let mut update = SimpleCharacter::new("Irwie");
    update.is_dead = Some(true);
    let updated = characters.update(5, id, &update).unwrap();
    assert_eq!(updated.fields.name, "Irwie");
    assert_eq!(updated.fields.is_dead, Some(true));
    assert_eq!(updated.fields.title.as_deref(), Some("Queen"));
    assert_eq!(updated.meta.id, id);

    // Step 5: index with sync filters.
    let past = Utc::now() - Duration::hours(1);
    let future = Utc::now() + Duration::hours(1);
    assert_eq!(characters.index(5, Some(past)).unwrap().len(), 1);
    assert!(characters.index(5, Some(future)).unwrap().is_empty());

    // Step 6: another campaign sees nothing.
    assert!(characters.index(6, None).unwrap().is_empty());

    // Step 7: delete.
    characters.delete(5, id).unwrap();

    // Step 8: get after delete — should be NotFound.
    let err = characters.get(5, id).unwrap_err();
    assert!(err.is_not_found());

    // Step 9: delete again — NotFound, wrapped with both IDs.
    let err = characters.delete(5, id).unwrap_err();
    assert!(err.is_not_found());
    let message = err.to_string();
    assert!(message.contains(&format!("(ID: {id})")), "{message}");
    assert!(message.contains("Campaign (ID: 5)"), "{message}");

    // Step 10: index — empty again.
    assert!(characters.index(5, None).unwrap().is_empty());
}

#[test]
fn location_crud_lifecycle() {
    let client = Client::new(ClientConfig::new(&start_server(), "test-token"));
    let locations = client.locations();

    let mut input = SimpleLocation::new("Thaelia");
    input.kind = Some("City".to_string());
    let created = locations.create(3, &input).unwrap();
    assert_eq!(created.fields.kind.as_deref(), Some("City"));

    let listed = locations.index(3, None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].meta.id, created.meta.id);

    locations.delete(3, created.meta.id).unwrap();
    assert!(locations.get(3, created.meta.id).unwrap_err().is_not_found());
}

#[test]
fn blank_token_is_unauthorized() {
    let client = Client::new(ClientConfig::new(&start_server(), " "));
    let err = client.characters().index(5, None).unwrap_err();
    assert!(matches!(err.root(), ApiError::Unauthorized { status: 401 }));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = Client::new(ClientConfig::new(&format!("http://{addr}"), "test-token"));
    let err = client.characters().get(5, 9).unwrap_err();
    assert!(matches!(err.root(), ApiError::Transport(_)));
}
