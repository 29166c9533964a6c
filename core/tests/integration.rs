//! End-to-end tests against the mock registry over real HTTP.
//!
//! # Design
//! Each test starts the mock server on a random port in its own thread and
//! talks to it through the default `UreqTransport`, so URL building, headers,
//! status handling and timeouts are all exercised on the wire.

use std::net::SocketAddr;
use std::time::Duration;

use mock_server::{MockConfig, DEFAULT_KEY};
use serde_json::json;
use sudreg_core::{
    Audience, ClientConfig, CodebookOptions, Endpoint, IdentifierType, Page, Query, SubjectFilter,
    SudregClient, SudregError,
};

fn spawn(config: MockConfig) -> SocketAddr {
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
            mock_server::run(listener, config).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr, key: &str) -> SudregClient {
    let config = ClientConfig::new(key).with_base_url(format!("http://{addr}/api"));
    SudregClient::from_config(config).unwrap()
}

#[test]
fn registry_walkthrough() {
    let addr = spawn(MockConfig::default());
    let client = client_for(addr, DEFAULT_KEY);

    // Step 1: snapshots are listed.
    let snapshots = client.snapshots().unwrap();
    assert_eq!(snapshots.as_array().unwrap().len(), 2);

    // Step 2: details by OIB come back unmodified.
    let details = client
        .subject_details(IdentifierType::Oib, "53056966535", None)
        .unwrap();
    assert_eq!(
        details,
        json!({
            "mbs": "080000001",
            "oib": "53056966535",
            "tvrtka": { "ime": "Alfa d.o.o." },
            "aktivan": true,
            "sud_id_nadlezan": 3,
        })
    );

    // Step 3: expanded relations inline the court.
    let expanded = client
        .subject_details(IdentifierType::Mbs, "080000001", Some(true))
        .unwrap();
    assert_eq!(expanded["sud_nadlezan"]["naziv"], "Trgovački sud u Zagrebu");

    // Step 4: subject listing with a name filter containing a space.
    let filter = SubjectFilter {
        company_name: Some("alfa servis".to_string()),
        only_active: None,
        page: Page::default(),
    };
    let rows = client.subjects(&filter).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["mbs"], "030000003");

    // Step 5: paging.
    let page = SubjectFilter {
        page: Page::new(0, 2),
        ..SubjectFilter::default()
    };
    assert_eq!(client.subjects(&page).unwrap().as_array().unwrap().len(), 2);

    // Step 6: codebooks.
    let courts = client.courts(CodebookOptions::default()).unwrap();
    assert_eq!(courts.as_array().unwrap().len(), 2);
    assert_eq!(client.currencies(CodebookOptions::default()).unwrap(), json!([]));
    assert_eq!(client.changes(Page::new(0, 10)).unwrap(), json!([]));
    assert!(client.counts().unwrap().is_array());
}

#[test]
fn unknown_subject_is_a_404_api_error() {
    let addr = spawn(MockConfig::default());
    let client = client_for(addr, DEFAULT_KEY);

    let err = client
        .subject_details(IdentifierType::Mbs, "000000000", None)
        .unwrap_err();
    assert!(matches!(err, SudregError::Api { status: 404, .. }));
    assert_eq!(err.api_payload().unwrap()["error_message"], "no data found");
}

#[test]
fn no_data_error_off_returns_empty_object() {
    let addr = spawn(MockConfig::default());
    let config = ClientConfig::new(DEFAULT_KEY)
        .with_base_url(format!("http://{addr}/api"))
        .with_no_data_error(false);
    let client = SudregClient::from_config(config).unwrap();

    let details = client
        .subject_details(IdentifierType::Mbs, "000000000", None)
        .unwrap();
    assert_eq!(details, json!({}));
}

#[test]
fn wrong_key_is_a_401_api_error() {
    let addr = spawn(MockConfig::default());
    let client = client_for(addr, "not-the-key");

    let err = client.statuses().unwrap_err();
    assert!(matches!(err, SudregError::Api { status: 401, .. }));
}

#[test]
fn state_bodies_surface() {
    let addr = spawn(MockConfig::default());
    let config = ClientConfig::new(DEFAULT_KEY)
        .with_base_url(format!("http://{addr}/api"))
        .with_audience(Audience::StateBodies);
    let client = SudregClient::from_config(config).unwrap();

    let value = client
        .get(Endpoint::Subjects, &Query::new().push("only_active", "true"))
        .unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn bulk_listing_larger_than_ten_mebibytes_is_read_whole() {
    let rows = 120_000;
    let addr = spawn(MockConfig {
        company_name_rows: rows,
        ..MockConfig::default()
    });
    let client = client_for(addr, DEFAULT_KEY);

    let value = client.company_names(Page::new(0, 200_000)).unwrap();
    let value = value.as_array().unwrap();
    assert_eq!(value.len(), rows);
    assert_eq!(value[rows - 1]["mbs"], format!("{:09}", 100_000_000 + rows - 1));
    assert!(serde_json::to_vec(value).unwrap().len() > 10 * 1024 * 1024);
}

#[test]
fn slow_server_is_a_transport_error() {
    let addr = spawn(MockConfig {
        delay: Some(Duration::from_secs(5)),
        ..MockConfig::default()
    });
    let config = ClientConfig::new(DEFAULT_KEY)
        .with_base_url(format!("http://{addr}/api"))
        .with_timeout(Duration::from_secs(1));
    let client = SudregClient::from_config(config).unwrap();

    let err = client.snapshots().unwrap_err();
    assert!(matches!(err, SudregError::Transport(_)), "{err:?}");
}

#[test]
fn refused_connection_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(addr, DEFAULT_KEY);

    let err = client.counts().unwrap_err();
    assert!(matches!(err, SudregError::Transport(_)), "{err:?}");
}
