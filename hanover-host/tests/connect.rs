//! Building a controller from configuration against real sockets

use std::io::Read;
use std::net::TcpListener;

use hanover_host::{connect, parse_config, HostError, HostTransport};

fn tcp_config(port: u16) -> hanover_host::HostConfig {
    parse_config(&format!(
        r#"
        [transport]
        kind = "tcp"
        host = "127.0.0.1"
        port = {port}

        [[sign]]
        name = "front"
        address = 1
        width = 2
        height = 3
        "#
    ))
    .unwrap()
}

#[test]
fn test_connect_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut controller = connect(&tcp_config(port)).unwrap();
    assert!(matches!(controller.transport(), HostTransport::Tcp(_)));
    assert_eq!(controller.signs().count(), 1);

    controller.start_test_signs().unwrap();
    let mut image = controller.resolve_sign(None).unwrap().create_blank_image();
    image.set(0, 0, true);
    image.set(2, 1, true);
    controller.draw(&image, None).unwrap();
    drop(controller);

    let (mut stream, _) = listener.accept().unwrap();
    let mut received = Vec::new();
    stream.read_to_end(&mut received).unwrap();
    assert_eq!(received, b"\x0230\x039A\x0211020104\x0374");
}

#[test]
fn test_connect_refused_is_reported() {
    // Bind then drop to find a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let result = connect(&tcp_config(port));
    assert!(matches!(
        result,
        Err(HostError::Connect { port: p, .. }) if p == port
    ));
}

#[test]
fn test_connect_missing_serial_port() {
    let config = parse_config(
        r#"
        [transport]
        kind = "serial"
        port = "/dev/does-not-exist"
        "#,
    )
    .unwrap();

    assert!(matches!(
        connect(&config),
        Err(HostError::OpenSerial { .. })
    ));
}

#[test]
fn test_invalid_sign_reported_after_open() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut config = tcp_config(port);
    config.signs[0].width = 0;

    assert!(matches!(connect(&config), Err(HostError::Controller(_))));
}
