use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, mpsc};
use std::thread;

use net::{FetchError, HttpWordSource, fetch_words_in_background};
use words::{WordCache, WordSource};

/// Serve exactly one HTTP response on a loopback port; returns the base URL.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        // drain the request head
        while reader.read_line(&mut line).unwrap() > 0 {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }
        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
    });
    format!("http://{addr}")
}

const DOC: &str = r#"{"words":{"pose":{"sit":"sitting down"}},"categories":["pose"]}"#;

#[test]
fn fetches_the_word_document() {
    let base = serve_once("200 OK", DOC);
    let data = HttpWordSource::for_server(&base)
        .without_proxy()
        .fetch_words()
        .unwrap();
    assert_eq!(data.categories, vec!["pose"]);
    assert!(data.words.get("pose").is_some());
}

#[test]
fn non_200_is_a_status_error() {
    let base = serve_once("404 Not Found", "{}");
    let err = HttpWordSource::for_server(&base)
        .without_proxy()
        .fetch_words()
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[test]
fn garbage_body_is_a_decode_error() {
    let base = serve_once("200 OK", "<html>");
    let err = HttpWordSource::for_server(&base)
        .without_proxy()
        .fetch_words()
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn cache_over_a_failing_server_stays_empty() {
    let base = serve_once("500 Internal Server Error", "");
    let source = HttpWordSource::for_server(&base).without_proxy();
    assert!(source.fetch().is_err());

    let base = serve_once("500 Internal Server Error", "");
    let cache = WordCache::new(HttpWordSource::for_server(&base).without_proxy());
    assert!(cache.get().is_empty());
}

#[test]
fn background_fetch_reports_through_the_callback() {
    let base = serve_once("200 OK", DOC);
    let (tx, rx) = mpsc::channel();
    let tx = std::sync::Mutex::new(tx);
    let handle = fetch_words_in_background(
        HttpWordSource::for_server(&base).without_proxy(),
        Arc::new(move |fetch| {
            tx.lock().unwrap().send(fetch).unwrap();
        }),
    );
    handle.join().unwrap();

    let fetch = rx.recv().unwrap();
    assert!(fetch.url.ends_with("/cps/get_words"));
    assert_eq!(fetch.result.unwrap().categories, vec!["pose"]);
}
