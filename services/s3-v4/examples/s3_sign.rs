//! Example of signing S3 requests against a local MinIO server

use http::{HeaderMap, HeaderValue, Method};
use s3sign_v4::{Body, Config, SignRequest, Signer};
use std::io::{Seek, SeekFrom, Write};

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug to print the canonical request and string to sign.
    env_logger::init();

    let config = Config {
        endpoint: std::env::var("S3_ENDPOINT").unwrap_or_else(|_| "localhost".to_string()),
        ..Config::new("minioadmin", "minioadmin")
    };
    let base = config.endpoint_url()?;
    let signer = Signer::new(config);

    // A small object kept in memory.
    let mut req = SignRequest::new(Method::PUT, format!("{base}/bucket/hello.txt"))
        .with_body("Hello, World!");
    let sig = signer.sign_request(&mut req)?;
    println!("PUT {}", req.url);
    for (name, value) in sig.headers() {
        println!("  {name}: {value:?}");
    }

    // A file is hashed in place and rewound for sending.
    let mut file = tempfile::tempfile()?;
    file.write_all(&vec![b'x'; 8 * 1024 * 1024])?;
    file.seek(SeekFrom::Start(0))?;
    let mut req = SignRequest::new(Method::PUT, format!("{base}/bucket/large.bin"))
        .with_body(Body::seekable(&mut file));
    let sig = signer.sign_request(&mut req)?;
    println!("PUT {}/bucket/large.bin", base);
    println!("  x-amz-content-sha256: {}", sig.content_sha256());

    // Skip hashing entirely.
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-amz-content-sha256",
        HeaderValue::from_static("UNSIGNED-PAYLOAD"),
    );
    let mut req = SignRequest::new(Method::GET, format!("{base}/bucket/hello.txt?versionId=1"))
        .with_headers(headers);
    let sig = signer.sign_request(&mut req)?;

    let mut outgoing = req.headers.clone();
    sig.apply(&mut outgoing);
    println!("GET {}", req.url);
    println!("  signed with {} headers", outgoing.len());

    Ok(())
}
