//! Real service integration tests against MinIO.
//!
//! # Requirements
//!
//! 1. MinIO running on `localhost:9000` with the default `minioadmin` account:
//!    ```bash
//!    docker run -p 9000:9000 minio/minio server /data
//!    ```
//!
//! 2. The gateway running against it:
//!    ```bash
//!    AWS_ACCESS_KEY_ID=minioadmin AWS_SECRET_ACCESS_KEY=minioadmin \
//!      cargo run -- --endpoint-url http://localhost:9000 8080
//!    ```
//!
//! # Running the tests
//!
//! ```bash
//! cargo test --test integration real_service -- --ignored
//! ```

use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;

/// Default URLs for the local setup
const MINIO_ENDPOINT: &str = "http://localhost:9000";
const GATEWAY_URL: &str = "http://localhost:8080";
const BUCKET: &str = "gateway-test";
const REGION: &str = "us-east-1";

/// MinIO credentials
const MINIO_ACCESS_KEY: &str = "minioadmin";
const MINIO_SECRET_KEY: &str = "minioadmin";

fn minio_client() -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(REGION))
        .endpoint_url(MINIO_ENDPOINT)
        .force_path_style(true)
        .credentials_provider(Credentials::new(
            MINIO_ACCESS_KEY,
            MINIO_SECRET_KEY,
            None,
            None,
            "minio",
        ))
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

async fn seed_object(key: &str, body: &'static [u8], content_type: &str) {
    let client = minio_client();

    // Bucket may already exist from a previous run
    let _ = client.create_bucket().bucket(BUCKET).send().await;

    client
        .put_object()
        .bucket(BUCKET)
        .key(key)
        .content_type(content_type)
        .body(ByteStream::from_static(body))
        .send()
        .await
        .expect("failed to upload test object");
}

#[tokio::test]
#[ignore]
async fn test_real_object_download() {
    seed_object("dir/hello.txt", b"hello world", "text/plain").await;

    let response = http_client()
        .get(format!("{}/{}/{}/dir/hello.txt", GATEWAY_URL, REGION, BUCKET))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain"
    );
    assert_eq!(response.headers().get("content-length").unwrap(), "11");
    assert_eq!(&response.bytes().await.unwrap()[..], b"hello world");
}

#[tokio::test]
#[ignore]
async fn test_real_missing_object() {
    let response = http_client()
        .get(format!("{}/{}/{}/does/not/exist", GATEWAY_URL, REGION, BUCKET))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_real_missing_bucket() {
    let response = http_client()
        .get(format!("{}/{}/no-such-bucket-here/key", GATEWAY_URL, REGION))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
