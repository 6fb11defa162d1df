use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

// Test event constants
const PUBLIC_ACL_EVENT: &str = r#"{"detail": {"eventName": "PutBucketAcl", "requestParameters": {"bucketName": "static-site", "x-amz-acl": ["public-read"]}}}"#;

const PUBLIC_POLICY_EVENT: &str = r#"{"detail": {"eventName": "PutBucketPolicy", "requestParameters": {"bucketName": "static-site", "bucketPolicy": {"Statement": [{"Effect": "Allow", "Principal": "*", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::static-site/*"}]}}}}"#;

const CREATE_BUCKET_EVENT: &str = r#"{"detail": {"eventName": "CreateBucket", "requestParameters": {"bucketName": "fresh-bucket"}}}"#;

const MISSING_BUCKET_EVENT: &str =
    r#"{"detail": {"eventName": "PutBucketAcl", "requestParameters": {}}}"#;

/// The binary with an offline AWS environment; none of these tests reach AWS.
fn responder() -> Command {
    let mut cmd = Command::cargo_bin("s3-exposure-remediation").expect("binary should build");
    cmd.env_remove("S3_WHITELIST")
        .env_remove("RUST_LOG")
        .env("AWS_REGION", "us-east-1")
        .env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "secret")
        .env("AWS_EC2_METADATA_DISABLED", "true");
    cmd
}

#[test]
fn help_describes_event_option() {
    responder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--event"))
        .stdout(predicate::str::contains("S3_WHITELIST"));
}

#[test]
fn test_whitelisted_acl_event_is_skipped() {
    responder()
        .env("S3_WHITELIST", "logs, static-site")
        .write_stdin(PUBLIC_ACL_EVENT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome":"skipped""#))
        .stdout(predicate::str::contains("static-site"));
}

#[test]
fn test_whitelist_flag_overrides_environment() {
    responder()
        .env("S3_WHITELIST", "other-bucket")
        .args(["--whitelist", "static-site"])
        .write_stdin(PUBLIC_POLICY_EVENT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome":"skipped""#));
}

#[test]
fn test_event_file_is_read() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(PUBLIC_POLICY_EVENT.as_bytes())
        .expect("write event");

    responder()
        .env("S3_WHITELIST", "static-site")
        .arg("--event")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome":"skipped""#));
}

#[test]
fn test_other_event_is_ignored() {
    responder()
        .env("S3_WHITELIST", "")
        .write_stdin(CREATE_BUCKET_EVENT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome":"ignored""#))
        .stdout(predicate::str::contains("CreateBucket"));
}

#[test]
fn test_missing_bucket_name_fails_invocation() {
    responder()
        .env("S3_WHITELIST", "")
        .write_stdin(MISSING_BUCKET_EVENT)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed event"));
}

#[test]
fn test_invalid_json_fails_invocation() {
    responder()
        .env("S3_WHITELIST", "")
        .write_stdin("{not json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed event"));
}

#[test]
fn test_missing_event_file_fails_invocation() {
    responder()
        .env("S3_WHITELIST", "")
        .args(["--event", "/nonexistent/event.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read event file"));
}

#[test]
fn test_missing_whitelist_is_configuration_error() {
    responder()
        .write_stdin(CREATE_BUCKET_EVENT)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("S3_WHITELIST is not set"));
}

#[test]
fn test_malformed_whitelist_is_configuration_error() {
    responder()
        .env("S3_WHITELIST", "logs,,static-site")
        .write_stdin(CREATE_BUCKET_EVENT)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}
