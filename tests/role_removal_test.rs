use httpmock::prelude::*;
use role_remover::{RemovalEngine, RemoverError, RunConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn mock_roles<'a>(server: &'a MockServer, user: &str, roles: serde_json::Value) -> httpmock::Mock<'a> {
    let user_param = format!("<userId>{}</userId>", user);
    server.mock(|when, then| {
        when.method(POST)
            .path("/xmlmc/admin/")
            .query_param("method", "userGetRoleList")
            .header("Authorization", "ESP-APIKEY test-key")
            .body_contains(user_param);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"@status": true, "params": {"role": roles}}));
    })
}

async fn run(server: &MockServer, csv: &NamedTempFile, dry_run: bool) -> role_remover::Result<role_remover::core::RunSummary> {
    let config = RunConfig::new("test-key", "acme", csv.path())
        .with_endpoint(server.url("/"))
        .with_dry_run(dry_run);
    RemovalEngine::new(config).run().await
}

#[tokio::test]
async fn test_end_to_end_role_removal() {
    let server = MockServer::start();
    let alice = mock_roles(&server, "alice", serde_json::json!(["Basic User Role"]));
    let bob = mock_roles(&server, "bob", serde_json::json!([]));
    let remove = server.mock(|when, then| {
        when.method(POST)
            .path("/xmlmc/admin/")
            .query_param("method", "userRemoveRole")
            .body_contains("<userId>alice</userId><role>Basic User Role</role>");
        then.status(200)
            .json_body(serde_json::json!({"@status": true}));
    });

    let csv = write_csv(b"userid,name\nalice,Alice\nbob,Bob\n");
    let summary = run(&server, &csv, false).await.unwrap();

    alice.assert();
    bob.assert();
    remove.assert_hits(1);
    assert_eq!(summary.removed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn test_dry_run_only_reads() {
    let server = MockServer::start();
    let alice = mock_roles(&server, "alice", serde_json::json!(["Basic User Role"]));
    let bob = mock_roles(&server, "bob", serde_json::json!("Coworker Lifecycle"));
    let remove = server.mock(|when, then| {
        when.method(POST)
            .path("/xmlmc/admin/")
            .query_param("method", "userRemoveRole");
        then.status(200)
            .json_body(serde_json::json!({"@status": true}));
    });

    let csv = write_csv(b"userid,name\nalice,Alice\nbob,Bob\n");
    let summary = run(&server, &csv, true).await.unwrap();

    alice.assert();
    bob.assert();
    remove.assert_hits(0);
    assert_eq!(summary.suppressed, 2);
    assert_eq!(summary.removed, 0);
    assert_eq!(summary.processed(), 2);
}

#[tokio::test]
async fn test_failing_user_does_not_stop_batch() {
    let server = MockServer::start();
    let alice = server.mock(|when, then| {
        when.method(POST)
            .path("/xmlmc/admin/")
            .query_param("method", "userGetRoleList")
            .body_contains("<userId>alice</userId>");
        then.status(500);
    });
    let bob = server.mock(|when, then| {
        when.method(POST)
            .path("/xmlmc/admin/")
            .query_param("method", "userGetRoleList")
            .body_contains("<userId>bob</userId>");
        then.status(200)
            .json_body(serde_json::json!({
                "@status": false,
                "state": {"error": "The specified user [bob] does not exist"}
            }));
    });
    let carol = mock_roles(&server, "carol", serde_json::json!(["Basic User Role"]));
    let remove = server.mock(|when, then| {
        when.method(POST)
            .path("/xmlmc/admin/")
            .query_param("method", "userRemoveRole")
            .body_contains("<userId>carol</userId>");
        then.status(200)
            .json_body(serde_json::json!({"state": {"error": "Permission denied"}}));
    });

    let csv = write_csv(b"userid\nalice\nbob\ncarol\n");
    let summary = run(&server, &csv, false).await.unwrap();

    alice.assert();
    bob.assert();
    carol.assert();
    remove.assert();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn test_latin1_export_is_processed() {
    let server = MockServer::start();
    let alice = mock_roles(&server, "alice", serde_json::json!(["Basic User Role"]));
    let remove = server.mock(|when, then| {
        when.method(POST)
            .path("/xmlmc/admin/")
            .query_param("method", "userRemoveRole")
            .body_contains("<userId>alice</userId>");
        then.status(200)
            .json_body(serde_json::json!({"@status": true}));
    });

    let csv = write_csv(b"userid,name\nalice,Ren\xe9e\n");
    let summary = run(&server, &csv, false).await.unwrap();

    alice.assert();
    remove.assert();
    assert_eq!(summary.removed, 1);
}

#[tokio::test]
async fn test_bom_prefixed_csv() {
    let server = MockServer::start();
    let alice = mock_roles(&server, "alice", serde_json::json!([]));

    let csv = write_csv(b"\xEF\xBB\xBFuserid,name\nalice,Alice\n");
    let summary = run(&server, &csv, false).await.unwrap();

    alice.assert();
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn test_broken_csv_makes_no_remote_calls() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(serde_json::json!({"@status": true}));
    });

    let csv = write_csv(b"userid,name\nalice,Alice\nbob\n");
    let err = run(&server, &csv, false).await.unwrap_err();

    assert!(matches!(err, RemoverError::CsvError(_)));
    any_call.assert_hits(0);
}
