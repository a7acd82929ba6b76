//! Download behavior through the real binary: artifact and expansion file
//! placement, missing packages, auth recovery

mod common;

use common::{TestEnv, playfetch_cmd};
use httpmock::prelude::*;
use predicates::prelude::*;

const APK_PAYLOAD: &[u8] = b"PK\x03\x04 fake apk bytes";
const OBB_MAIN: &[u8] = b"main expansion payload";
const OBB_PATCH: &[u8] = b"patch expansion payload";

fn mock_login_ok(env: &TestEnv) -> httpmock::Mock<'_> {
    env.server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(200)
            .json_body(serde_json::json!({"subToken": "sub-1"}));
    })
}

fn mock_delivery<'a>(env: &'a TestEnv, package: &str) -> httpmock::Mock<'a> {
    let delivery = serde_json::json!({
        "docId": package,
        "versionCode": 42,
        "downloadUrl": format!("/artifacts/{package}.apk"),
        "additionalFiles": [
            {
                "fileType": "main",
                "versionCode": 42,
                "downloadUrl": format!("/artifacts/main.{package}.obb")
            },
            {
                "fileType": "patch",
                "versionCode": 41,
                "downloadUrl": format!("/artifacts/patch.{package}.obb")
            }
        ]
    });
    env.server.mock(move |when, then| {
        when.method(GET)
            .path("/catalog/delivery")
            .query_param("doc", package);
        then.status(200).json_body(delivery.clone());
    })
}

fn mock_artifacts(env: &TestEnv, package: &str) {
    let apk_path = format!("/artifacts/{package}.apk");
    env.server.mock(move |when, then| {
        when.method(GET).path(apk_path.clone());
        then.status(200).body(APK_PAYLOAD);
    });
    let main_path = format!("/artifacts/main.{package}.obb");
    env.server.mock(move |when, then| {
        when.method(GET).path(main_path.clone());
        then.status(200).body(OBB_MAIN);
    });
    let patch_path = format!("/artifacts/patch.{package}.obb");
    env.server.mock(move |when, then| {
        when.method(GET).path(patch_path.clone());
        then.status(200).body(OBB_PATCH);
    });
}

#[test]
fn test_download_writes_apk_with_exact_payload() {
    let env = TestEnv::new();
    mock_login_ok(&env);
    mock_delivery(&env, "com.example.app");
    mock_artifacts(&env, "com.example.app");
    env.seed_cache("tok", "beef");
    let config = env.write_config();

    playfetch_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-d", "com.example.app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded com.example.app"));

    let apk = env.download_dir().join("com.example.app.apk");
    assert_eq!(std::fs::read(&apk).expect("apk written"), APK_PAYLOAD);
    // Additional files only with -a
    assert!(
        !env.download_dir()
            .join("main.42.com.example.app.obb")
            .exists()
    );
}

#[test]
fn test_download_with_additional_files_writes_obbs() {
    let env = TestEnv::new();
    mock_login_ok(&env);
    mock_delivery(&env, "com.example.game");
    mock_artifacts(&env, "com.example.game");
    env.seed_cache("tok", "beef");
    let config = env.write_config();

    playfetch_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-d", "com.example.game", "-a"])
        .assert()
        .success();

    let main_obb = env.download_dir().join("main.42.com.example.game.obb");
    let patch_obb = env.download_dir().join("patch.41.com.example.game.obb");
    assert_eq!(std::fs::read(&main_obb).expect("main obb"), OBB_MAIN);
    assert_eq!(std::fs::read(&patch_obb).expect("patch obb"), OBB_PATCH);
}

#[test]
fn test_download_creates_missing_folder() {
    let env = TestEnv::new();
    mock_login_ok(&env);
    mock_delivery(&env, "com.example.app");
    mock_artifacts(&env, "com.example.app");
    env.seed_cache("tok", "beef");
    let config = env.write_config();
    let folder = env.temp.path().join("not/yet/here");

    playfetch_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-d", "com.example.app", "-f"])
        .arg(&folder)
        .assert()
        .success();

    assert!(folder.join("com.example.app.apk").is_file());
}

#[test]
fn test_download_missing_package_is_nonfatal() {
    let env = TestEnv::new();
    mock_login_ok(&env);
    env.server.mock(|when, then| {
        when.method(GET).path("/catalog/delivery");
        then.status(404);
    });
    env.seed_cache("tok", "beef");
    let config = env.write_config();

    playfetch_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-d", "com.missing.app"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error while downloading com.missing.app",
        ))
        .stdout(predicate::str::contains("does not exist"));

    assert!(!env.download_dir().join("com.missing.app.apk").exists());
}

#[test]
fn test_download_remote_failure_is_nonfatal() {
    let env = TestEnv::new();
    mock_login_ok(&env);
    env.server.mock(|when, then| {
        when.method(GET).path("/catalog/delivery");
        then.status(502).body("bad gateway");
    });
    env.seed_cache("tok", "beef");
    let config = env.write_config();

    playfetch_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-d", "com.example.app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error while downloading"));
}

#[test]
fn test_download_auth_failure_refreshes_once() {
    let env = TestEnv::new();
    let login = mock_login_ok(&env);
    let dispense = env.server.mock(|when, then| {
        when.method(GET).path("/token");
        then.status(200).body("fresh cafe");
    });
    let delivery = env.server.mock(|when, then| {
        when.method(GET).path("/catalog/delivery");
        then.status(401);
    });
    env.seed_cache("stale", "beef");
    let config = env.write_config();

    // Both attempts fail with the auth classification: the failure is
    // reported per-item after exactly one refresh, not retried again
    playfetch_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-d", "com.example.app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error while downloading"));

    delivery.assert_hits(2);
    dispense.assert_hits(1);
    login.assert_hits(2);
}
