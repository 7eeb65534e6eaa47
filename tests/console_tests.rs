mod common;

use divine_catalog::CatalogState;
use divine_catalog::db;
use divine_catalog::handlers::console;
use divine_catalog::render::terminal::EMPTY_STATE;
use divine_catalog::service::session::{LOGIN_REJECTED, SessionGate};
use divine_catalog::state::DELETE_PROMPT;

async fn run_script(label: &str, script: &str) -> (String, usize) {
    let db_path = common::temp_path(label, "sqlite");
    let store = db::spawn(&common::database_url(&db_path))
        .await
        .expect("store should open");
    let download_dir = common::temp_path(label, "downloads");
    let mut state =
        CatalogState::with_session(store.clone(), &download_dir, SessionGate::new("pwd"));
    state.reload().await.unwrap();

    let mut out = Vec::new();
    console::run(&mut state, script.as_bytes(), &mut out)
        .await
        .expect("console failed");

    let stored = store.list_all().await.unwrap().len();
    store.shutdown().await;
    common::cleanup_db(&db_path);
    let _ = std::fs::remove_dir_all(&download_dir);
    (String::from_utf8(out).expect("console output was not utf-8"), stored)
}

#[tokio::test]
async fn public_session_shows_empty_state_and_rejects_bad_login() {
    let (out, stored) = run_script("console-public", "list\nlogin nope\nseed\nquit\n").await;

    assert!(out.contains(EMPTY_STATE));
    assert!(out.contains(LOGIN_REJECTED));
    assert!(out.contains("Admin access required"));
    assert!(!out.contains("admin> "));
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn admin_uploads_and_deletes_through_console() {
    let thumb = common::write_fixture("thumb.png", b"png");
    let asset = common::write_fixture("asset.glb", b"glTF");
    let script = format!(
        "login\npwd\nname Golden Buddha\nthumbnail {}\nasset {}\nupload\ndelete 1\nn\n",
        thumb.display(),
        asset.display()
    );

    let (out, stored) = run_script("console-admin", &script).await;
    let _ = std::fs::remove_file(&thumb);
    let _ = std::fs::remove_file(&asset);

    assert!(out.contains("Admin password: "));
    assert!(out.contains("Admin mode enabled."));
    assert!(out.contains("Model uploaded successfully with security features applied!"));
    assert!(out.contains("[1] Golden Buddha"));
    assert!(out.contains("download 1 | delete 1"));
    assert!(out.contains(DELETE_PROMPT));
    assert!(out.contains("Cancelled."));
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn confirmed_delete_returns_to_empty_state() {
    let (out, stored) = run_script(
        "console-delete",
        "login pwd\nseed\ndelete 1\ny\ndelete 2\nyes\ndelete 3\nY\nlogout\n",
    )
    .await;

    assert!(out.contains("Added 3 sample models."));
    assert!(out.contains("Deleted model 3."));
    assert!(out.contains("Logged out."));
    assert!(out.trim_end().ends_with(&format!("{EMPTY_STATE}\n>")));
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn validation_error_is_reported_and_loop_continues() {
    let (out, stored) = run_script("console-validate", "login pwd\nname Lonely\nupload\nform\n").await;

    assert!(out.contains("! Please fill all fields and select both thumbnail and GLB files"));
    assert!(out.contains("name: Lonely"));
    assert!(out.contains("thumbnail: <none>"));
    assert_eq!(stored, 0);
}
