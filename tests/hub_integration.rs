use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn devhub(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("devhub").unwrap();
    cmd.env("DEVHUB_HOME", home).arg("--no-color");
    cmd
}

fn seed_post(home: &Path, title: &str) {
    devhub(home)
        .args([
            "post", "new", "--title", title, "--subject", "rust", "--language", "rust", "--code",
            "fn sort() {}", "--no-editor",
        ])
        .assert()
        .success();
}

#[test]
fn login_then_send_shows_in_feed() {
    let temp = tempfile::tempdir().unwrap();

    devhub(temp.path())
        .args(["login", "ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ada"));

    devhub(temp.path())
        .args(["send", "hello", "hub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Message sent"));

    devhub(temp.path())
        .arg("feed")
        .assert()
        .success()
        .stdout(predicate::str::contains("ada said"))
        .stdout(predicate::str::contains("hello hub"));

    // bare invocation falls back to the feed
    devhub(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("hello hub"));
}

#[test]
fn send_without_login_fails_and_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();

    devhub(temp.path())
        .args(["send", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user is logged in"));

    devhub(temp.path())
        .arg("feed")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity yet"))
        .stdout(predicate::str::contains("devhub login"));
}

#[test]
fn post_board_view_comment_and_favorite_flow() {
    let temp = tempfile::tempdir().unwrap();
    devhub(temp.path()).args(["login", "ada"]).assert().success();
    seed_post(temp.path(), "Quick sort");

    devhub(temp.path())
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("Subjects"))
        .stdout(predicate::str::contains("rust"));

    devhub(temp.path())
        .args(["board", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick sort"));

    devhub(temp.path())
        .args(["view", "Quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fn sort() {}"))
        .stdout(predicate::str::contains("Comments (0)"));

    devhub(temp.path())
        .args(["comment", "add", "Quick", "nice", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comment added"));

    devhub(temp.path())
        .args(["view", "Quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments (1)"))
        .stdout(predicate::str::contains("nice work"));

    devhub(temp.path())
        .args(["fav", "Quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));

    // starred posts surface under the Favorites pseudo-subject
    devhub(temp.path())
        .args(["board", "Favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick sort"));
}

#[test]
fn deleting_a_post_takes_its_comments_and_favorite_along() {
    let temp = tempfile::tempdir().unwrap();
    devhub(temp.path()).args(["login", "ada"]).assert().success();
    seed_post(temp.path(), "Quick sort");
    devhub(temp.path())
        .args(["comment", "add", "Quick", "nice"])
        .assert()
        .success();
    devhub(temp.path()).args(["fav", "Quick"]).assert().success();

    devhub(temp.path())
        .args(["post", "rm", "Quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted post"));

    devhub(temp.path())
        .args(["feed", "--type", "comment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity yet"));

    devhub(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No inconsistencies found."));

    // deleting again is a quiet no-op
    devhub(temp.path())
        .args(["post", "rm", "Quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing deleted."));
}

#[test]
fn corrupt_collection_recovers_with_a_warning() {
    let temp = tempfile::tempdir().unwrap();
    devhub(temp.path()).args(["login", "ada"]).assert().success();
    devhub(temp.path()).args(["send", "still here"]).assert().success();
    seed_post(temp.path(), "Quick sort");

    std::fs::write(temp.path().join("devhub_posts.json"), "{not json").unwrap();

    // the feed comes up with the post collection reset, everything else intact
    devhub(temp.path())
        .arg("feed")
        .assert()
        .success()
        .stderr(predicate::str::contains("devhub_posts"))
        .stdout(predicate::str::contains("still here"));

    // the next mutation rewrites the key cleanly
    devhub(temp.path()).args(["send", "again"]).assert().success();
    devhub(temp.path())
        .arg("feed")
        .assert()
        .success()
        .stderr(predicate::str::contains("devhub_posts").not());
}

#[test]
fn export_writes_a_gzip_archive() {
    let temp = tempfile::tempdir().unwrap();
    devhub(temp.path()).args(["login", "ada"]).assert().success();
    seed_post(temp.path(), "Quick sort");

    devhub(temp.path())
        .current_dir(temp.path())
        .args(["export", "Quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 post(s)"));

    let archive = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.file_name().to_string_lossy().ends_with(".tar.gz"))
        .expect("archive not written");
    let bytes = std::fs::read(archive.path()).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b], "missing gzip magic");
}

#[test]
fn theme_is_persisted_per_hub() {
    let temp = tempfile::tempdir().unwrap();

    devhub(temp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"));

    devhub(temp.path())
        .args(["theme", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to light"));

    devhub(temp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light"));

    devhub(temp.path())
        .args(["theme", "neon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown theme"));
}

#[test]
fn unknown_selector_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    devhub(temp.path()).args(["login", "ada"]).assert().success();

    devhub(temp.path())
        .args(["view", "nothing-like-this"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No post matches"));
}
