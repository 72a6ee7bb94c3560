//! End-to-end commit-step scenarios against real temporary checkouts
//! with a local bare remote.

use std::path::Path;
use std::process::Command;

use autocommit_core::{run_step, PathStatus, Repo, StepError, StepInput, StepOutcome};

fn run_git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn git_stdout(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Checkout with one initial commit plus a bare `origin` remote.
fn make_checkout_with_origin() -> (tempfile::TempDir, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    run_git(dir.path(), &["init", "-b", "main"]);
    run_git(dir.path(), &["config", "user.name", "operator"]);
    run_git(dir.path(), &["config", "user.email", "operator@example.com"]);
    run_git(dir.path(), &["commit", "--allow-empty", "-m", "initial"]);

    let remote = tempfile::tempdir().unwrap();
    run_git(remote.path(), &["init", "--bare", "-b", "main"]);
    run_git(
        dir.path(),
        &["remote", "add", "origin", remote.path().to_str().unwrap()],
    );
    (dir, remote)
}

fn step_input(modified: &str, pipeline_ref: &str) -> StepInput {
    StepInput {
        token: "t0k3n".to_string(),
        message: "pipeline: update assets".to_string(),
        modified: modified.to_string(),
        pipeline_ref: pipeline_ref.to_string(),
        actor: "octocat".to_string(),
        host_domain: "github.com".to_string(),
        remote: "origin".to_string(),
    }
}

#[tokio::test]
async fn scenario_commit_and_push_with_fallback_identity() {
    let (dir, remote) = make_checkout_with_origin();
    run_git(dir.path(), &["branch", "feature/login"]);
    run_git(dir.path(), &["config", "--unset", "user.name"]);
    run_git(dir.path(), &["config", "--unset", "user.email"]);
    std::fs::write(dir.path().join("a.txt"), "content").unwrap();

    let repo = Repo::open(dir.path());
    let outcome = run_step(&repo, &step_input(r#"["a.txt"]"#, "refs/heads/feature/login"))
        .await
        .unwrap();

    let StepOutcome::Committed { branch, commit } = outcome else {
        panic!("expected a commit");
    };
    assert_eq!(branch, "feature/login");

    // The remote accepted exactly the created commit.
    assert_eq!(git_stdout(remote.path(), &["rev-parse", "feature/login"]), commit.as_str());

    // The fallback identity was attributed and persisted.
    let author = git_stdout(dir.path(), &["log", "-1", "--format=%an <%ae>"]);
    assert_eq!(author, "octocat <octocat@users.noreply.github.com>");
    assert_eq!(
        git_stdout(dir.path(), &["config", "--local", "user.email"]),
        "octocat@users.noreply.github.com"
    );
}

#[tokio::test]
async fn scenario_empty_modified_set_succeeds_without_mutation() {
    let (dir, remote) = make_checkout_with_origin();
    let head_before = git_stdout(dir.path(), &["rev-parse", "HEAD"]);

    let repo = Repo::open(dir.path());
    let outcome = run_step(&repo, &step_input("[]", "refs/heads/main"))
        .await
        .unwrap();

    assert!(matches!(outcome, StepOutcome::NoOp));
    assert_eq!(git_stdout(dir.path(), &["rev-parse", "HEAD"]), head_before);
    // Nothing was pushed.
    assert!(git_stdout(remote.path(), &["branch", "--list"]).is_empty());
}

#[tokio::test]
async fn scenario_malformed_modified_list_succeeds_as_noop() {
    let (dir, _remote) = make_checkout_with_origin();
    let repo = Repo::open(dir.path());

    let outcome = run_step(&repo, &step_input(r#"{"not": "an array"}"#, "refs/heads/main"))
        .await
        .unwrap();
    assert!(matches!(outcome, StepOutcome::NoOp));
}

#[tokio::test]
async fn scenario_unchanged_path_fails_without_commit_or_push() {
    let (dir, remote) = make_checkout_with_origin();
    std::fs::write(dir.path().join("b.txt"), "same").unwrap();
    run_git(dir.path(), &["add", "b.txt"]);
    run_git(dir.path(), &["commit", "-m", "add b"]);
    let head_before = git_stdout(dir.path(), &["rev-parse", "HEAD"]);

    let repo = Repo::open(dir.path());
    let err = run_step(&repo, &step_input(r#"["b.txt"]"#, "refs/heads/main"))
        .await
        .unwrap_err();

    match err {
        StepError::StagingMismatch { path, status } => {
            assert_eq!(path, "b.txt");
            assert_eq!(status, PathStatus::Unchanged);
        }
        other => panic!("expected StagingMismatch, got {other}"),
    }
    assert_eq!(git_stdout(dir.path(), &["rev-parse", "HEAD"]), head_before);
    assert!(git_stdout(remote.path(), &["branch", "--list"]).is_empty());
}

#[tokio::test]
async fn scenario_short_ref_fails_with_invalid_ref() {
    let (dir, _remote) = make_checkout_with_origin();
    std::fs::write(dir.path().join("a.txt"), "content").unwrap();

    let repo = Repo::open(dir.path());
    let err = run_step(&repo, &step_input(r#"["a.txt"]"#, "refs/heads"))
        .await
        .unwrap_err();
    assert!(matches!(err, StepError::InvalidRef(_)));
}

#[tokio::test]
async fn scenario_rejected_push_carries_every_error_message() {
    let (dir, remote) = make_checkout_with_origin();
    run_git(dir.path(), &["push", "origin", "main:main"]);

    // Move the remote's main to an unrelated history so the step's
    // push is non-fast-forward.
    let other = tempfile::tempdir().unwrap();
    run_git(other.path(), &["init", "-b", "main"]);
    run_git(other.path(), &["config", "user.name", "other"]);
    run_git(other.path(), &["config", "user.email", "other@example.com"]);
    run_git(other.path(), &["commit", "--allow-empty", "-m", "diverge"]);
    run_git(
        other.path(),
        &["push", "--force", remote.path().to_str().unwrap(), "main:main"],
    );

    std::fs::write(dir.path().join("a.txt"), "content").unwrap();
    let repo = Repo::open(dir.path());
    let err = run_step(&repo, &step_input(r#"["a.txt"]"#, "refs/heads/main"))
        .await
        .unwrap_err();

    let StepError::PushRejected(errors) = err else {
        panic!("expected PushRejected");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("main"));
    // Every rejection reaches the host through messages().
    assert_eq!(StepError::PushRejected(errors.clone()).messages(), errors);
}
