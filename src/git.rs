use std::path::Path;
use std::process::Command;
use thiserror::Error;

const DEPLOYMENT_DOMAIN: &str = "scm.azurewebsites.net";

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git: {0}. Is git installed?")]
    Spawn(#[source] std::io::Error),
    #[error("`{command}` failed: {stderr}")]
    Exit { command: String, stderr: String },
}

/// Provider-hosted git endpoint a push deploys from.
pub fn deployment_git_url(app_name: &str) -> String {
    format!("https://{app_name}.{DEPLOYMENT_DOMAIN}:443/{app_name}.git")
}

/// Point the current repository at the new deployment endpoint: drop any
/// existing "origin" remote and add an "azure" remote for the app.
pub fn fix_remotes(app_name: &str) -> Result<(), GitError> {
    fix_remotes_in(Path::new("."), app_name)
}

pub fn fix_remotes_in(repo: &Path, app_name: &str) -> Result<(), GitError> {
    match run_git(repo, &["remote", "remove", "origin"]) {
        Ok(_) => {}
        // no "origin" to begin with: nothing to remove
        Err(GitError::Exit { ref stderr, .. }) if is_missing_remote(stderr) => {}
        Err(err) => return Err(err),
    }

    run_git(
        repo,
        &["remote", "add", "azure", &deployment_git_url(app_name)],
    )?;
    Ok(())
}

fn run_git(repo: &Path, args: &[&str]) -> Result<String, GitError> {
    tracing::debug!(?args, "git");
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(GitError::Spawn)?;

    if !output.status.success() {
        return Err(GitError::Exit {
            command: format!("git {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn is_missing_remote(stderr: &str) -> bool {
    // "error: No such remote: 'origin'" on current git, "fatal: No such
    // remote: origin" on older releases
    stderr.contains("No such remote")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_url_for_app() {
        assert_eq!(
            deployment_git_url("myapp"),
            "https://myapp.scm.azurewebsites.net:443/myapp.git"
        );
    }

    #[test]
    fn missing_remote_detection() {
        assert!(is_missing_remote("error: No such remote: 'origin'"));
        assert!(is_missing_remote("fatal: No such remote: origin"));
        assert!(!is_missing_remote("fatal: not a git repository"));
        assert!(!is_missing_remote(""));
    }
}
