use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

use super::config::Config;

/// Parameters gathered interactively for a publish run. `name` is used for
/// both the resource group and the web app (one app per resource group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    pub tenant_id: Option<String>,
    pub name: String,
    pub location: String,
}

/// Interactive prompt session owning the input and output handles.
///
/// Callers acquire one inside a scoped block so the handles are released on
/// every exit path, before any remote call starts.
pub struct PromptSession<R, W> {
    input: R,
    output: W,
}

impl PromptSession<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    /// Prompt for a tenant id, showing the cached value as the default.
    ///
    /// A non-empty answer wins and is persisted for the next run. An empty
    /// answer falls back to the cached value, which is not re-persisted.
    pub fn prompt_tenant_id(&mut self, config_path: &Path) -> Result<Option<String>> {
        let cached = Config::load_or_default(config_path)
            .cached_tenant_id()
            .map(str::to_string);

        let shown = cached.as_deref().unwrap_or("none");
        let answer = self.ask(&format!("(optional) Tenant ID [default: {shown}]: "))?;

        if answer.is_empty() {
            return Ok(cached);
        }

        let mut config = Config::load_or_default(config_path);
        config.tenant_id = Some(answer.clone());
        config.save_to(config_path)?;
        Ok(Some(answer))
    }

    /// Run the full publish questionnaire: tenant id, region, app name.
    pub fn prompt_publish_parameters(&mut self, config_path: &Path) -> Result<PublishOptions> {
        let tenant_id = self.prompt_tenant_id(config_path)?;
        let location = self.ask("Location (found by running `azpub regions`): ")?;
        let name = self.ask("Web app name: ")?;

        Ok(PublishOptions {
            tenant_id,
            name,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(input: &str) -> PromptSession<Cursor<Vec<u8>>, Vec<u8>> {
        PromptSession::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn config_with_tenant(dir: &TempDir, tenant: &str) -> std::path::PathBuf {
        let path = dir.path().join(".azpub.toml");
        std::fs::write(&path, format!("tenant_id = \"{tenant}\"\n")).unwrap();
        path
    }

    #[test]
    fn empty_input_keeps_cached_tenant() {
        let dir = TempDir::new().unwrap();
        let path = config_with_tenant(&dir, "T1");
        let written = std::fs::read_to_string(&path).unwrap();

        let mut session = session("\n");
        let tenant = session.prompt_tenant_id(&path).unwrap();

        assert_eq!(tenant.as_deref(), Some("T1"));
        // cached value was already stored, so the file is untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn entered_tenant_overrides_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = config_with_tenant(&dir, "T1");

        let mut session = session("T2\n");
        let tenant = session.prompt_tenant_id(&path).unwrap();

        assert_eq!(tenant.as_deref(), Some("T2"));
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tenant_id.as_deref(), Some("T2"));
    }

    #[test]
    fn no_cache_and_empty_input_yields_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".azpub.toml");

        let mut session = session("\n");
        let tenant = session.prompt_tenant_id(&path).unwrap();

        assert_eq!(tenant, None);
        assert!(!path.exists(), "nothing should be persisted");
    }

    #[test]
    fn default_shown_is_cached_value() {
        let dir = TempDir::new().unwrap();
        let path = config_with_tenant(&dir, "contoso");

        let mut session = session("\n");
        session.prompt_tenant_id(&path).unwrap();

        let output = String::from_utf8(session.output).unwrap();
        assert_eq!(output, "(optional) Tenant ID [default: contoso]: ");
    }

    #[test]
    fn default_shown_is_none_without_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".azpub.toml");

        let mut session = session("\n");
        session.prompt_tenant_id(&path).unwrap();

        let output = String::from_utf8(session.output).unwrap();
        assert_eq!(output, "(optional) Tenant ID [default: none]: ");
    }

    #[test]
    fn publish_parameters_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".azpub.toml");

        let mut session = session("contoso\nwestus\nmyapp123\n");
        let options = session.prompt_publish_parameters(&path).unwrap();

        assert_eq!(
            options,
            PublishOptions {
                tenant_id: Some("contoso".to_string()),
                name: "myapp123".to_string(),
                location: "westus".to_string(),
            }
        );

        let output = String::from_utf8(session.output).unwrap();
        assert!(output.contains("Location (found by running `azpub regions`): "));
        assert!(output.ends_with("Web app name: "));
    }

    #[test]
    fn input_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".azpub.toml");

        let mut session = session("  contoso  \nwestus\nmyapp\n");
        let options = session.prompt_publish_parameters(&path).unwrap();

        assert_eq!(options.tenant_id.as_deref(), Some("contoso"));
    }
}
