use crate::db::ModelId;
use crate::error::CatalogError;
use crate::render::terminal;
use crate::service::session::LOGIN_REJECTED;
use crate::state::{CatalogState, Confirm, UPLOAD_SUCCESS};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::warn;

pub const HELP: &str = "\
Commands:
  list                  show the current listing
  login [credential]    enter admin mode (prompts when no credential is given)
  logout                leave admin mode
  name <text>           set the upload name
  thumbnail <path>      set the upload thumbnail image
  asset <path>          set the upload GLB file
  form                  show the pending upload
  upload                upload the pending model
  download <id>         save a model's GLB into the download directory
  delete <id>           delete a model (admin)
  seed                  add the sample models (admin)
  help                  show this text
  quit                  exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Login(Option<String>),
    Logout,
    Name(String),
    Thumbnail(PathBuf),
    Asset(PathBuf),
    Form,
    Upload,
    Download(ModelId),
    Delete(ModelId),
    Seed,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "login" => Command::Login((!rest.is_empty()).then(|| rest.to_string())),
            "logout" => Command::Logout,
            "name" => Command::Name(rest.to_string()),
            "thumbnail" => Command::Thumbnail(required_path(verb, rest)?),
            "asset" => Command::Asset(required_path(verb, rest)?),
            "form" => Command::Form,
            "upload" => Command::Upload,
            "download" => Command::Download(parse_id(verb, rest)?),
            "delete" | "rm" => Command::Delete(parse_id(verb, rest)?),
            "seed" => Command::Seed,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("Unknown command '{other}'; type 'help'")),
        };
        Ok(Some(cmd))
    }
}

fn required_path(verb: &str, rest: &str) -> Result<PathBuf, String> {
    if rest.is_empty() {
        return Err(format!("Usage: {verb} <path>"));
    }
    Ok(PathBuf::from(rest))
}

fn parse_id(verb: &str, rest: &str) -> Result<ModelId, String> {
    rest.parse()
        .map_err(|_| format!("Usage: {verb} <id> (got '{rest}')"))
}

/// Reads the confirmation answer from the same input stream as the commands.
struct ConsoleConfirm<'a, R, W> {
    lines: &'a mut Lines<R>,
    out: &'a mut W,
}

impl<R, W> Confirm for ConsoleConfirm<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn confirm(&mut self, message: &str) -> bool {
        if self
            .out
            .write_all(format!("{message} [y/N] ").as_bytes())
            .await
            .is_err()
            || self.out.flush().await.is_err()
        {
            return false;
        }
        match self.lines.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// Drive the catalog from line-oriented input until `quit` or end of input.
///
/// Action failures are printed and the loop carries on; only I/O errors on
/// the console itself end it.
pub async fn run<R, W>(state: &mut CatalogState, input: R, mut out: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    write_view(state, &mut out).await?;
    prompt(state, &mut out).await?;

    while let Some(line) = lines.next_line().await? {
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => {
                prompt(state, &mut out).await?;
                continue;
            }
            Err(msg) => {
                out.write_all(format!("{msg}\n").as_bytes()).await?;
                prompt(state, &mut out).await?;
                continue;
            }
        };

        if cmd == Command::Quit {
            break;
        }

        let result = execute(state, cmd, &mut lines, &mut out).await;
        if let Err(e) = result {
            match e {
                Failure::Io(e) => return Err(e),
                Failure::Catalog(e) => {
                    warn!(error = %e, "action failed");
                    out.write_all(format!("! {e}\n").as_bytes()).await?;
                }
            }
        }
        prompt(state, &mut out).await?;
    }
    out.flush().await
}

enum Failure {
    Io(std::io::Error),
    Catalog(CatalogError),
}

impl From<std::io::Error> for Failure {
    fn from(e: std::io::Error) -> Self {
        Failure::Io(e)
    }
}

impl From<CatalogError> for Failure {
    fn from(e: CatalogError) -> Self {
        Failure::Catalog(e)
    }
}

async fn execute<R, W>(
    state: &mut CatalogState,
    cmd: Command,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<(), Failure>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match cmd {
        Command::List => {
            state.reload().await?;
            write_view(state, out).await?;
        }
        Command::Login(credential) => {
            state.session_mut().reset_login_form();
            let credential = match credential {
                Some(c) => c,
                None => {
                    out.write_all(b"Admin password: ").await?;
                    out.flush().await?;
                    lines.next_line().await?.unwrap_or_default()
                }
            };
            if state.login(&credential).await? {
                state.session_mut().reset_login_form();
                out.write_all(b"Admin mode enabled.\n").await?;
                write_view(state, out).await?;
            } else {
                let msg = state.session().login_error().unwrap_or(LOGIN_REJECTED);
                out.write_all(format!("! {msg}\n").as_bytes()).await?;
            }
        }
        Command::Logout => {
            state.logout();
            out.write_all(b"Logged out.\n").await?;
            write_view(state, out).await?;
        }
        Command::Name(name) => {
            state.require_admin("edit the upload form")?;
            state.upload_form.name = name;
        }
        Command::Thumbnail(path) => {
            state.require_admin("edit the upload form")?;
            state.upload_form.thumbnail = Some(path);
        }
        Command::Asset(path) => {
            state.require_admin("edit the upload form")?;
            state.upload_form.asset = Some(path);
        }
        Command::Form => {
            let form = &state.upload_form;
            let show = |p: &Option<PathBuf>| {
                p.as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<none>".to_string())
            };
            out.write_all(
                format!(
                    "name: {}\nthumbnail: {}\nasset: {}\n",
                    form.name,
                    show(&form.thumbnail),
                    show(&form.asset)
                )
                .as_bytes(),
            )
            .await?;
        }
        Command::Upload => {
            let record = state.upload().await?;
            out.write_all(format!("{UPLOAD_SUCCESS} (id {})\n", record.id).as_bytes())
                .await?;
            write_view(state, out).await?;
        }
        Command::Download(id) => {
            let path = state.download(id).await?;
            out.write_all(format!("Saved {}\n", path.display()).as_bytes())
                .await?;
        }
        Command::Delete(id) => {
            let mut confirm = ConsoleConfirm {
                lines,
                out: &mut *out,
            };
            if state.delete(id, &mut confirm).await? {
                out.write_all(format!("Deleted model {id}.\n").as_bytes())
                    .await?;
                write_view(state, out).await?;
            } else {
                out.write_all(b"Cancelled.\n").await?;
            }
        }
        Command::Seed => {
            let added = state.seed().await?;
            out.write_all(format!("Added {added} sample models.\n").as_bytes())
                .await?;
            write_view(state, out).await?;
        }
        Command::Help => out.write_all(HELP.as_bytes()).await?,
        Command::Quit => {}
    }
    Ok(())
}

async fn write_view<W: AsyncWrite + Unpin>(state: &CatalogState, out: &mut W) -> std::io::Result<()> {
    let text = terminal::render(state.active_view(), state.session().view_mode());
    out.write_all(text.as_bytes()).await
}

async fn prompt<W: AsyncWrite + Unpin>(state: &CatalogState, out: &mut W) -> std::io::Result<()> {
    let marker = if state.session().is_admin() { "admin> " } else { "> " };
    out.write_all(marker.as_bytes()).await?;
    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("  list "), Ok(Some(Command::List)));
        assert_eq!(
            Command::parse("name   Sacred Mandala"),
            Ok(Some(Command::Name("Sacred Mandala".to_string())))
        );
        assert_eq!(
            Command::parse("asset ./models/mandala.glb"),
            Ok(Some(Command::Asset(PathBuf::from("./models/mandala.glb"))))
        );
        assert_eq!(Command::parse("DELETE 12"), Ok(Some(Command::Delete(12))));
        assert_eq!(Command::parse("login"), Ok(Some(Command::Login(None))));
        assert_eq!(
            Command::parse("login secret"),
            Ok(Some(Command::Login(Some("secret".to_string()))))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(Command::parse("download abc").is_err());
        assert!(Command::parse("thumbnail").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }
}
