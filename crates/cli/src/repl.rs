//! Line commands for the interactive console.

use anyhow::{anyhow, bail};
use shelf_app::console::{LibraryConsole, Settled};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
commands:
  list               reload the book list
  title <text>       set the title field
  author <text>      set the author field
  available <yes|no> set the availability flag
  submit             add the book, or update it in edit mode
  edit <id>          edit a listed book
  cancel             leave edit mode
  delete <id>        delete a listed book
  help               show this help
  quit               leave the console";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Title(String),
    Author(String),
    Available(bool),
    Submit,
    Edit(String),
    Cancel,
    Delete(String),
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let argument = |name: &str| {
            if rest.is_empty() {
                Err(anyhow!("'{}' needs an argument", name))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word {
            "list" | "ls" => Command::List,
            // Fields may be cleared, so an empty argument is allowed here.
            "title" => Command::Title(rest.to_string()),
            "author" => Command::Author(rest.to_string()),
            "available" => match rest {
                "yes" | "y" | "true" => Command::Available(true),
                "no" | "n" | "false" => Command::Available(false),
                other => bail!("expected yes or no, got '{}'", other),
            },
            "submit" => Command::Submit,
            "edit" => Command::Edit(argument("edit")?),
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(argument("delete")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{}'", other),
        };
        Ok(command)
    }
}

/// Outcome line for a settled action, if there is anything to say.
pub fn describe(settled: &Settled) -> Option<String> {
    if settled.is_skipped() {
        return Some("nothing to update: no book is being edited".to_string());
    }
    settled
        .failure()
        .map(|error| format!("request failed (ignored): {}", error))
}

/// Apply one command. Returns `false` when the session should end.
pub async fn execute<W>(
    console: &LibraryConsole,
    command: Command,
    out: &mut W,
) -> anyhow::Result<bool>
where
    W: AsyncWrite + Unpin,
{
    let settled = match command {
        Command::Quit => return Ok(false),
        Command::Help => {
            out.write_all(format!("{}\n", HELP).as_bytes()).await?;
            return Ok(true);
        }
        Command::List => {
            console.load_list().await;
            None
        }
        Command::Title(title) => {
            console.set_title(title).await;
            None
        }
        Command::Author(author) => {
            console.set_author(author).await;
            None
        }
        Command::Available(available) => {
            console.set_available(available).await;
            None
        }
        Command::Cancel => {
            console.cancel_editing().await;
            None
        }
        Command::Edit(id) => {
            if let Err(e) = console.start_editing_id(&id).await {
                out.write_all(format!("{}\n", e).as_bytes()).await?;
            }
            None
        }
        Command::Submit => Some(console.submit().await),
        Command::Delete(id) => Some(console.delete_book(&id).await),
    };

    match settled {
        Some(Ok(settled)) => {
            if let Some(note) = describe(&settled) {
                out.write_all(format!("{}\n", note).as_bytes()).await?;
            }
        }
        Some(Err(e)) => out.write_all(format!("error: {}\n", e).as_bytes()).await?,
        None => {}
    }

    out.write_all(format!("\n{}\n\n> ", console.view().await).as_bytes())
        .await?;
    out.flush().await?;
    Ok(true)
}

/// Read commands line by line until `quit` or end of input.
pub async fn run<R, W>(console: &LibraryConsole, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("{}\n\n> ", console.view().await).as_bytes())
        .await?;
    out.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let keep_going = match line.parse::<Command>() {
            Ok(command) => execute(console, command, out).await?,
            Err(e) => {
                out.write_all(format!("{}\n{}\n\n> ", e, HELP).as_bytes())
                    .await?;
                out.flush().await?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
        assert_eq!(
            "title  Dune Messiah ".parse::<Command>().unwrap(),
            Command::Title("Dune Messiah".to_string())
        );
        assert_eq!(
            "author".parse::<Command>().unwrap(),
            Command::Author(String::new())
        );
        assert_eq!(
            "edit 7".parse::<Command>().unwrap(),
            Command::Edit("7".to_string())
        );
        assert_eq!(
            "rm 42".parse::<Command>().unwrap(),
            Command::Delete("42".to_string())
        );
        assert_eq!(
            "available no".parse::<Command>().unwrap(),
            Command::Available(false)
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!("delete".parse::<Command>().is_err());
        assert!("available maybe".parse::<Command>().is_err());
        let err = "shelve 1".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "unknown command 'shelve'");
    }

    #[test]
    fn skipped_update_is_described() {
        assert!(describe(&Settled::Skipped).unwrap().contains("nothing to update"));
    }
}
