//! Line commands understood by the terminal front end.

use domains::CardId;
use services::{ModalKind, PointerTarget};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Feed,
    Open(ModalKind),
    View(CardId),
    Key(String),
    Close,
    Click(PointerTarget),
    Like(CardId),
    Delete(CardId),
    Profile { name: String, bio: String },
    Avatar(String),
    Add { caption: String, url: String },
    Login { email: String, password: String },
    Register { email: String, password: String },
    Go(String),
    State,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
feed                       list the feed
open profile|avatar|add    open an editor dialog
view <card-id>             open the photo viewer
key <name>                 press a key (esc, enter, ...)
close                      press the dialog close button
click overlay|content      press inside an open dialog
like <card-id>             like or unlike a card
delete <card-id>           delete your own card
profile <name> | <about>   save the profile editor
avatar <url>               save the avatar editor
add <caption> | <url>      save the add-photo dialog
login <email> <password>   sign in
register <email> <password>
go <path>                  navigate (/, /sign-in, /sign-up)
state                      dump the view state as JSON
quit";

/// Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "feed" | "ls" => Command::Feed,
        "open" => Command::Open(match rest {
            "profile" => ModalKind::ProfileEditor,
            "avatar" => ModalKind::AvatarEditor,
            "add" => ModalKind::AddPhoto,
            _ => return Err(ParseError::Usage("open profile|avatar|add")),
        }),
        "view" => Command::View(card_id(rest, "view <card-id>")?),
        "key" => Command::Key(word(rest, "key <name>")?.to_string()),
        "esc" => Command::Key("Escape".into()),
        "close" => Command::Close,
        "click" => Command::Click(match rest {
            "overlay" => PointerTarget::Overlay,
            "content" => PointerTarget::Content,
            _ => return Err(ParseError::Usage("click overlay|content")),
        }),
        "like" => Command::Like(card_id(rest, "like <card-id>")?),
        "delete" | "rm" => Command::Delete(card_id(rest, "delete <card-id>")?),
        "profile" => {
            let (name, bio) = pair(rest, "profile <name> | <about>")?;
            Command::Profile { name, bio }
        }
        "avatar" => Command::Avatar(word(rest, "avatar <url>")?.to_string()),
        "add" => {
            let (caption, url) = pair(rest, "add <caption> | <url>")?;
            Command::Add { caption, url }
        }
        "login" => {
            let (email, password) = credentials(rest, "login <email> <password>")?;
            Command::Login { email, password }
        }
        "register" => {
            let (email, password) = credentials(rest, "register <email> <password>")?;
            Command::Register { email, password }
        }
        "go" => Command::Go(word(rest, "go <path>")?.to_string()),
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn word<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, ParseError> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [single] => Ok(*single),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn card_id(rest: &str, usage: &'static str) -> Result<CardId, ParseError> {
    word(rest, usage).map(CardId::new)
}

/// `left | right`, both sides non-empty. Only the first `|` splits.
fn pair(rest: &str, usage: &'static str) -> Result<(String, String), ParseError> {
    match rest.split_once('|') {
        Some((left, right)) if !left.trim().is_empty() && !right.trim().is_empty() => {
            Ok((left.trim().to_string(), right.trim().to_string()))
        }
        _ => Err(ParseError::Usage(usage)),
    }
}

fn credentials(rest: &str, usage: &'static str) -> Result<(String, String), ParseError> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [email, password] => Ok((email.to_string(), password.to_string())),
        _ => Err(ParseError::Usage(usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn dialogs_and_keys() {
        assert_eq!(
            parse("open avatar"),
            Ok(Some(Command::Open(ModalKind::AvatarEditor)))
        );
        assert_eq!(parse("esc"), Ok(Some(Command::Key("Escape".into()))));
        assert_eq!(parse("key Enter"), Ok(Some(Command::Key("Enter".into()))));
        assert_eq!(
            parse("click content"),
            Ok(Some(Command::Click(PointerTarget::Content)))
        );
        assert!(matches!(parse("open viewer"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn forms_split_on_the_first_bar() {
        assert_eq!(
            parse("profile Jacques Cousteau | Sailor | explorer"),
            Ok(Some(Command::Profile {
                name: "Jacques Cousteau".into(),
                bio: "Sailor | explorer".into(),
            }))
        );
        assert_eq!(
            parse("add Lake Baikal | https://img.example/baikal.jpg"),
            Ok(Some(Command::Add {
                caption: "Lake Baikal".into(),
                url: "https://img.example/baikal.jpg".into(),
            }))
        );
        assert!(matches!(parse("add only-a-caption"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("profile | bio"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn card_commands_take_exactly_one_id() {
        assert_eq!(
            parse("like c1"),
            Ok(Some(Command::Like(CardId::new("c1"))))
        );
        assert_eq!(
            parse("rm c2"),
            Ok(Some(Command::Delete(CardId::new("c2"))))
        );
        assert!(matches!(parse("view"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("view a b"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn credentials_need_two_words() {
        assert_eq!(
            parse("login me@example.com hunter22"),
            Ok(Some(Command::Login {
                email: "me@example.com".into(),
                password: "hunter22".into(),
            }))
        );
        assert!(matches!(parse("register me@example.com"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn unknown_verbs_are_reported() {
        assert_eq!(
            parse("dance now"),
            Err(ParseError::Unknown("dance".into()))
        );
    }
}
