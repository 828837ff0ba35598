use qaktus_core::{parse_weight, Msg};

pub const HELP: &str = "\
Commands:
  add                  add another destination
  set <n> <url>        set the URL of destination n
  rm <n>               remove destination n
  weights on|off       use custom weights
  weight <n> <value>   set the weight of destination n (1 or more)
  generate             generate the short link
  copy                 copy the short link
  reset                start a new link
  email <address>      fill in the waitlist email
  join                 join the waitlist
  help                 show this help
  quit                 leave";

/// Everything the main loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Msg(Msg),
    /// A line of feedback for the user that does not change state.
    Notice(String),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "add" => AppEvent::Msg(Msg::DestinationAdded),
        "set" => match split_position(rest) {
            Ok((position, text)) => AppEvent::Msg(Msg::UrlChanged {
                position,
                text: text.to_string(),
            }),
            Err(notice) => notice,
        },
        "rm" | "remove" => match split_position(rest) {
            Ok((position, _)) => AppEvent::Msg(Msg::DestinationRemoved { position }),
            Err(notice) => notice,
        },
        "weights" => match rest {
            "on" => AppEvent::Msg(Msg::CustomWeightsToggled(true)),
            "off" => AppEvent::Msg(Msg::CustomWeightsToggled(false)),
            _ => notice("usage: weights on|off"),
        },
        "weight" => match split_position(rest) {
            Ok((position, text)) => {
                let value = parse_weight(text);
                // NaN fails this comparison too.
                if value >= 1.0 {
                    AppEvent::Msg(Msg::WeightChanged { position, value })
                } else {
                    notice("weights must be numbers of at least 1")
                }
            }
            Err(notice) => notice,
        },
        "generate" => AppEvent::Msg(Msg::GenerateClicked),
        "copy" => AppEvent::Msg(Msg::CopyClicked),
        "reset" => AppEvent::Msg(Msg::ResetClicked),
        "email" => AppEvent::Msg(Msg::WaitlistEmailChanged(rest.to_string())),
        "join" => AppEvent::Msg(Msg::WaitlistSubmitted),
        "help" | "?" => AppEvent::Help,
        "quit" | "exit" => AppEvent::Quit,
        other => notice(&format!("unknown command `{other}`; type `help`")),
    };
    Some(event)
}

/// Splits `<n> <rest>` where `n` is 1-based on screen and 0-based in the core.
fn split_position(input: &str) -> Result<(usize, &str), AppEvent> {
    let (number, rest) = match input.split_once(char::is_whitespace) {
        Some((number, rest)) => (number, rest.trim()),
        None => (input, ""),
    };
    match number.parse::<usize>() {
        Ok(n) if n >= 1 => Ok((n - 1, rest)),
        _ => Err(notice("expected a destination number starting at 1")),
    }
}

fn notice(text: &str) -> AppEvent {
    AppEvent::Notice(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_maps_to_zero_based_position() {
        assert_eq!(
            parse_command("set 2 https://b.com"),
            Some(AppEvent::Msg(Msg::UrlChanged {
                position: 1,
                text: "https://b.com".to_string(),
            }))
        );
    }

    #[test]
    fn set_without_url_clears_the_row() {
        assert_eq!(
            parse_command("set 1"),
            Some(AppEvent::Msg(Msg::UrlChanged {
                position: 0,
                text: String::new(),
            }))
        );
    }

    #[test]
    fn position_zero_is_rejected() {
        assert!(matches!(parse_command("rm 0"), Some(AppEvent::Notice(_))));
    }

    #[test]
    fn weights_below_one_are_rejected() {
        assert!(matches!(parse_command("weight 1 0"), Some(AppEvent::Notice(_))));
        assert!(matches!(parse_command("weight 1 abc"), Some(AppEvent::Notice(_))));
        assert_eq!(
            parse_command("weight 1 2.5"),
            Some(AppEvent::Msg(Msg::WeightChanged {
                position: 0,
                value: 2.5,
            }))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn email_keeps_raw_text() {
        assert_eq!(
            parse_command("email  a@b.com"),
            Some(AppEvent::Msg(Msg::WaitlistEmailChanged("a@b.com".to_string())))
        );
    }
}
