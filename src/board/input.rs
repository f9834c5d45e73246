use std::str::FromStr;

pub const HELP: &str = "\
commands:
  name <text>      set the draft name
  content <text>   set the draft content
  edit <n>         copy message n into the draft
  delete <n>       delete message n
  submit           create the draft, or update it when editing
  clear            discard the draft
  refresh          reload the list
  help             show this text
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Content(String),
    /// 1-based position in the rendered list.
    Edit(usize),
    Delete(usize),
    Submit,
    Clear,
    Refresh,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "name" => Ok(Command::Name(rest.to_owned())),
            "content" => Ok(Command::Content(rest.to_owned())),
            "edit" => parse_position(verb, rest).map(Command::Edit),
            "delete" => parse_position(verb, rest).map(Command::Delete),
            "submit" if rest.is_empty() => Ok(Command::Submit),
            "clear" if rest.is_empty() => Ok(Command::Clear),
            "refresh" if rest.is_empty() => Ok(Command::Refresh),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("Type `help` for a list of commands".to_owned()),
            _ => Err(format!("Unknown command `{line}`")),
        }
    }
}

fn parse_position(verb: &str, arg: &str) -> Result<usize, String> {
    match usize::from_str(arg) {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(format!("`{verb}` needs a message number, e.g. `{verb} 1`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn text_commands_keep_inner_spaces() {
        assert_eq!(
            "name  Ada Lovelace ".parse(),
            Ok(Command::Name("Ada Lovelace".to_owned()))
        );
        assert_eq!(
            "content hello   world".parse(),
            Ok(Command::Content("hello   world".to_owned()))
        );
        assert_eq!("content".parse(), Ok(Command::Content(String::new())));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!("edit 2".parse(), Ok(Command::Edit(2)));
        assert_eq!("DELETE 1".parse(), Ok(Command::Delete(1)));
        assert_matches!("edit 0".parse::<Command>(), Err(e) if e.contains("edit 1"));
        assert_matches!("delete x".parse::<Command>(), Err(_));
        assert_matches!("delete".parse::<Command>(), Err(_));
    }

    #[test]
    fn bare_commands_reject_arguments() {
        assert_eq!("submit".parse(), Ok(Command::Submit));
        assert_matches!("submit now".parse::<Command>(), Err(e) if e.contains("Unknown"));
        assert_eq!("exit".parse(), Ok(Command::Quit));
        assert_matches!("".parse::<Command>(), Err(e) if e.contains("help"));
    }
}
