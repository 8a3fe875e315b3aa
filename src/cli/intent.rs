use crate::viewmodel::Direction;

/// One user action typed at the interactive prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    SetType(String),
    SetHeight(u32, u32),
    SetWeight(u32, u32),
    TurnPage(Direction),
    ToggleTheme,
    Reset,
    Types,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  type <name|all>     filter by primary type
  height <MIN-MAX>    height range, 0-20
  weight <MIN-MAX>    weight range, 0-1000
  next | n | +        next page
  prev | p | -        previous page
  page <+1|-1>        step one page either way
  types               list type names
  theme               toggle light/dark
  reset               clear all filters
  help                show this help
  quit | q            exit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_intent(line: &str) -> Result<Option<Intent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let intent = match command.to_lowercase().as_str() {
        "type" => {
            if rest.is_empty() {
                return Err("usage: type <name|all>".to_string());
            }
            Intent::SetType(rest.to_string())
        }
        "height" => {
            let (min, max) =
                crate::utils::parse_range(rest).map_err(|e| format!("invalid height: {e}"))?;
            Intent::SetHeight(min, max)
        }
        "weight" => {
            let (min, max) =
                crate::utils::parse_range(rest).map_err(|e| format!("invalid weight: {e}"))?;
            Intent::SetWeight(min, max)
        }
        "next" | "n" | "+" => Intent::TurnPage(Direction::Forward),
        "prev" | "previous" | "p" | "-" => Intent::TurnPage(Direction::Backward),
        "page" => {
            let step: i64 = rest
                .parse()
                .map_err(|_| format!("invalid page step '{rest}', expected +1 or -1"))?;
            let direction = Direction::from_step(step)
                .ok_or_else(|| format!("page step must be +1 or -1, got {step}"))?;
            Intent::TurnPage(direction)
        }
        "theme" => Intent::ToggleTheme,
        "reset" => Intent::Reset,
        "types" => Intent::Types,
        "help" | "?" => Intent::Help,
        "quit" | "q" | "exit" => Intent::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(intent))
}
