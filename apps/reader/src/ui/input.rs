//! Line-oriented input. Single-letter keys drive the viewport and the feed;
//! anything else is a search term.

pub const HELP_TEXT: &str =
    "/<subreddit> or s <subreddit>: search | j/k: scroll | G: bottom | m: more | r: retry | q: quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Submit(String),
    ScrollDown,
    ScrollUp,
    Bottom,
    LoadMore,
    Retry,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> InputCommand {
    let trimmed = line.trim();
    match trimmed {
        "j" => InputCommand::ScrollDown,
        "k" => InputCommand::ScrollUp,
        "G" => InputCommand::Bottom,
        "m" => InputCommand::LoadMore,
        "r" => InputCommand::Retry,
        "q" | ":q" => InputCommand::Quit,
        "h" | "?" => InputCommand::Help,
        _ => {
            if let Some(term) = trimmed.strip_prefix('/') {
                InputCommand::Submit(term.to_string())
            } else if let Some(term) = trimmed.strip_prefix("s ") {
                InputCommand::Submit(term.to_string())
            } else {
                InputCommand::Submit(trimmed.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_keys_map_to_commands() {
        assert_eq!(parse_input("j"), InputCommand::ScrollDown);
        assert_eq!(parse_input(" k "), InputCommand::ScrollUp);
        assert_eq!(parse_input("G"), InputCommand::Bottom);
        assert_eq!(parse_input("m"), InputCommand::LoadMore);
        assert_eq!(parse_input("r"), InputCommand::Retry);
        assert_eq!(parse_input("q"), InputCommand::Quit);
        assert_eq!(parse_input("?"), InputCommand::Help);
    }

    #[test]
    fn search_forms() {
        assert_eq!(parse_input("/rust"), InputCommand::Submit("rust".into()));
        assert_eq!(
            parse_input("s learn programming"),
            InputCommand::Submit("learn programming".into())
        );
        assert_eq!(parse_input("golang"), InputCommand::Submit("golang".into()));
    }

    #[test]
    fn blank_line_is_a_blank_submit() {
        assert_eq!(parse_input("   "), InputCommand::Submit(String::new()));
    }
}
