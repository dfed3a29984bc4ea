use std::fmt;
use std::str::FromStr;

/// A decoded sign: one of the 26 letters or a control token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Letter(char),
    Delete,
    Nothing,
    Space,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Letter(letter) => write!(f, "{}", letter),
            Label::Delete => write!(f, "del"),
            Label::Nothing => write!(f, "nothing"),
            Label::Space => write!(f, "space"),
        }
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "del" => Ok(Label::Delete),
            "nothing" => Ok(Label::Nothing),
            "space" => Ok(Label::Space),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) if letter.is_ascii_uppercase() => {
                        Ok(Label::Letter(letter))
                    }
                    _ => Err(format!("unknown label {:?}", s)),
                }
            }
        }
    }
}
