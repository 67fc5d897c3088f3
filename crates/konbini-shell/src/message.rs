//! Messages delivered to the shell by the host event source.

use konbini_router::Params;

/// Already-decoded input for the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Navigate { to: String, params: Params },
    Back,
    Forward,
    /// Text typed into the focused field.
    Input(String),
    Submit,
    Cancel,
    /// Pick the n-th item of a list (zero-based).
    Select(usize),
    Quit,
}

/// Why a line could not be read as a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty message")]
    Empty,
    #[error("unknown message {0:?}")]
    UnknownVerb(String),
    #[error("go expects a route")]
    MissingRoute,
    #[error("expected key=value, got {0:?}")]
    BadParam(String),
    #[error("select expects an index, got {0:?}")]
    BadIndex(String),
}

impl Message {
    /// Parse the line form used by the `konbini-shell` binary.
    ///
    /// ```text
    /// go <route> [key=value ...]
    /// back | forward | submit | cancel | quit
    /// type <text>
    /// select <n>
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        match verb {
            "go" => parse_navigate(rest),
            "back" | "b" => Ok(Self::Back),
            "forward" | "f" => Ok(Self::Forward),
            "submit" => Ok(Self::Submit),
            "cancel" | "esc" => Ok(Self::Cancel),
            "quit" | "q" => Ok(Self::Quit),
            "type" => Ok(Self::Input(rest.to_owned())),
            "select" => rest
                .parse::<usize>()
                .map(Self::Select)
                .map_err(|_| ParseError::BadIndex(rest.to_owned())),
            "" => Err(ParseError::Empty),
            other => Err(ParseError::UnknownVerb(other.to_owned())),
        }
    }
}

fn parse_navigate(rest: &str) -> Result<Message, ParseError> {
    let mut words = rest.split_whitespace();
    let Some(to) = words.next() else {
        return Err(ParseError::MissingRoute);
    };
    let mut params = Params::new();
    for word in words {
        let Some((key, value)) = word.split_once('=') else {
            return Err(ParseError::BadParam(word.to_owned()));
        };
        params.insert(key, value);
    }
    Ok(Message::Navigate {
        to: to.to_owned(),
        params,
    })
}
