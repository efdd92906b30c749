//! Token classification and operator binding strength.

/// Operators of the expression language, strongest binding first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Operator {
    OrLater,
    With,
    And,
    Or,
}

impl Operator {
    pub(super) fn precedence(self) -> u8 {
        match self {
            Self::OrLater => 4,
            Self::With => 3,
            Self::And => 2,
            Self::Or => 1,
        }
    }

    pub(super) fn keyword(self) -> &'static str {
        match self {
            Self::OrLater => "+",
            Self::With => "WITH",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TokenKind<'a> {
    LParen,
    RParen,
    Operator(Operator),
    Identifier(&'a str),
}

/// Classify a token. Keywords are accepted in upper or lower case only, so
/// `And` stays an identifier.
pub(super) fn classify(token: &str) -> TokenKind<'_> {
    match token {
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        "+" => TokenKind::Operator(Operator::OrLater),
        "WITH" | "with" => TokenKind::Operator(Operator::With),
        "AND" | "and" => TokenKind::Operator(Operator::And),
        "OR" | "or" => TokenKind::Operator(Operator::Or),
        other => TokenKind::Identifier(other),
    }
}
