use neuro_lex::TokenKind;
use neuro_util::Span;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        span: Span,
    },

    #[error("'otherwise' with no matching 'feel' at {span}")]
    StrayOtherwise { span: Span },

    #[error("integer literal {text:?} at {span} does not fit in 64 bits")]
    NumberOverflow { text: String, span: Span },

    #[error(transparent)]
    Lex(#[from] neuro_lex::LexError),
}

impl ParseError {
    /// The span to render a source snippet against, when this error has one.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::StrayOtherwise { span }
            | ParseError::NumberOverflow { span, .. } => *span,
            ParseError::Lex(e) => e.span(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
