#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Show,
    Var,
    Ask,
    If,
    Else,
    Repeat,
    To,
    Loop,
    Id(String),
    Str(String),
    Int(i64),
    Float(f64),
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equals,
    NotEquals,
    LBrace,
    RBrace,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Token { kind, line, column }
    }
}

impl TokenKind {
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "show" => Some(TokenKind::Show),
            "var" => Some(TokenKind::Var),
            "ask" => Some(TokenKind::Ask),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "repeat" => Some(TokenKind::Repeat),
            "to" => Some(TokenKind::To),
            "loop" => Some(TokenKind::Loop),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TokenKind::Show => "'show'".to_string(),
            TokenKind::Var => "'var'".to_string(),
            TokenKind::Ask => "'ask'".to_string(),
            TokenKind::If => "'if'".to_string(),
            TokenKind::Else => "'else'".to_string(),
            TokenKind::Repeat => "'repeat'".to_string(),
            TokenKind::To => "'to'".to_string(),
            TokenKind::Loop => "'loop'".to_string(),
            TokenKind::Id(name) => format!("the name '{}'", name),
            TokenKind::Str(text) => format!("the text \"{}\"", text),
            TokenKind::Int(value) => format!("the number {}", value),
            TokenKind::Float(value) => format!("the number {:?}", value),
            TokenKind::Assign => "'='".to_string(),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Multiply => "'*'".to_string(),
            TokenKind::Divide => "'/'".to_string(),
            TokenKind::Less => "'<'".to_string(),
            TokenKind::Greater => "'>'".to_string(),
            TokenKind::LessEqual => "'<='".to_string(),
            TokenKind::GreaterEqual => "'>='".to_string(),
            TokenKind::Equals => "'=='".to_string(),
            TokenKind::NotEquals => "'!='".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::Eof => "the end of the program".to_string(),
        }
    }
}
