//! Component classification model
//!
//!     A component identifies what a token represents, without carrying any
//!     parsed data itself. Each family is a closed variant set with a stable
//!     string identifier per case; families that need open extension (custom
//!     keywords, markdown code-block ids) carry an explicit `Custom` arm.
//!
//!     The canonical description of a component is its dotted path: the
//!     family name alone when the case has no sub-identifier, otherwise
//!     `family.subid` (for example `string.literal` or `word.declaration.var`).
//!     The description is the sole equality and debugging key across the
//!     system: two components with equal descriptions are interchangeable.

use serde::Serialize;
use std::fmt;

/// A classification tag for one emitted token.
#[derive(Clone, Debug, Serialize)]
pub enum Component {
    Comment(CommentComponent),
    Documentation(DocumentationComponent),
    Symbol(SymbolComponent),
    Bracket(BracketComponent),
    Word(WordComponent),
    Identifier(IdentifierComponent),
    String(StringComponent),
    Integer(IntegerComponent),
    Float(FloatComponent),
    Type(TypeComponent),
    Preprocessor(PreprocessorComponent),
    Markdown(MarkdownComponent),
    Trivial,
    Delimiter,
    Unknown,
}

impl Component {
    /// The canonical dotted-path description, e.g. `string.literal`.
    pub fn description(&self) -> String {
        match self {
            Component::Comment(c) => format!("comment.{}", c.id()),
            Component::Documentation(c) => format!("documentation.{}", c.id()),
            Component::Symbol(c) => format!("symbol.{}", c.id()),
            Component::Bracket(c) => format!("bracket.{}", c.id()),
            Component::Word(c) => format!("word.{}", c.id()),
            Component::Identifier(c) => format!("identifier.{}", c.id()),
            Component::String(c) => format!("string.{}", c.id()),
            Component::Integer(c) => format!("integer.{}", c.id()),
            Component::Float(c) => format!("float.{}", c.id()),
            Component::Type(c) => format!("type.{}", c.id()),
            Component::Preprocessor(c) => format!("preprocessor.{}", c.id()),
            Component::Markdown(c) => format!("markdown.{}", c.id()),
            Component::Trivial => "trivial".to_string(),
            Component::Delimiter => "delimiter".to_string(),
            Component::Unknown => "unknown".to_string(),
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.description() == other.description()
    }
}

impl Eq for Component {}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum CommentComponent {
    Open,
    Line,
    Mark,
    Todo,
    Fixme,
    Block,
    Close,
}

impl CommentComponent {
    pub fn id(&self) -> &'static str {
        match self {
            CommentComponent::Open => "open",
            CommentComponent::Line => "line",
            CommentComponent::Mark => "mark",
            CommentComponent::Todo => "todo",
            CommentComponent::Fixme => "fixme",
            CommentComponent::Block => "block",
            CommentComponent::Close => "close",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum DocumentationComponent {
    Open,
    Line,
    Block,
    Close,
}

impl DocumentationComponent {
    pub fn id(&self) -> &'static str {
        match self {
            DocumentationComponent::Open => "open",
            DocumentationComponent::Line => "line",
            DocumentationComponent::Block => "block",
            DocumentationComponent::Close => "close",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum SymbolComponent {
    Assignment,
}

impl SymbolComponent {
    pub fn id(&self) -> &'static str {
        "assignment"
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum BracketComponent {
    Start,
    End,
}

impl BracketComponent {
    pub fn id(&self) -> &'static str {
        match self {
            BracketComponent::Start => "start",
            BracketComponent::End => "end",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum WordComponent {
    Declaration(IdentifierComponent),
    Control,
    Unknown,
}

impl WordComponent {
    pub fn id(&self) -> String {
        match self {
            WordComponent::Declaration(inner) => format!("declaration.{}", inner.id()),
            WordComponent::Control => "control".to_string(),
            WordComponent::Unknown => "unknown".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum IdentifierComponent {
    Class,
    Struct,
    Protocol,
    /// For `typealias` and generic parameters.
    Generic,
    Property,
    Function,
    Key,
    Path,
    Imperative,
    Unknown,
    Custom(String),
}

impl IdentifierComponent {
    pub fn id(&self) -> String {
        match self {
            IdentifierComponent::Class => "class".to_string(),
            IdentifierComponent::Struct => "struct".to_string(),
            IdentifierComponent::Protocol => "protocol".to_string(),
            IdentifierComponent::Generic => "generic".to_string(),
            IdentifierComponent::Property => "property".to_string(),
            IdentifierComponent::Function => "function".to_string(),
            IdentifierComponent::Key => "key".to_string(),
            IdentifierComponent::Path => "path".to_string(),
            IdentifierComponent::Imperative => "imperative".to_string(),
            IdentifierComponent::Unknown => "unknown".to_string(),
            IdentifierComponent::Custom(id) => id.clone(),
        }
    }

    /// Maps a declaration keyword to the identifier kind it introduces.
    /// Keywords outside the fixed set fall back to the open `Custom` arm.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "class" => IdentifierComponent::Class,
            "struct" => IdentifierComponent::Struct,
            "protocol" => IdentifierComponent::Protocol,
            "typealias" | "generic" => IdentifierComponent::Generic,
            "let" | "var" | "property" => IdentifierComponent::Property,
            "func" | "function" => IdentifierComponent::Function,
            other => IdentifierComponent::Custom(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum StringComponent {
    Open,
    Literal,
    Interpolated,
    Escaped,
    Static,
    Close,
}

impl StringComponent {
    pub fn id(&self) -> &'static str {
        match self {
            StringComponent::Open => "open",
            StringComponent::Literal => "literal",
            StringComponent::Interpolated => "interpolated",
            StringComponent::Escaped => "escaped",
            StringComponent::Static => "static",
            StringComponent::Close => "close",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum IntegerComponent {
    Literal,
}

impl IntegerComponent {
    pub fn id(&self) -> &'static str {
        "literal"
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum FloatComponent {
    Literal,
}

impl FloatComponent {
    pub fn id(&self) -> &'static str {
        "literal"
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum TypeComponent {
    Class,
    Struct,
    Protocol,
    Generic,
    Property,
    Function,
    Extension,
    Imperative,
    Custom(String),
}

impl TypeComponent {
    pub fn id(&self) -> String {
        match self {
            TypeComponent::Class => "class".to_string(),
            TypeComponent::Struct => "struct".to_string(),
            TypeComponent::Protocol => "protocol".to_string(),
            TypeComponent::Generic => "generic".to_string(),
            TypeComponent::Property => "property".to_string(),
            TypeComponent::Function => "function".to_string(),
            TypeComponent::Extension => "extension".to_string(),
            TypeComponent::Imperative => "imperative".to_string(),
            TypeComponent::Custom(id) => id.clone(),
        }
    }

    /// Maps a declaration keyword to the type kind it declares.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "class" => TypeComponent::Class,
            "struct" => TypeComponent::Struct,
            "protocol" => TypeComponent::Protocol,
            "typealias" | "generic" => TypeComponent::Generic,
            "let" | "var" | "property" => TypeComponent::Property,
            "func" | "function" => TypeComponent::Function,
            "extension" => TypeComponent::Extension,
            other => TypeComponent::Custom(other.to_string()),
        }
    }

    /// The identifier kind sitting on the left-hand side of an explicit
    /// type annotation for this type kind.
    pub fn identifier(&self) -> IdentifierComponent {
        match self {
            TypeComponent::Class => IdentifierComponent::Class,
            TypeComponent::Struct => IdentifierComponent::Struct,
            TypeComponent::Protocol => IdentifierComponent::Protocol,
            TypeComponent::Generic => IdentifierComponent::Generic,
            TypeComponent::Property => IdentifierComponent::Property,
            TypeComponent::Function => IdentifierComponent::Function,
            TypeComponent::Extension | TypeComponent::Imperative => IdentifierComponent::Unknown,
            TypeComponent::Custom(id) => IdentifierComponent::Custom(id.clone()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum PreprocessorComponent {
    Hashbang,
    Processor,
    Argument,
}

impl PreprocessorComponent {
    pub fn id(&self) -> &'static str {
        match self {
            PreprocessorComponent::Hashbang => "hashbang",
            PreprocessorComponent::Processor => "processor",
            PreprocessorComponent::Argument => "argument",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum MarkdownComponent {
    /// A header of the given depth (1 through 6).
    Header(usize),
    /// A fenced code block with an optional language id.
    CodeBlock(Option<String>),
    Body,
    Link {
        label: Option<String>,
        url: Option<String>,
    },
    Email(String),
}

impl MarkdownComponent {
    pub fn id(&self) -> String {
        match self {
            MarkdownComponent::Header(depth) => format!("h{depth}"),
            MarkdownComponent::CodeBlock(Some(id)) => format!("codeblock.{id}"),
            MarkdownComponent::CodeBlock(None) => "codeblock".to_string(),
            MarkdownComponent::Body => "body".to_string(),
            MarkdownComponent::Link { .. } => "link".to_string(),
            MarkdownComponent::Email(_) => "email".to_string(),
        }
    }
}
