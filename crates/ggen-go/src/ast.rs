use std::fmt;

/// JSON decoding package used by unmarshalling helpers.
pub const JSON_IMPORT: &str = "encoding/json";

/// A generated Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFile {
    /// Invocation embedded in the "Code generated" banner.
    pub command: String,
    pub package: String,
    /// Import paths, already deduplicated and ordered.
    pub imports: Vec<String>,
    pub sections: Vec<GoSection>,
}

/// A run of methods, optionally introduced by a `/* banner */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoSection {
    pub banner: Option<String>,
    pub methods: Vec<GoMethod>,
}

/// A pointer-receiver method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoMethod {
    pub doc: String,
    pub receiver: String,
    pub receiver_type: String,
    pub name: String,
    pub params: Vec<GoParam>,
    pub returns: String,
    /// Statements, one per line, relative to the function body indentation.
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoParam {
    pub name: String,
    pub ty: String,
}

impl GoParam {
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}

impl fmt::Display for GoParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}
