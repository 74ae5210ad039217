//! Parsed definition-document input.
//!
//! Text parsing is owned by the request layer; the schema compiler consumes
//! an already-parsed [`Document`]. Directive argument values arrive as the
//! exhaustive [`AstValue`] variant so that consumers pattern-match instead
//! of downcasting.

/// A parsed type-definition document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    #[must_use]
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }
}

/// A single top-level definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// `type Name { ... }`, producing a full collection.
    Object(TypeDefinition),
    /// `interface Name { ... }`, producing a schema-only (embedded)
    /// collection.
    Interface(TypeDefinition),
    /// Any definition kind this subsystem does not consume. Skipped.
    Other,
}

/// An object or interface definition body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// A field within a type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    /// `None` when the parser could not attach a type to the field.
    pub ty: Option<AstType>,
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: AstType) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Finds the first directive with the given name.
    #[must_use]
    pub fn find_directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum AstType {
    Named(String),
    List(Box<AstType>),
    NonNull(Box<AstType>),
}

impl AstType {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn list(of: AstType) -> Self {
        Self::List(Box::new(of))
    }

    #[must_use]
    pub fn non_null(of: AstType) -> Self {
        Self::NonNull(Box::new(of))
    }
}

/// A directive application.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl Directive {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: AstValue) -> Self {
        self.arguments.push(Argument {
            name: name.into(),
            value,
        });
        self
    }
}

/// A named directive argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: AstValue,
}

/// A literal value in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum AstValue {
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Enum(String),
    List(Vec<AstValue>),
    Object(Vec<(String, AstValue)>),
    Null,
}

impl AstValue {
    /// The string payload for string-valued literals.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The name of an enum literal.
    #[must_use]
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Converts the literal into a JSON value for storage in descriptors.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) | Self::Enum(s) => serde_json::Value::String(s.clone()),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(AstValue::to_json).collect())
            }
            Self::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Null => serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_json() {
        let value = AstValue::Object(vec![
            ("age".to_string(), AstValue::Int(40)),
            ("active".to_string(), AstValue::Boolean(true)),
            (
                "tags".to_string(),
                AstValue::List(vec![AstValue::String("a".to_string())]),
            ),
        ]);

        assert_eq!(
            value.to_json(),
            serde_json::json!({"age": 40, "active": true, "tags": ["a"]})
        );
    }

    #[test]
    fn test_builders() {
        let def = TypeDefinition::new("User")
            .directive(Directive::new("index").arg("unique", AstValue::Boolean(true)))
            .field(FieldDefinition::new("name", AstType::named("String")));

        assert_eq!(def.name, "User");
        assert_eq!(def.directives[0].arguments[0].name, "unique");
        assert_eq!(def.fields[0].ty, Some(AstType::named("String")));
    }
}
