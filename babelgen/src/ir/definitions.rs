//! Declarations of an IDL document.
//!
//! The document is built once (usually deserialized from JSON produced by an
//! IDL parser) and is only ever read by the generators.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Literal, TypeRef};

/// A parsed IDL file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdlDocument {
    /// Name of the schema file the document was parsed from.
    pub filename: String,

    /// Comments at the top of the file.
    #[serde(default)]
    pub comments: Comment,

    /// Top-level declarations in source order.
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl IdlDocument {
    /// Create an empty document for the given schema file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            comments: Comment::default(),
            declarations: Vec::new(),
        }
    }

    /// Parse a document from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add a declaration.
    pub fn with_declaration(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    /// Iterate over every construct in declaration order.
    pub fn constructs(&self) -> impl Iterator<Item = Construct<'_>> {
        self.declarations.iter().map(Construct::from)
    }

    /// Find a construct by name.
    pub fn construct(&self, name: &str) -> Option<Construct<'_>> {
        self.constructs().find(|c| c.name() == name)
    }

    /// Iterate over the services of the document.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Service(s) => Some(s),
            _ => None,
        })
    }

    /// Iterate over the models of the document.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Model(m) => Some(m),
            _ => None,
        })
    }

    /// Iterate over the enums of the document.
    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Enum(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate over the constant blocks of the document.
    pub fn consts(&self) -> impl Iterator<Item = &Const> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Const(c) => Some(c),
            _ => None,
        })
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Service(Service),
    Enum(Enum),
    Model(Model),
    Const(Const),
}

impl From<Service> for Declaration {
    fn from(value: Service) -> Self {
        Declaration::Service(value)
    }
}

impl From<Enum> for Declaration {
    fn from(value: Enum) -> Self {
        Declaration::Enum(value)
    }
}

impl From<Model> for Declaration {
    fn from(value: Model) -> Self {
        Declaration::Model(value)
    }
}

impl From<Const> for Declaration {
    fn from(value: Const) -> Self {
        Declaration::Const(value)
    }
}

/// The kinds of construct that render to a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    Service,
    Enum,
    Model,
    Const,
}

impl ConstructKind {
    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructKind::Service => "service",
            ConstructKind::Enum => "enum",
            ConstructKind::Model => "model",
            ConstructKind::Const => "const",
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of one construct of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Construct<'a> {
    Service(&'a Service),
    Enum(&'a Enum),
    Model(&'a Model),
    Const(&'a Const),
}

impl<'a> Construct<'a> {
    /// The kind of this construct.
    pub fn kind(&self) -> ConstructKind {
        match self {
            Construct::Service(_) => ConstructKind::Service,
            Construct::Enum(_) => ConstructKind::Enum,
            Construct::Model(_) => ConstructKind::Model,
            Construct::Const(_) => ConstructKind::Const,
        }
    }

    /// The declared name.
    pub fn name(&self) -> &'a str {
        match self {
            Construct::Service(s) => &s.name,
            Construct::Enum(e) => &e.name,
            Construct::Model(m) => &m.name,
            Construct::Const(c) => &c.name,
        }
    }
}

impl<'a> From<&'a Declaration> for Construct<'a> {
    fn from(value: &'a Declaration) -> Self {
        match value {
            Declaration::Service(s) => Construct::Service(s),
            Declaration::Enum(e) => Construct::Enum(e),
            Declaration::Model(m) => Construct::Model(m),
            Declaration::Const(c) => Construct::Const(c),
        }
    }
}

/// Ordered plain-text comment lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment {
    pub lines: Vec<String>,
}

impl Comment {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Element an attribute may be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeTarget {
    Model,
    Field,
    Service,
    Method,
    Enum,
    Parameter,
}

/// A parameter of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeParam {
    /// `name = value`
    Keyed { name: String, value: Literal },
    /// `value`
    Positional(Literal),
}

/// An annotation carried through to the generated code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,

    #[serde(default)]
    pub params: Vec<AttributeParam>,

    /// Tool or language the attribute is meant for (e.g. `java`).
    #[serde(default)]
    pub scope: String,

    /// Elements the attribute applies to. Empty means any.
    #[serde(default)]
    pub targets: Vec<AttributeTarget>,
}

impl Attribute {
    /// Create an attribute with no parameters.
    pub fn new(name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            scope: scope.into(),
            targets: Vec::new(),
        }
    }

    /// Add a positional parameter.
    pub fn with_positional(mut self, value: Literal) -> Self {
        self.params.push(AttributeParam::Positional(value));
        self
    }

    /// Add a keyed parameter.
    pub fn with_keyed(mut self, name: impl Into<String>, value: Literal) -> Self {
        self.params.push(AttributeParam::Keyed {
            name: name.into(),
            value,
        });
        self
    }

    /// Restrict the attribute to a target.
    pub fn with_target(mut self, target: AttributeTarget) -> Self {
        self.targets.push(target);
        self
    }
}

/// A model field or method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Literal>,

    #[serde(default)]
    pub comments: Comment,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// Method parameters share the field shape.
pub type Parameter = Field;

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            initializer: None,
            comments: Comment::default(),
            attributes: Vec::new(),
        }
    }

    pub fn with_initializer(mut self, value: Literal) -> Self {
        self.initializer = Some(value);
        self
    }

    pub fn with_comments(mut self, comments: Comment) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A service operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,

    #[serde(default)]
    pub returns: TypeRef,

    #[serde(default)]
    pub params: Vec<Parameter>,

    #[serde(default)]
    pub comments: Comment,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Method {
    pub fn new(name: impl Into<String>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            returns,
            params: Vec::new(),
            comments: Comment::default(),
            attributes: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_comments(mut self, comments: Comment) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// An RPC service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,

    #[serde(default)]
    pub methods: Vec<Method>,

    #[serde(default)]
    pub comments: Comment,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            comments: Comment::default(),
            attributes: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_comments(mut self, comments: Comment) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,

    /// Parent model, resolved by name at render time.
    #[serde(default, rename = "extends", skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default)]
    pub comments: Comment,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            is_abstract: false,
            fields: Vec::new(),
            comments: Comment::default(),
            attributes: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_comments(mut self, comments: Comment) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// An enumeration with integer backing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,

    #[serde(default)]
    pub values: Vec<EnumValue>,

    #[serde(default)]
    pub comments: Comment,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            comments: Comment::default(),
            attributes: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value,
            comments: Comment::default(),
        });
        self
    }

    pub fn with_comments(mut self, comments: Comment) -> Self {
        self.comments = comments;
        self
    }

    /// Reverse lookup from backing value to constant.
    ///
    /// Values that no constant carries yield `None`.
    pub fn find_by_value(&self, value: i32) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.value == value)
    }

    /// Look a constant up by name.
    pub fn find_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// One constant of an enum.
///
/// Backing values are 32-bit because both targets emit them as `int`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i32,

    #[serde(default)]
    pub comments: Comment,
}

/// A block of named constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub name: String,

    #[serde(default)]
    pub values: Vec<ConstValue>,

    #[serde(default)]
    pub comments: Comment,
}

impl Const {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            comments: Comment::default(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: Literal) -> Self {
        self.values.push(ConstValue {
            name: name.into(),
            value,
            comments: Comment::default(),
        });
        self
    }

    pub fn with_comments(mut self, comments: Comment) -> Self {
        self.comments = comments;
        self
    }
}

/// One named constant of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstValue {
    pub name: String,
    pub value: Literal,

    #[serde(default)]
    pub comments: Comment,
}
