use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A custom attribute argument value.
///
/// Mirrors the shapes a metadata reader can decode from an attribute blob:
/// primitives, strings, arrays and nested named-argument objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<AttributeValue>),
    Object(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Short description of the value's shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::List(_) => "list",
            AttributeValue::Object(_) => "object",
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        AttributeValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_str("null"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Float(x) => write!(f, "{x}"),
            AttributeValue::String(s) => write!(f, "{s:?}"),
            AttributeValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            AttributeValue::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A raw custom attribute as read from the module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttribute {
    /// Attribute type name, optionally namespace qualified (e.g. `RouteAttribute`)
    pub name: String,
    /// Constructor arguments in declaration order
    #[serde(default)]
    pub positional: Vec<AttributeValue>,
    /// Named property/field arguments
    #[serde(default)]
    pub named: BTreeMap<String, AttributeValue>,
}

impl RawAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
            named: BTreeMap::new(),
        }
    }

    /// Append a constructor argument
    #[must_use]
    pub fn arg(mut self, value: impl Into<AttributeValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a named argument
    #[must_use]
    pub fn named_arg(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Attribute name without namespace qualification or `Attribute` suffix
    pub fn short_name(&self) -> &str {
        short_attribute_name(&self.name)
    }

    /// Look up an argument by named property first, then by constructor
    /// position. Only one of the two is consulted: a named argument that is
    /// present wins even when it is null.
    pub fn argument(&self, name: &str, position: Option<usize>) -> Option<&AttributeValue> {
        if let Some(value) = self.named.get(name) {
            return Some(value);
        }
        position.and_then(|i| self.positional.get(i))
    }
}

/// Strip any namespace qualification and the conventional `Attribute` suffix.
pub fn short_attribute_name(name: &str) -> &str {
    let unqualified = name.rsplit('.').next().unwrap_or(name);
    match unqualified.strip_suffix("Attribute") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => unqualified,
    }
}

/// A reference to a type by name, possibly defined outside the loaded modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn full_name(&self) -> String {
        full_name(&self.namespace, &self.name)
    }
}

pub(crate) fn full_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

fn default_true() -> bool {
    true
}

/// Method flags relevant to action discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFlags {
    #[serde(default)]
    pub is_constructor: bool,
    /// Property getter or setter
    #[serde(default)]
    pub is_accessor: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

impl Default for MethodFlags {
    fn default() -> Self {
        Self {
            is_constructor: false,
            is_accessor: false,
            is_static: false,
            is_abstract: false,
            is_public: true,
        }
    }
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    #[serde(flatten)]
    pub flags: MethodFlags,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

impl MethodDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: MethodFlags::default(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: RawAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A type declared in a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub base: Option<TypeRef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

impl TypeDef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            is_abstract: false,
            base: None,
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        self.base = Some(TypeRef::new(namespace, name));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: RawAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn full_name(&self) -> String {
        full_name(&self.namespace, &self.name)
    }
}

/// Metadata of a single compiled module, as produced by an external reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub name: String,
    /// Target framework moniker, e.g. `.NETCoreApp,Version=v8.0`
    #[serde(default)]
    pub target_framework: Option<String>,
    /// Names of referenced assemblies
    #[serde(default)]
    pub assembly_refs: Vec<String>,
    /// Module and assembly level attributes
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

impl ModuleMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, ty: TypeDef) -> Self {
        self.types.push(ty);
        self
    }

    #[must_use]
    pub fn with_target_framework(mut self, moniker: impl Into<String>) -> Self {
        self.target_framework = Some(moniker.into());
        self
    }

    #[must_use]
    pub fn with_assembly_ref(mut self, name: impl Into<String>) -> Self {
        self.assembly_refs.push(name.into());
        self
    }
}
