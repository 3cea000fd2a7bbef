//! Schema definitions for request/response types.
//!
//! This module describes the structure of request and response bodies in
//! a language-neutral way. The generator turns these into Rust structs and
//! type aliases.

/// Width of an integer schema (`format: int32` / `int64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegerWidth {
    /// `int32`
    I32,
    /// `int64` or unspecified.
    #[default]
    I64,
}

/// Width of a number schema (`format: float` / `double`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberWidth {
    /// `float`
    F32,
    /// `double` or unspecified.
    #[default]
    F64,
}

/// A reference to a type, as used by fields, parameters and bodies.
///
/// ## Examples
///
/// ```
/// use splitapi_define::TypeRef;
///
/// let users = TypeRef::array(TypeRef::named("UserSchema"));
/// assert_eq!(users.referenced_names(), vec!["UserSchema"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// `type: string` (any format).
    String,
    /// `type: integer`.
    Integer(IntegerWidth),
    /// `type: number`.
    Number(NumberWidth),
    /// `type: boolean`.
    Boolean,
    /// `type: array`.
    Array(Box<TypeRef>),
    /// `type: object` without declared properties.
    ///
    /// `Some` when `additionalProperties` carries a schema.
    Map(Option<Box<TypeRef>>),
    /// `$ref` to a named schema.
    Named(String),
    /// Anything else (`oneOf`, `anyOf`, untyped schemas).
    Any,
    /// No value (`void`).
    Unit,
}

impl TypeRef {
    /// Shorthand for a 64-bit integer.
    pub fn integer() -> Self {
        Self::Integer(IntegerWidth::I64)
    }

    /// Shorthand for a 64-bit float.
    pub fn number() -> Self {
        Self::Number(NumberWidth::F64)
    }

    /// Creates an array of `item`.
    pub fn array(item: TypeRef) -> Self {
        Self::Array(Box::new(item))
    }

    /// Creates a reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Names of all types this reference points at, depth first.
    pub fn referenced_names(&self) -> Vec<&str> {
        match self {
            Self::Named(name) => vec![name.as_str()],
            Self::Array(item) => item.referenced_names(),
            Self::Map(Some(value)) => value.referenced_names(),
            _ => vec![],
        }
    }
}

/// A named type from `components.schemas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Schema name (becomes the Rust type name).
    pub name: String,
    /// Schema description.
    pub description: Option<String>,
    /// Shape of the type.
    pub kind: TypeDefKind,
}

/// The shape of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    /// Object with declared properties, in document order.
    Object(Vec<Field>),
    /// Any other schema; generated as a type alias.
    Alias(TypeRef),
}

/// A property of an object schema.
///
/// `required` and `nullable` are independent: a field may be absent, present
/// with `null`, or present with a value, and the generated type keeps all
/// three apart when both flags allow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Wire name of the property.
    pub name: String,
    /// Property type.
    pub ty: TypeRef,
    /// Listed in the schema's `required` array.
    pub required: bool,
    /// `nullable: true` on the property schema.
    pub nullable: bool,
    /// Property description.
    pub description: Option<String>,
}
