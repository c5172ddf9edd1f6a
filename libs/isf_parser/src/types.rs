use serde_json::{Map, Value};

use crate::{
    IsfParserError,
    Result,
};

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum TypeKind {
    Struct,
    Union,
    Class,
    /// Any other value, or no `kind` at all
    Other,
}

impl TypeKind {
    fn from_value(v: Option<&Value>) -> Self {
        match v.and_then(Value::as_str) {
            Some("struct") => Self::Struct,
            Some("union") => Self::Union,
            Some("class") => Self::Class,
            _ => Self::Other,
        }
    }
}

/// View of one `user_types` entry. Nothing is checked until it is read.
#[derive(Copy, Clone, Debug)]
pub struct UserType<'a> {
    pub kind: TypeKind,
    pub size: Option<u64>,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> UserType<'a> {
    pub fn from_value(v: &'a Value) -> Self {
        Self {
            kind: TypeKind::from_value(v.get("kind")),
            size: v.get("size").and_then(Value::as_u64),
            fields: v.get("fields").and_then(Value::as_object),
        }
    }

    pub fn is_struct(&self) -> bool {
        self.kind == TypeKind::Struct
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'a str> {
        self.fields
            .into_iter()
            .flat_map(|f| f.keys().map(|k| k.as_str()))
    }

    /// Offset of field `name`; `Ok(None)` if the type has no such field.
    pub fn field_offset(&self, name: &str) -> Result<Option<u64>> {
        let field = match self.fields.and_then(|f| f.get(name)) {
            Some(field) => field,
            None => return Ok(None),
        };
        let invalid = |reason| IsfParserError::InvalidField {
            field: name.to_owned(),
            reason,
        };
        match field.get("offset") {
            Some(off) => off.as_u64().map(Some).ok_or_else(|| invalid("offset is not a non-negative integer")),
            None => Err(invalid("no offset")),
        }
    }
}
