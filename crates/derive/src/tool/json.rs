use strum::Display;
use syn::{GenericArgument, PathArguments, Type};

#[derive(Display, Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum JsonType {
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "integer")]
    Integer,
    #[strum(serialize = "number")]
    Number,
    #[strum(serialize = "boolean")]
    Boolean,
    #[strum(serialize = "object")]
    Object,
    #[strum(serialize = "array")]
    Array,
}

/// How a Rust field type maps onto the schema.
pub(crate) struct FieldType {
    pub(crate) json_type: JsonType,
    pub(crate) items: Option<JsonType>,
    pub(crate) optional: bool,
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    }
}

fn first_generic(segment: &syn::PathSegment) -> Option<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        }),
        _ => None,
    }
}

fn scalar(ident: &str) -> JsonType {
    match ident {
        "String" | "str" | "char" => JsonType::String,
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => JsonType::Integer,
        "f32" | "f64" => JsonType::Number,
        "bool" => JsonType::Boolean,
        "HashMap" | "BTreeMap" | "Value" | "Map" => JsonType::Object,
        "Vec" | "HashSet" | "BTreeSet" => JsonType::Array,
        _ => JsonType::String,
    }
}

impl FieldType {
    pub(crate) fn from_type(ty: &Type) -> Self {
        let Some(segment) = last_segment(ty) else {
            return Self {
                json_type: JsonType::String,
                items: None,
                optional: false,
            };
        };
        let ident = segment.ident.to_string();

        if ident == "Option" {
            let inner = first_generic(segment)
                .map(FieldType::from_type)
                .unwrap_or(FieldType {
                    json_type: JsonType::String,
                    items: None,
                    optional: false,
                });
            return Self {
                optional: true,
                ..inner
            };
        }

        let json_type = scalar(&ident);
        let items = if json_type == JsonType::Array {
            first_generic(segment).map(|inner| FieldType::from_type(inner).json_type)
        } else {
            None
        };

        Self {
            json_type,
            items,
            optional: false,
        }
    }
}
