use super::field::FieldSchemaAttr;
use super::json::FieldType;
use proc_macro::TokenStream;
use quote::quote;
use serde_json::{json, Map, Value};
use syn::{parse_macro_input, DeriveInput, LitStr};

pub(crate) struct InputParser {}

impl InputParser {
    pub fn parse(input: TokenStream) -> TokenStream {
        let input = parse_macro_input!(input as DeriveInput);
        match Self::schema(&input) {
            Ok(schema) => {
                let struct_ident = &input.ident;
                let schema_literal = LitStr::new(&schema, struct_ident.span());
                let expanded = quote! {
                    impl ::island_llm::tool::ToolInputT for #struct_ident {
                        fn io_schema() -> &'static str {
                            #schema_literal
                        }
                    }
                };
                TokenStream::from(expanded)
            }
            Err(err) => err.to_compile_error().into(),
        }
    }

    fn schema(input: &DeriveInput) -> syn::Result<String> {
        let fields = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
                syn::Fields::Unit => vec![],
                syn::Fields::Unnamed(_) => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "ToolInput needs named fields",
                    ))
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "ToolInput can only be derived for structs",
                ))
            }
        };

        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in fields {
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let field_name = ident.to_string();
            let field_type = FieldType::from_type(&field.ty);

            let mut meta = FieldSchemaAttr::default();
            for attr in &field.attrs {
                if attr.path().is_ident("input") {
                    meta = attr.parse_args::<FieldSchemaAttr>()?;
                }
            }

            let mut property = Map::new();
            property.insert(
                "type".to_string(),
                Value::String(field_type.json_type.to_string()),
            );
            if let Some(items) = field_type.items {
                property.insert("items".to_string(), json!({ "type": items.to_string() }));
            }
            if let Some(desc) = meta.description {
                property.insert("description".to_string(), Value::String(desc.value()));
            }
            if let Some(choices) = meta.choice {
                let values = choices
                    .iter()
                    .map(|c| c.to_json())
                    .collect::<syn::Result<Vec<_>>>()?;
                property.insert("enum".to_string(), Value::Array(values));
            }

            if !field_type.optional {
                required.push(Value::String(field_name.clone()));
            }
            properties.insert(field_name, Value::Object(property));
        }

        let schema = json!({
            "type": "object",
            "properties": properties,
            "required": required,
        });
        Ok(schema.to_string())
    }
}
