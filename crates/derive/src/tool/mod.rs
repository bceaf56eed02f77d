mod attr;
pub(crate) mod field;
pub(crate) mod input;
pub(crate) mod json;
use attr::ToolAttributes;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

#[derive(Debug, Default)]
pub(crate) struct ToolParser {}

impl ToolParser {
    pub fn parse(&self, attr: TokenStream, item: TokenStream) -> TokenStream {
        let tool_attrs = parse_macro_input!(attr as ToolAttributes);
        let input_struct = parse_macro_input!(item as syn::ItemStruct);

        let struct_name = &input_struct.ident;
        let (impl_generics, ty_generics, where_clause) = input_struct.generics.split_for_impl();
        let tool_name_literal = tool_attrs.name;
        let tool_description = tool_attrs.description;
        let args_type = tool_attrs.input;

        let expanded = quote! {
            #input_struct

            impl #impl_generics ::island_llm::tool::ToolT for #struct_name #ty_generics #where_clause {
                fn name(&self) -> &str {
                    #tool_name_literal
                }
                fn description(&self) -> &str {
                    #tool_description
                }
                fn run(
                    &self,
                    args: ::serde_json::Value,
                ) -> ::std::result::Result<::serde_json::Value, ::island_llm::tool::ToolCallError> {
                    ::island_llm::tool::ToolRuntime::execute(self, args)
                }
                fn args_schema(&self) -> ::serde_json::Value {
                    let params_str = <#args_type as ::island_llm::tool::ToolInputT>::io_schema();
                    ::serde_json::from_str(params_str)
                        .unwrap_or_else(|_| ::serde_json::json!({"type": "object", "properties": {}}))
                }
            }

            impl #impl_generics ::std::fmt::Debug for #struct_name #ty_generics #where_clause {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "{}", #tool_name_literal)
                }
            }
        };

        expanded.into()
    }
}
