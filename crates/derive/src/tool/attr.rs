use syn::{
    parse::{Parse, ParseStream},
    Expr, Ident, LitStr, Result, Token, Type,
};

pub(crate) struct ToolAttributes {
    pub(crate) name: LitStr,
    /// Any `&'static str` expression, so long prompts can live in constants.
    pub(crate) description: Expr,
    pub(crate) input: Type,
}

pub(crate) enum ToolAttributeKeys {
    Name,
    Description,
    Input,
    Unknown(String),
}

impl From<Ident> for ToolAttributeKeys {
    fn from(value: Ident) -> Self {
        match value.to_string().as_str() {
            "name" => Self::Name,
            "description" => Self::Description,
            "input" => Self::Input,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Parse for ToolAttributes {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name = None;
        let mut description = None;
        let mut args = None;
        while !input.is_empty() {
            let key: Ident = input.parse()?;
            let key_span = key.span();
            input.parse::<Token![=]>()?;

            match ToolAttributeKeys::from(key) {
                ToolAttributeKeys::Name => {
                    name = Some(input.parse::<LitStr>()?);
                }
                ToolAttributeKeys::Description => {
                    description = Some(input.parse::<Expr>()?);
                }
                ToolAttributeKeys::Input => {
                    args = Some(input.parse::<Type>()?);
                }
                ToolAttributeKeys::Unknown(other) => {
                    return Err(syn::Error::new(
                        key_span,
                        format!("Unexpected attribute key: {other}"),
                    ))
                }
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        let missing = |key: &str| syn::Error::new(input.span(), format!("Missing attribute: {key}"));
        Ok(ToolAttributes {
            name: name.ok_or_else(|| missing("name"))?,
            description: description.ok_or_else(|| missing("description"))?,
            input: args.ok_or_else(|| missing("input"))?,
        })
    }
}
