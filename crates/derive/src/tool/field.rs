use syn::{
    parse::{Parse, ParseBuffer, ParseStream},
    punctuated::Punctuated,
    Ident, Lit, LitStr, Result, Token,
};

pub(crate) enum Choice {
    String(LitStr),
}

impl Choice {
    pub(crate) fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Self::String(s) => Ok(serde_json::Value::String(s.value())),
        }
    }
}

impl Parse for Choice {
    fn parse(input: ParseStream) -> Result<Self> {
        match input.parse::<Lit>()? {
            Lit::Str(lit_str) => Ok(Choice::String(lit_str)),
            _ => Err(input.error("expected a string literal")),
        }
    }
}

#[derive(Default)]
pub(crate) struct FieldSchemaAttr {
    pub(crate) description: Option<LitStr>,
    pub(crate) choice: Option<Vec<Choice>>,
}

pub(crate) enum FieldAttributeKeys {
    Description,
    Choice,
    Unknown(String),
}

impl From<Ident> for FieldAttributeKeys {
    fn from(value: Ident) -> Self {
        match value.to_string().as_str() {
            "description" => Self::Description,
            "choice" => Self::Choice,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl FieldSchemaAttr {
    fn parse_choice(choice: &ParseBuffer) -> Result<Vec<Choice>> {
        let content;
        let _bracket_token = syn::bracketed!(content in choice);
        let choices: Punctuated<Choice, Token![,]> =
            content.parse_terminated(Choice::parse, Token![,])?;
        Ok(choices.into_iter().collect())
    }
}

impl Parse for FieldSchemaAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldSchemaAttr::default();
        while !input.is_empty() {
            let key: Ident = input.parse()?;
            let key_span = key.span();
            input.parse::<Token![=]>()?;
            match FieldAttributeKeys::from(key) {
                FieldAttributeKeys::Description => {
                    attr.description = Some(input.parse()?);
                }
                FieldAttributeKeys::Choice => {
                    let choices = Self::parse_choice(input)?;
                    if !choices.is_empty() {
                        attr.choice = Some(choices);
                    }
                }
                FieldAttributeKeys::Unknown(other) => {
                    return Err(syn::Error::new(
                        key_span,
                        format!("Unexpected field attribute key: {other}"),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(attr)
    }
}
