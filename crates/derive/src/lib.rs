extern crate proc_macro;
use proc_macro::TokenStream;
use tool::{input::InputParser, ToolParser};
mod tool;

/// Derives `ToolInputT`, producing the JSON schema the model sees for a tool's
/// arguments. Fields take `#[input(description = "...", choice = [..])]`.
#[proc_macro_derive(ToolInput, attributes(input))]
pub fn input(input: TokenStream) -> TokenStream {
    InputParser::parse(input)
}

/// Implements `ToolT` for a struct that already implements `ToolRuntime`.
///
/// `#[tool(name = "island_balance", description = ISLAND_BALANCE_PROMPT, input = IslandBalanceInput)]`
#[proc_macro_attribute]
pub fn tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    ToolParser::default().parse(attr, item)
}
