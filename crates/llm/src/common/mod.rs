pub(crate) mod openai_types;
