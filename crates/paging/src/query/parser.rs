use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar/query.pest"]
pub struct QueryParser;
