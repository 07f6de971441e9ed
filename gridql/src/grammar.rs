use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "gridql.pest"]
pub struct GridqlParser;
