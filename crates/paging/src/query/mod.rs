use crate::{
    error::PagingError,
    query::{
        parser::{QueryParser, Rule},
        stage::AnalyticStage,
    },
};
use pest::{Parser, iterators::Pair};

pub mod parser;
pub mod stage;

/// A piece of a segment, either plain text or a quoted string (quotes included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Quoted(String),
}

impl Fragment {
    pub fn as_str(&self) -> &str {
        match self {
            Fragment::Text(s) | Fragment::Quoted(s) => s.as_str(),
        }
    }
}

/// Text between two pipe separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub fragments: Vec<Fragment>,
}

impl Segment {
    pub fn raw(&self) -> String {
        self.fragments.iter().map(Fragment::as_str).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.fragments
            .iter()
            .all(|f| f.as_str().trim().is_empty())
    }
}

/// A query split into its search expression and the analytic stages after it.
#[derive(Debug, Clone)]
pub struct QueryPipeline {
    pub search: Segment,
    pub stages: Vec<AnalyticStage>,
}

impl QueryPipeline {
    pub fn is_search_only(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn first_stage(&self) -> Option<&AnalyticStage> {
        self.stages.first()
    }
}

/// Splits `search | stage | ...` on unquoted pipes.
pub fn split_pipeline(input: &str) -> Result<QueryPipeline, PagingError> {
    let mut pairs = QueryParser::parse(Rule::query, input)
        .map_err(|err| PagingError::QuerySyntax(err.to_string()))?;

    let query = pairs
        .next()
        .ok_or_else(|| PagingError::QuerySyntax("empty parse tree".to_string()))?;

    let mut segments = query
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::segment)
        .map(segment_from_pair);

    let search = segments.next().unwrap_or_default();
    let stages = segments.map(AnalyticStage::from_segment).collect();

    Ok(QueryPipeline { search, stages })
}

fn segment_from_pair(pair: Pair<'_, Rule>) -> Segment {
    let fragments = pair
        .into_inner()
        .map(|part| match part.as_rule() {
            Rule::quoted => Fragment::Quoted(part.as_str().to_string()),
            // bare text and stray quotes
            _ => Fragment::Text(part.as_str().to_string()),
        })
        .collect();

    Segment { fragments }
}
