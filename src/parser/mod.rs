use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::errors::{Error, Result};

// This include forces recompiling this source file if the grammar file changes.
const _GRAMMAR: &str = include_str!("ltpl.pest");

#[derive(Parser)]
#[grammar = "parser/ltpl.pest"]
pub struct LtplParser;

/// The markers a template is made of
pub mod ast;


use self::ast::Marker;

/// The name inside a token or block tag
fn parse_name(pair: Pair<Rule>) -> String {
    // tags have a single inner pair, their `name`
    pair.into_inner().next().map(|p| p.as_str().to_string()).unwrap_or_default()
}

fn push_text(markers: &mut Vec<Marker>, text: &str) {
    if let Some(Marker::Text(previous)) = markers.last_mut() {
        previous.push_str(text);
        return;
    }
    markers.push(Marker::Text(text.to_string()));
}

/// Scans a template into its markers.
///
/// Every input is a valid template: anything that isn't a well-formed tag is
/// kept as text. Consecutive text is merged in a single `Marker::Text`.
pub fn parse(input: &str) -> Result<Vec<Marker>> {
    let mut pairs = match LtplParser::parse(Rule::template, input) {
        Ok(p) => p,
        Err(e) => {
            let fancy_e = e.renamed_rules(|rule| match *rule {
                Rule::EOI => "end of input".to_string(),
                Rule::name => "a name (anything but `}`)".to_string(),
                Rule::token => "a token (`{@name}`)".to_string(),
                Rule::block_start => "an each tag (`{@each:name}`)".to_string(),
                Rule::block_end => "an endeach tag (`{@endeach:name}`)".to_string(),
                Rule::text | Rule::stray => "some text".to_string(),
                Rule::template => "a template".to_string(),
                _ => format!("{:?}", rule),
            });
            return Err(Error::msg(fancy_e));
        }
    };

    let mut markers = vec![];

    // We must have at least a `template` pair if we got there
    for p in pairs.next().unwrap().into_inner() {
        match p.as_rule() {
            Rule::text | Rule::stray => push_text(&mut markers, p.as_str()),
            Rule::token => markers.push(Marker::Token(parse_name(p))),
            Rule::block_start => markers.push(Marker::BlockStart(parse_name(p))),
            Rule::block_end => markers.push(Marker::BlockEnd(parse_name(p))),
            Rule::EOI => (),
            _ => unreachable!("unknown tpl rule: {:?}", p.as_rule()),
        }
    }

    Ok(markers)
}
