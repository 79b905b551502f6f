use pest_derive::Parser;

use crate::location;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct RulesParser;

pub(crate) fn fetch_next_pair<'a>(
    pairs: &mut pest::iterators::Pairs<'a, Rule>,
    location: &Option<location::Location>,
    span: &Option<location::Span>,
) -> Result<pest::iterators::Pair<'a, Rule>, Box<dyn crate::MinicErrorExt>> {
    match pairs.next() {
        Some(pair) => Ok(pair),
        None => Err(crate::ast::err::SyntaxError::with(
            crate::Level::Error,
            "Expected more inner pairs but found none.".into(),
            "minic.ast.rules.fetch_next_pair".into(),
            location.clone(),
            span.clone(),
        )
        .into()),
    }
}

/// Like [`fetch_next_pair`] but steps over keyword tokens (`kw_*`), which the
/// grammar keeps as atomic pairs so that `iffy` still lexes as a name.
pub(crate) fn fetch_next_significant_pair<'a>(
    pairs: &mut pest::iterators::Pairs<'a, Rule>,
    location: &Option<location::Location>,
    span: &Option<location::Span>,
) -> Result<pest::iterators::Pair<'a, Rule>, Box<dyn crate::MinicErrorExt>> {
    loop {
        let pair = fetch_next_pair(pairs, location, span)?;
        if !is_keyword(pair.as_rule()) {
            return Ok(pair);
        }
    }
}

pub(crate) fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_func
            | Rule::kw_if
            | Rule::kw_else
            | Rule::kw_while
            | Rule::kw_for
            | Rule::kw_print
            | Rule::kw_break
            | Rule::kw_return
    )
}

pub(crate) fn get_data_from_rule<'a>(
    rule: &pest::iterators::Pair<'a, Rule>,
    script: &crate::script::Script,
) -> (
    pest::iterators::Pairs<'a, Rule>,
    Option<crate::location::Location>,
    Option<crate::location::Span>,
) {
    let inner_rules = rule.clone().into_inner();
    let span = get_span_from_pair(rule, script);
    let location = get_location_from_pair(rule, script);
    (inner_rules, location, span)
}

pub fn get_location_from_pair(
    rule: &pest::iterators::Pair<Rule>,
    script: &crate::script::Script,
) -> Option<crate::location::Location> {
    Some(location::Location::from_pest(rule.as_span().start_pos(), &script.name))
}

pub fn get_span_from_pair(
    rule: &pest::iterators::Pair<Rule>,
    script: &crate::script::Script,
) -> Option<crate::location::Span> {
    Some(location::Span::from_pest(rule.as_span(), &script.name))
}
