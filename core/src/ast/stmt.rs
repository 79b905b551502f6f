//! file: core/src/ast/stmt.rs
//! description: parsing helpers for the program root and statements.
//!
//! Each helper consumes one `pest` pair produced by `RulesParser` and returns
//! the matching `AstNode`, carrying the `Location`/`Span` of the pair so later
//! stages can point diagnostics back at the source.
//!
use crate::{
    ast::{AstNode, AstNodeKind, MinicErrorExt, Rule, rules},
    script,
};

pub(crate) fn unexpected_rule(
    rule: Rule,
    issuer: &str,
    location: Option<crate::location::Location>,
    span: Option<crate::location::Span>,
) -> Box<dyn MinicErrorExt> {
    crate::ast::err::SyntaxError::with(
        crate::Level::Error,
        format!("Unexpected rule {:?}.", rule),
        issuer.to_string(),
        location,
        span,
    )
    .into()
}

/// Parse the `program` rule into the root `Block`.
///
/// The root is always a `Block` holding the top-level statements in source
/// order; an empty program yields an empty block.
pub(crate) fn parse_program_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let mut statements = Vec::new();
    for p in inner_pairs {
        match p.as_rule() {
            Rule::statement => statements.push(parse_statement_rule(p, script)?),
            Rule::EOI => {}
            other => return Err(unexpected_rule(other, "minic.stmt.parse_program_rule", location, span)),
        }
    }
    Ok(AstNode::new(AstNodeKind::Block { statements }, location, span))
}

pub(crate) fn parse_statement_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let next_rule = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    match next_rule.as_rule() {
        Rule::function_def => parse_function_def_rule(next_rule, script),
        Rule::if_stmt => parse_if_rule(next_rule, script),
        Rule::while_stmt => parse_while_rule(next_rule, script),
        Rule::for_stmt => parse_for_rule(next_rule, script),
        Rule::block => parse_block_rule(next_rule, script),
        Rule::print_stmt => {
            let (mut inner, location, span) = rules::get_data_from_rule(&next_rule, script);
            let name = rules::fetch_next_significant_pair(&mut inner, &location, &span)?;
            Ok(AstNode::new(
                AstNodeKind::Print { name: name.as_str().to_string() },
                location,
                span,
            ))
        }
        Rule::break_stmt => {
            let (_, location, span) = rules::get_data_from_rule(&next_rule, script);
            Ok(AstNode::new(AstNodeKind::Break, location, span))
        }
        Rule::return_stmt => {
            let (mut inner, location, span) = rules::get_data_from_rule(&next_rule, script);
            let expr_pair = rules::fetch_next_significant_pair(&mut inner, &location, &span)?;
            let value = super::expr::parse_expression_rule(expr_pair, script)?;
            Ok(AstNode::new(
                AstNodeKind::Return { value: Box::new(value) },
                location,
                span,
            ))
        }
        Rule::call_stmt => {
            let (mut inner, location, span) = rules::get_data_from_rule(&next_rule, script);
            let call = rules::fetch_next_pair(&mut inner, &location, &span)?;
            parse_call_rule(call, script)
        }
        Rule::assign_stmt => {
            let (mut inner, location, span) = rules::get_data_from_rule(&next_rule, script);
            let assignment = rules::fetch_next_pair(&mut inner, &location, &span)?;
            parse_assignment_rule(assignment, script)
        }
        other => Err(unexpected_rule(other, "minic.stmt.parse_statement_rule", location, span)),
    }
}

pub(crate) fn parse_block_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let statements = inner_pairs
        .map(|p| parse_statement_rule(p, script))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AstNode::new(AstNodeKind::Block { statements }, location, span))
}

pub(crate) fn parse_assignment_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let target = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let value_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let value = super::expr::parse_expression_rule(value_pair, script)?;
    Ok(AstNode::new(
        AstNodeKind::Assign {
            target: target.as_str().to_string(),
            value: Box::new(value),
        },
        location,
        span,
    ))
}

fn parse_call_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let name = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let mut args = Vec::new();
    if let Some(arg_list) = inner_pairs.next() {
        for expr_pair in arg_list.into_inner() {
            args.push(super::expr::parse_expression_rule(expr_pair, script)?);
        }
    }
    Ok(AstNode::new(
        AstNodeKind::FunctionCall {
            name: name.as_str().to_string(),
            args,
        },
        location,
        span,
    ))
}

fn parse_function_def_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let name = rules::fetch_next_significant_pair(&mut inner_pairs, &location, &span)?;

    // Optional parameter list precedes the body block.
    let mut params = Vec::new();
    let mut next = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    if next.as_rule() == Rule::param_list {
        params = next.into_inner().map(|p| p.as_str().to_string()).collect();
        next = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    }
    let body = parse_block_rule(next, script)?;

    Ok(AstNode::new(
        AstNodeKind::FunctionDef {
            name: name.as_str().to_string(),
            params,
            body: Box::new(body),
        },
        location,
        span,
    ))
}

fn parse_if_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let cond_pair = rules::fetch_next_significant_pair(&mut inner_pairs, &location, &span)?;
    let condition = super::expr::parse_expression_rule(cond_pair, script)?;
    let then_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let then_branch = parse_statement_rule(then_pair, script)?;

    let else_branch = match inner_pairs.peek() {
        Some(_) => {
            let else_pair = rules::fetch_next_significant_pair(&mut inner_pairs, &location, &span)?;
            Some(Box::new(parse_statement_rule(else_pair, script)?))
        }
        None => None,
    };

    Ok(AstNode::new(
        AstNodeKind::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
        },
        location,
        span,
    ))
}

fn parse_while_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let cond_pair = rules::fetch_next_significant_pair(&mut inner_pairs, &location, &span)?;
    let condition = super::expr::parse_expression_rule(cond_pair, script)?;
    let body_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let body = parse_statement_rule(body_pair, script)?;
    Ok(AstNode::new(
        AstNodeKind::While {
            condition: Box::new(condition),
            body: Box::new(body),
        },
        location,
        span,
    ))
}

fn parse_for_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let init_pair = rules::fetch_next_significant_pair(&mut inner_pairs, &location, &span)?;
    let init = parse_assignment_rule(init_pair, script)?;
    let cond_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let condition = super::expr::parse_expression_rule(cond_pair, script)?;
    let inc_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let increment = parse_assignment_rule(inc_pair, script)?;
    let body_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let body = parse_statement_rule(body_pair, script)?;
    Ok(AstNode::new(
        AstNodeKind::For {
            init: Box::new(init),
            condition: Box::new(condition),
            increment: Box::new(increment),
            body: Box::new(body),
        },
        location,
        span,
    ))
}
