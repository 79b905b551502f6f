use crate::{
    ast::{AstNode, AstNodeKind, BinaryOperator, MinicErrorExt, Rule, rules},
    script,
};

/// Parse any expression-level rule (`expression` down to `primary`).
pub(crate) fn parse_expression_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    match pair.as_rule() {
        Rule::expression => {
            let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
            let inner = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
            parse_expression_rule(inner, script)
        }
        Rule::equality | Rule::relational | Rule::additive | Rule::multiplicative => {
            parse_binary_chain_rule(pair, script)
        }
        Rule::primary => parse_primary_rule(pair, script),
        other => {
            let (_, location, span) = rules::get_data_from_rule(&pair, script);
            Err(super::stmt::unexpected_rule(other, "minic.expr.parse_expression_rule", location, span))
        }
    }
}

/// Fold `operand (op operand)*` left-associatively into nested `BinaryOp`s.
fn parse_binary_chain_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);

    let left_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let mut node = parse_expression_rule(left_pair, script)?;

    while let Some(op_pair) = inner_pairs.next() {
        let op = match BinaryOperator::from_symbol(op_pair.as_str()) {
            Some(op) => op,
            None => {
                return Err(crate::ast::err::SyntaxError::with(
                    crate::Level::Error,
                    format!("Invalid binary operator '{}'.", op_pair.as_str()),
                    "minic.expr.parse_binary_chain_rule".into(),
                    location.clone(),
                    span.clone(),
                )
                .into());
            }
        };
        let right_pair = match inner_pairs.next() {
            Some(rp) => rp,
            None => {
                return Err(crate::ast::err::SyntaxError::with(
                    crate::Level::Error,
                    format!("Missing right-hand operand for '{}'.", op),
                    "minic.expr.parse_binary_chain_rule".into(),
                    location.clone(),
                    span.clone(),
                )
                .into());
            }
        };
        let right = parse_expression_rule(right_pair, script)?;

        node = AstNode::new(
            AstNodeKind::BinaryOp {
                left: Box::new(node),
                op,
                right: Box::new(right),
            },
            rules::get_location_from_pair(&op_pair, script),
            rules::get_span_from_pair(&op_pair, script),
        );
    }

    Ok(node)
}

fn parse_primary_rule(
    pair: pest::iterators::Pair<Rule>,
    script: &script::Script,
) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let inner = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    match inner.as_rule() {
        Rule::number => {
            let text = inner.as_str();
            let value = text.parse::<i64>().map_err(|e| {
                Box::<dyn MinicErrorExt>::from(crate::ast::err::SyntaxError::with(
                    crate::Level::Error,
                    format!("Invalid integer literal '{}': {}", text, e),
                    "minic.expr.parse_primary_rule".into(),
                    location.clone(),
                    span.clone(),
                ))
            })?;
            Ok(AstNode::new(AstNodeKind::Number { value }, location, span))
        }
        Rule::identifier => Ok(AstNode::new(
            AstNodeKind::Identifier { name: inner.as_str().to_string() },
            location,
            span,
        )),
        Rule::expression => parse_expression_rule(inner, script),
        other => Err(super::stmt::unexpected_rule(other, "minic.expr.parse_primary_rule", location, span)),
    }
}
