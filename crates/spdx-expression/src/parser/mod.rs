//! Operator-precedence parser for license expressions.
//!
//! The parser runs a shunting-yard evaluation over the token stream with an
//! operand stack and an operator stack. Binding strength, strongest first:
//!
//! | operator | arity | result |
//! |----------|-------|--------|
//! | `+` | postfix | [`OrLaterOperator`] |
//! | `WITH` | binary | [`WithExceptionOperator`] |
//! | `AND` | n-ary | conjunctive [`crate::LicenseSet`] |
//! | `OR` | n-ary | disjunctive [`crate::LicenseSet`] |
//!
//! `WITH` is not deferred like the set operators. Its right-hand side is
//! always a single exception identifier, so it is applied as soon as it is
//! seen, after first reducing a pending `+` so that `X+ WITH Y` means
//! `(X+) WITH Y`.
//!
//! A `(` pushes a group marker onto the operator stack and the matching `)`
//! reduces back down to it, so nesting depth costs heap rather than call
//! stack. Alternating `AND`/`OR` groups deeper than [`MAX_NESTING_DEPTH`]
//! are rejected.
//! Plain identifiers are resolved through the [`LicenseRegistry`]; anything
//! not on the license list becomes an extracted license owned by the
//! [`ExtractedLicenseScope`].

mod operator;

#[cfg(test)]
mod tests;

use crate::errors::LicenseParseError;
use crate::license::{
    AnyLicenseInfo, ExceptionSubject, LicenseException, NOASSERTION_KEYWORD, NONE_KEYWORD,
    OrLaterOperator, SetKind, WithExceptionOperator, merge,
};
use crate::registry::{ExtractedLicenseScope, LicenseRegistry};
use crate::tokenizer::tokenize;

use operator::{Operator, TokenKind, classify};

/// Parse a license expression.
///
/// A whole expression of exactly `NONE` or `NOASSERTION` yields the matching
/// sentinel. Identifiers on the license list resolve through `registry`;
/// every other identifier becomes an extracted license in `document`.
///
/// # Errors
/// Returns [`LicenseParseError`] for structurally invalid expressions and
/// for faults reported by the registry or the document.
///
/// # Examples
/// ```
/// use spdx_expression::parse;
/// use spdx_expression::test_support::{MemoryDocument, MemoryRegistry};
///
/// let registry = MemoryRegistry::with_licenses(["MIT", "GPL-2.0"])
///     .with_exceptions(["Classpath-exception-2.0"]);
/// let document = MemoryDocument::default();
/// let expr = parse(
///     "MIT OR GPL-2.0+ WITH Classpath-exception-2.0",
///     &registry,
///     &document,
/// )?;
/// assert_eq!(expr.to_string(), "(MIT OR GPL-2.0+ WITH Classpath-exception-2.0)");
/// # Ok::<(), spdx_expression::LicenseParseError>(())
/// ```
pub fn parse<R, D>(
    expression: &str,
    registry: &R,
    document: &D,
) -> Result<AnyLicenseInfo, LicenseParseError>
where
    R: LicenseRegistry + ?Sized,
    D: ExtractedLicenseScope + ?Sized,
{
    let tokens = tokenize(expression);
    match tokens.as_slice() {
        [only] if *only == NONE_KEYWORD => Ok(AnyLicenseInfo::None),
        [only] if *only == NOASSERTION_KEYWORD => Ok(AnyLicenseInfo::NoAssertion),
        _ => ExpressionParser { registry, document }.parse_tokens(&tokens),
    }
}

/// Deepest expression tree [`parse`] will build.
///
/// Redundant parentheses and same-kind chains do not add depth; alternating
/// `AND`/`OR` groups do.
pub const MAX_NESTING_DEPTH: usize = 512;

struct ExpressionParser<'a, R: ?Sized, D: ?Sized> {
    registry: &'a R,
    document: &'a D,
}

/// Entry on the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator(Operator),
    /// An open `(` at token `position`; `base` is the operand stack height
    /// when it was opened.
    Group { position: usize, base: usize },
}

/// A reduced operand and the depth of its tree.
struct Operand {
    expr: AnyLicenseInfo,
    depth: usize,
}

impl Operand {
    fn leaf(expr: AnyLicenseInfo) -> Self {
        Self { expr, depth: 1 }
    }

    /// Depth this operand adds when it becomes a member of a `kind` set.
    fn depth_within(&self, kind: SetKind) -> usize {
        match &self.expr {
            AnyLicenseInfo::Set(set) if set.kind() == kind => self.depth.saturating_sub(1),
            _ => self.depth,
        }
    }
}

impl<R, D> ExpressionParser<'_, R, D>
where
    R: LicenseRegistry + ?Sized,
    D: ExtractedLicenseScope + ?Sized,
{
    fn parse_tokens(&self, tokens: &[&str]) -> Result<AnyLicenseInfo, LicenseParseError> {
        if tokens.is_empty() {
            return Err(LicenseParseError::Empty);
        }

        let unclosed = first_unclosed_paren(tokens);
        let mut operands: Vec<Operand> = Vec::new();
        let mut operators: Vec<Pending> = Vec::new();
        let mut open_groups = 0_usize;
        let mut after_operand = false;
        let mut index = 0;

        while let Some(&token) = tokens.get(index) {
            let position = index;
            match classify(token) {
                TokenKind::LParen => {
                    if unclosed == Some(position) {
                        return Err(LicenseParseError::UnmatchedOpen { position });
                    }
                    operators.push(Pending::Group {
                        position,
                        base: operands.len(),
                    });
                    open_groups += 1;
                    after_operand = false;
                    index += 1;
                }
                TokenKind::RParen => {
                    if open_groups == 0 {
                        return Err(LicenseParseError::UnmatchedClose { position });
                    }
                    if !after_operand {
                        return Err(match operators.last() {
                            Some(Pending::Operator(op)) => LicenseParseError::MissingOperand {
                                operator: op.keyword(),
                            },
                            _ => LicenseParseError::Empty,
                        });
                    }
                    let base = close_group(&mut operators, &mut operands)?;
                    let count = operands.len().saturating_sub(base);
                    if count > 1 {
                        return Err(LicenseParseError::ExtraOperands { count });
                    }
                    open_groups -= 1;
                    index += 1;
                }
                TokenKind::Operator(Operator::With) => {
                    if !after_operand {
                        return Err(LicenseParseError::InvalidWithOperand {
                            operand: "nothing".to_owned(),
                        });
                    }
                    if matches!(operators.last(), Some(Pending::Operator(Operator::OrLater))) {
                        operators.pop();
                        evaluate(Operator::OrLater, &mut operands)?;
                    }
                    let exception = match tokens.get(index + 1).copied().map(classify) {
                        Some(TokenKind::Identifier(id)) => self.resolve_exception(id)?,
                        _ => return Err(LicenseParseError::MissingException { position }),
                    };
                    let Some(operand) = operands.pop() else {
                        return Err(LicenseParseError::InvalidWithOperand {
                            operand: "nothing".to_owned(),
                        });
                    };
                    let subject = exception_subject(operand.expr)?;
                    operands.push(Operand {
                        expr: WithExceptionOperator::new(subject, exception).into(),
                        depth: operand.depth + 1,
                    });
                    index += 2;
                }
                TokenKind::Operator(op) => {
                    if !after_operand {
                        return Err(LicenseParseError::MissingOperand {
                            operator: op.keyword(),
                        });
                    }
                    while let Some(&Pending::Operator(top)) = operators.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        operators.pop();
                        evaluate(top, &mut operands)?;
                    }
                    operators.push(Pending::Operator(op));
                    // A postfix `+` leaves an operand in place.
                    after_operand = op == Operator::OrLater;
                    index += 1;
                }
                TokenKind::Identifier(id) => {
                    operands.push(Operand::leaf(self.resolve_license(id)?));
                    after_operand = true;
                    index += 1;
                }
            }
        }

        while let Some(pending) = operators.pop() {
            match pending {
                Pending::Operator(op) => evaluate(op, &mut operands)?,
                Pending::Group { position, .. } => {
                    return Err(LicenseParseError::UnmatchedOpen { position });
                }
            }
        }

        let result = operands.pop().ok_or(LicenseParseError::Empty)?;
        if operands.is_empty() {
            Ok(result.expr)
        } else {
            Err(LicenseParseError::ExtraOperands {
                count: operands.len() + 1,
            })
        }
    }

    fn resolve_license(&self, id: &str) -> Result<AnyLicenseInfo, LicenseParseError> {
        if let Some(keyword) = sentinel_keyword(id) {
            return Err(LicenseParseError::MisplacedSentinel { keyword });
        }
        if self.registry.is_listed_license_id(id) {
            return Ok(self.registry.resolve_listed_license(id)?.into());
        }
        Ok(self.document.get_or_create_extracted_license(id)?.into())
    }

    fn resolve_exception(&self, id: &str) -> Result<LicenseException, LicenseParseError> {
        if self.registry.is_listed_exception_id(id) {
            return Ok(self.registry.resolve_listed_exception(id)?);
        }
        log::debug!("exception `{id}` is not listed; keeping it as an unlisted exception");
        Ok(LicenseException::unlisted(id))
    }
}

/// Apply every operator above the innermost open group and drop its marker.
/// Returns the operand stack height recorded when the group was opened.
fn close_group(
    operators: &mut Vec<Pending>,
    operands: &mut Vec<Operand>,
) -> Result<usize, LicenseParseError> {
    loop {
        match operators.pop() {
            Some(Pending::Operator(op)) => evaluate(op, operands)?,
            Some(Pending::Group { base, .. }) => return Ok(base),
            None => return Err(LicenseParseError::Empty),
        }
    }
}

/// Reduce the operand stack with `op`.
fn evaluate(op: Operator, operands: &mut Vec<Operand>) -> Result<(), LicenseParseError> {
    let missing = || LicenseParseError::MissingOperand {
        operator: op.keyword(),
    };
    match op {
        Operator::OrLater => {
            let operand = operands.pop().ok_or_else(missing)?;
            let simple = operand
                .expr
                .into_simple()
                .map_err(|other| LicenseParseError::OrLaterOnNonSimple {
                    operand: other.to_string(),
                })?;
            operands.push(Operand {
                expr: OrLaterOperator::new(simple).into(),
                depth: operand.depth + 1,
            });
        }
        Operator::And | Operator::Or => {
            let right = operands.pop().ok_or_else(missing)?;
            let left = operands.pop().ok_or_else(missing)?;
            let kind = if op == Operator::And {
                SetKind::Conjunctive
            } else {
                SetKind::Disjunctive
            };
            let depth = 1 + left.depth_within(kind).max(right.depth_within(kind));
            if depth > MAX_NESTING_DEPTH {
                return Err(LicenseParseError::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                });
            }
            operands.push(Operand {
                expr: merge(kind, left.expr, right.expr),
                depth,
            });
        }
        // Applied eagerly by the parser loop.
        Operator::With => return Err(missing()),
    }
    Ok(())
}

fn exception_subject(operand: AnyLicenseInfo) -> Result<ExceptionSubject, LicenseParseError> {
    match operand {
        AnyLicenseInfo::OrLater(op) => Ok(ExceptionSubject::OrLater(op)),
        other => other.into_simple().map(ExceptionSubject::Simple).map_err(|other| {
            LicenseParseError::InvalidWithOperand {
                operand: format!("`{other}`"),
            }
        }),
    }
}

/// Position of the leftmost `(` that is never closed.
fn first_unclosed_paren(tokens: &[&str]) -> Option<usize> {
    let mut open = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match *token {
            "(" => open.push(index),
            ")" => {
                open.pop();
            }
            _ => {}
        }
    }
    open.first().copied()
}

fn sentinel_keyword(id: &str) -> Option<&'static str> {
    match id {
        NONE_KEYWORD => Some(NONE_KEYWORD),
        NOASSERTION_KEYWORD => Some(NOASSERTION_KEYWORD),
        _ => None,
    }
}
