use std::rc::Rc;

use crate::ast::{Definition, Expression, Lambda, Program};
use crate::error::Error;
use crate::lex::{self, Token, TokenKind};
use crate::value::Data;

/// One element of a [`ParenTree`] body: a bare token or a nested tree.
#[derive(Debug, Clone)]
pub enum ParenNode {
    Leaf(Token),
    Tree(ParenTree),
}

/// A bracket-grouped token sequence, with no semantic meaning yet.
///
/// `size` is the exact number of tokens the tree consumed, its own
/// brackets included; the parser relies on it to resume scanning right
/// after this form.
#[derive(Debug, Clone, Default)]
pub struct ParenTree {
    pub body: Vec<ParenNode>,
    pub size: usize,
}

impl ParenTree {
    /// Group the tokens starting at `index` into one tree.
    ///
    /// The close token is matched by text alone against a fixed
    /// opener-to-closer table, so a mismatched closer such as the `]` in
    /// `(foo]` is swallowed as a leaf rather than closing the tree. A
    /// non-bracket start token degenerates into an unbracketed scan whose
    /// empty expected closer never matches. Input exhausted before the
    /// closer returns the partial tree silently.
    pub fn parse(tokens: &[Token], index: usize) -> ParenTree {
        let close = match tokens[index].text.as_str() {
            "(" => ")",
            "[" => "]",
            "{" => "}",
            _ => "",
        };
        let mut index = index + 1;

        let mut tree = ParenTree {
            body: Vec::new(),
            size: 1,
        };
        while index < tokens.len() {
            let text = tokens[index].text.as_str();
            if text == "(" || text == "[" || text == "{" {
                let child = ParenTree::parse(tokens, index);
                index += child.size;
                tree.size += child.size;
                tree.body.push(ParenNode::Tree(child));
            } else if text == close {
                tree.size += 1;
                break;
            } else {
                tree.body.push(ParenNode::Leaf(tokens[index].clone()));
                index += 1;
                tree.size += 1;
            }
        }
        tree
    }
}

/// Parse source text into a program: lex, then group one top-level tree
/// at a time, sorting `define` forms from expressions.
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = lex::tokenize(source)?;

    let mut definitions = Vec::new();
    let mut expressions = Vec::new();

    let mut index = 0;
    while index < tokens.len() {
        let tree = ParenTree::parse(&tokens, index);
        index += tree.size;

        if is_definition(&tree) {
            definitions.push(fetch_definition(&tree)?);
        } else {
            expressions.push(fetch_tree(&tree)?);
        }
    }

    Ok(Program {
        definitions,
        expressions,
    })
}

fn is_definition(tree: &ParenTree) -> bool {
    matches!(tree.body.first(), Some(ParenNode::Leaf(token)) if token.text == "define")
}

/// Lower one tree node into an expression.
fn fetch(node: &ParenNode) -> Result<Expression, Error> {
    match node {
        ParenNode::Leaf(token) => fetch_leaf(token),
        ParenNode::Tree(tree) => fetch_tree(tree),
    }
}

fn fetch_leaf(token: &Token) -> Result<Expression, Error> {
    let expression = match token.kind {
        TokenKind::Number => Expression::Constant(Data::from_number_literal(&token.text)?),
        TokenKind::Boolean => Expression::Constant(Data::from_boolean_literal(&token.text)?),
        TokenKind::String => Expression::Constant(Data::from_quoted_literal(&token.text)),
        _ => Expression::Identifier(token.text.clone()),
    };
    Ok(expression)
}

fn fetch_tree(tree: &ParenTree) -> Result<Expression, Error> {
    match tree.body.first() {
        Some(ParenNode::Leaf(token)) => match token.text.as_str() {
            "let" => fetch_let(tree),
            "lambda" | "λ" => fetch_lambda(tree),
            "if" => fetch_if(tree),
            _ => fetch_call(tree),
        },
        // a nested form in operator position, or nothing at all
        _ => fetch_call(tree),
    }
}

/// Lower a `(define (name formal ...) body)` form into a definition
/// wrapping a lambda.
fn fetch_definition(tree: &ParenTree) -> Result<Definition, Error> {
    let header = fetch_identifiers(child(tree, 1, "define")?)?;
    let (identifier, formals) = match header.split_first() {
        Some((identifier, formals)) => (identifier.clone(), formals.to_vec()),
        None => {
            return Err(Error::Syntax(
                "define expression is missing a name".to_owned(),
            ))
        }
    };
    let body = fetch(child(tree, 2, "define")?)?;

    Ok(Definition {
        identifier,
        expression: Expression::Lambda(Rc::new(Lambda { formals, body })),
    })
}

fn fetch_lambda(tree: &ParenTree) -> Result<Expression, Error> {
    let formals = fetch_identifiers(child(tree, 1, "lambda")?)?;
    let body = fetch(child(tree, 2, "lambda")?)?;

    Ok(Expression::Lambda(Rc::new(Lambda { formals, body })))
}

fn fetch_let(tree: &ParenTree) -> Result<Expression, Error> {
    let bindings = fetch_bindings(child(tree, 1, "let")?)?;
    let body = fetch(child(tree, 2, "let")?)?;

    Ok(Expression::Bind {
        bindings,
        body: Box::new(body),
    })
}

fn fetch_if(tree: &ParenTree) -> Result<Expression, Error> {
    if tree.body.len() != 4 {
        return Err(Error::Syntax(
            "if expression must contain exactly three sub-expressions".to_owned(),
        ));
    }
    let test = fetch(&tree.body[1])?;
    let then = fetch(&tree.body[2])?;
    let otherwise = fetch(&tree.body[3])?;

    Ok(Expression::If {
        test: Box::new(test),
        then: Box::new(then),
        otherwise: Box::new(otherwise),
    })
}

fn fetch_call(tree: &ParenTree) -> Result<Expression, Error> {
    let (first, rest) = match tree.body.split_first() {
        Some(parts) => parts,
        None => return Err(Error::Syntax("empty expression".to_owned())),
    };
    let operator = fetch(first)?;
    let arguments = rest.iter().map(fetch).collect::<Result<Vec<_>, _>>()?;

    Ok(Expression::Call {
        operator: Box::new(operator),
        arguments,
    })
}

/// Read a `let` binding list: each element is a `(name expression)` pair.
fn fetch_bindings(node: &ParenNode) -> Result<Vec<(String, Expression)>, Error> {
    match node {
        ParenNode::Tree(tree) => tree.body.iter().map(fetch_binding).collect(),
        ParenNode::Leaf(_) => Err(Error::Syntax("expected a binding list".to_owned())),
    }
}

fn fetch_binding(node: &ParenNode) -> Result<(String, Expression), Error> {
    let tree = match node {
        ParenNode::Tree(tree) => tree,
        ParenNode::Leaf(_) => return Err(Error::Syntax("expected a binding pair".to_owned())),
    };
    let identifier = match child(tree, 0, "binding")? {
        ParenNode::Leaf(token) => token.text.clone(),
        ParenNode::Tree(_) => {
            return Err(Error::Syntax(
                "expected an identifier, found a form".to_owned(),
            ))
        }
    };
    let expression = fetch(child(tree, 1, "binding")?)?;
    Ok((identifier, expression))
}

/// Read a node's children as identifier texts. Every child must be an
/// identifier leaf.
fn fetch_identifiers(node: &ParenNode) -> Result<Vec<String>, Error> {
    let tree = match node {
        ParenNode::Tree(tree) => tree,
        ParenNode::Leaf(_) => {
            return Err(Error::Syntax(
                "expected a parenthesized identifier list".to_owned(),
            ))
        }
    };
    tree.body
        .iter()
        .map(|element| match element {
            ParenNode::Leaf(token) if token.kind == TokenKind::Identifier => {
                Ok(token.text.clone())
            }
            ParenNode::Leaf(token) => Err(Error::Syntax(format!(
                "expected an identifier, found {}",
                token.text
            ))),
            ParenNode::Tree(_) => Err(Error::Syntax(
                "expected an identifier, found a form".to_owned(),
            )),
        })
        .collect()
}

fn child<'a>(tree: &'a ParenTree, position: usize, form: &str) -> Result<&'a ParenNode, Error> {
    tree.body
        .get(position)
        .ok_or_else(|| Error::Syntax(format!("{form} expression is incomplete")))
}
