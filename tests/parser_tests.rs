// tests/parser_tests.rs

use kaql::ast::{BinOp, Node, Token, UnaryOp};
use kaql::parser::{MAX_DEPTH, ParseError, Parser, rotate};

fn parse(src: &str) -> Node {
    Parser::new()
        .parse(src)
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", src, e))
        .unwrap_or_else(|| panic!("Expected a tree for {:?}", src))
}

fn parse_err(src: &str) -> ParseError {
    match Parser::new().parse(src) {
        Err(e) => e,
        Ok(node) => panic!("Expected error for {:?}, got {:?}", src, node),
    }
}

fn ident(name: &str, pos: usize) -> Node {
    Node::identifier(name, pos)
}

fn num(value: &str, pos: usize) -> Node {
    Node::number(value, pos)
}

fn eq(left: Node, right: Node) -> Node {
    Node::binary(BinOp::Eq, left, right)
}

// ============================================================================
// Empty Input
// ============================================================================

#[test]
fn test_blank_input_is_empty() {
    let mut parser = Parser::new();
    for src in ["", " ", "   "] {
        assert_eq!(parser.parse(src), Ok(None), "Failed for input: {:?}", src);
    }
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_equal_string() {
    assert_eq!(
        parse(r#"property == "value""#),
        eq(ident("property", 0), Node::string("value", 12))
    );
}

#[test]
fn test_equal_int() {
    assert_eq!(parse("property == 1"), eq(ident("property", 0), num("1", 12)));
}

#[test]
fn test_equal_float() {
    assert_eq!(parse("property == 1.1"), eq(ident("property", 0), num("1.1", 12)));
}

#[test]
fn test_equal_float_without_leading_digit() {
    assert_eq!(parse("property == .1"), eq(ident("property", 0), num(".1", 12)));
}

#[test]
fn test_equal_reserved_words() {
    for word in ["true", "false", "null"] {
        let src = format!("property == {}", word);
        assert_eq!(
            parse(&src),
            eq(ident("property", 0), ident(word, 12)),
            "Failed for input: {}",
            src
        );
    }
}

#[test]
fn test_comparison_operators() {
    let test_cases = vec![
        (r#"property != "value""#, BinOp::NotEq, Node::string("value", 12)),
        ("property > 1", BinOp::Greater, num("1", 11)),
        ("property >= 1", BinOp::GreaterEq, num("1", 12)),
        ("property < 1", BinOp::Less, num("1", 11)),
        ("property <= 1", BinOp::LessEq, num("1", 12)),
    ];

    for (src, op, right) in test_cases {
        assert_eq!(
            parse(src),
            Node::binary(op, ident("property", 0), right),
            "Failed for input: {}",
            src
        );
    }
}

#[test]
fn test_children_property() {
    assert_eq!(
        parse("property.children == 1"),
        eq(ident("property.children", 0), num("1", 21))
    );
}

#[test]
fn test_single_operand() {
    assert_eq!(parse("active"), ident("active", 0));
    assert_eq!(parse("  42"), num("42", 2));
    assert_eq!(parse(r#""x""#), Node::string("x", 0));
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_and() {
    assert_eq!(
        parse("property == true && property == false"),
        Node::binary(
            BinOp::And,
            eq(ident("property", 0), ident("true", 12)),
            eq(ident("property", 20), ident("false", 32)),
        )
    );
}

#[test]
fn test_or() {
    assert_eq!(
        parse("property == true || property == false"),
        Node::binary(
            BinOp::Or,
            eq(ident("property", 0), ident("true", 12)),
            eq(ident("property", 20), ident("false", 32)),
        )
    );
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_precedence() {
    assert_eq!(
        parse("property == 1 || property == 2 && property == 3"),
        Node::binary(
            BinOp::Or,
            eq(ident("property", 0), num("1", 12)),
            Node::binary(
                BinOp::And,
                eq(ident("property", 17), num("2", 29)),
                eq(ident("property", 34), num("3", 46)),
            ),
        )
    );
}

#[test]
fn test_precedence_and_before_or() {
    assert_eq!(
        parse("a == 1 && b == 2 || c == 3"),
        Node::binary(
            BinOp::Or,
            Node::binary(
                BinOp::And,
                eq(ident("a", 0), num("1", 5)),
                eq(ident("b", 10), num("2", 15)),
            ),
            eq(ident("c", 20), num("3", 25)),
        )
    );
}

#[test]
fn test_precedence_long_mixed_chain() {
    let src = "a == 1 || b == 2 && c == 3 || d == 4 && e == 5";
    assert_eq!(
        parse(src).to_string(),
        "(((a == 1) || ((b == 2) && (c == 3))) || ((d == 4) && (e == 5)))"
    );
}

#[test]
fn test_parens() {
    assert_eq!(
        parse("(property == 1 || property == 2) && property == 3"),
        Node::binary(
            BinOp::And,
            Node::binary(
                BinOp::Or,
                eq(ident("property", 1), num("1", 13)),
                eq(ident("property", 18), num("2", 30)),
            ),
            eq(ident("property", 36), num("3", 48)),
        )
    );
}

#[test]
fn test_parens_on_the_right() {
    assert_eq!(
        parse("a == 1 && (b == 2 || c == 3)").to_string(),
        "((a == 1) && ((b == 2) || (c == 3)))"
    );
    assert_eq!(parse("a == (b || c)").to_string(), "(a == (b || c))");
    assert_eq!(parse("a == (b || c) && d").to_string(), "((a == (b || c)) && d)");
}

#[test]
fn test_nested_parens() {
    assert_eq!(parse("((a))"), ident("a", 2));
    assert_eq!(parse("((a || b) && c)").to_string(), "((a || b) && c)");
}

// ============================================================================
// Associativity
// ============================================================================

#[test]
fn test_equal_precedence_groups_left() {
    let test_cases = vec![
        ("a || b || c", "((a || b) || c)"),
        ("a && b && c", "((a && b) && c)"),
        ("a == 1 == 2", "((a == 1) == 2)"),
        ("a < b >= c != d", "(((a < b) >= c) != d)"),
        ("a || b || c || d", "(((a || b) || c) || d)"),
    ];

    for (src, expected) in test_cases {
        assert_eq!(parse(src).to_string(), expected, "Failed for input: {}", src);
    }
}

#[test]
fn test_left_chain_positions() {
    assert_eq!(
        parse("a || b || c"),
        Node::binary(
            BinOp::Or,
            Node::binary(BinOp::Or, ident("a", 0), ident("b", 5)),
            ident("c", 10),
        )
    );
}

// ============================================================================
// Long Chains
// ============================================================================

#[test]
fn test_long_or_chain() {
    let src = vec!["a == 1"; 10_000].join(" || ");
    let tree = parse(&src);

    let mut node = &tree;
    let mut ors = 0;
    while let Node::Binary {
        op: BinOp::Or,
        left,
        right,
    } = node
    {
        assert!(matches!(**right, Node::Binary { op: BinOp::Eq, .. }));
        ors += 1;
        node = left;
    }

    assert_eq!(ors, 9_999);
    assert_eq!(node, &eq(ident("a", 0), num("1", 5)));
}

#[test]
fn test_long_mixed_chain() {
    let src = vec!["a == 1 && b == 2"; 5_000].join(" || ");
    let tree = parse(&src);

    let mut node = &tree;
    let mut ors = 0;
    while let Node::Binary {
        op: BinOp::Or,
        left,
        right,
    } = node
    {
        assert_eq!(right.to_string(), "((a == 1) && (b == 2))");
        ors += 1;
        node = left;
    }

    assert_eq!(ors, 4_999);
    assert_eq!(node.to_string(), "((a == 1) && (b == 2))");
    assert_eq!(tree.to_string().matches("||").count(), 4_999);
}

#[test]
fn test_long_and_chain_renders() {
    let src = vec!["flag"; 20_000].join(" && ");
    let rendered = parse(&src).to_string();
    assert!(rendered.starts_with("((((flag && flag) && flag)"));
    assert_eq!(rendered.matches("&&").count(), 19_999);
}

// ============================================================================
// Nesting Depth
// ============================================================================

#[test]
fn test_nesting_up_to_limit() {
    let src = format!("{}a{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
    assert_eq!(parse(&src), ident("a", MAX_DEPTH));

    let src = format!("{}1", "-".repeat(MAX_DEPTH));
    assert_eq!(parse(&src).to_string(), src);

    let src = format!("{}a{}", "(-".repeat(MAX_DEPTH / 2), ")".repeat(MAX_DEPTH / 2));
    assert!(Parser::new().parse(&src).is_ok());
}

#[test]
fn test_nesting_past_limit() {
    let src = format!("{}a{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
    assert_eq!(parse_err(&src).to_string(), "unexpected ( at 256");

    let src = format!("{}1", "-".repeat(MAX_DEPTH + 1));
    assert_eq!(parse_err(&src).to_string(), "unexpected - at 256");
}

#[test]
fn test_pathological_nesting_fails_cleanly() {
    let parens = format!("{}a{}", "(".repeat(100_000), ")".repeat(100_000));
    let err = parse_err(&parens);
    assert_eq!(err.token(), Token::LeftParen);
    assert_eq!(err.position(), MAX_DEPTH);

    let minuses = format!("{}1", "-".repeat(100_000));
    assert_eq!(parse_err(&minuses).token(), Token::Minus);
}

// ============================================================================
// Unary Minus
// ============================================================================

#[test]
fn test_negative_number() {
    assert_eq!(
        parse("property == -10"),
        eq(
            ident("property", 0),
            Node::unary(UnaryOp::Minus, num("10", 13))
        )
    );
}

#[test]
fn test_unary_binds_to_left_operand() {
    assert_eq!(
        parse("-x == y"),
        eq(Node::unary(UnaryOp::Minus, ident("x", 1)), ident("y", 6))
    );
}

#[test]
fn test_unary_in_chains() {
    let test_cases = vec![
        ("-a == 1 && b", "((-a == 1) && b)"),
        ("a && -b || c", "((a && -b) || c)"),
        ("--a", "--a"),
        ("-(a || b) && c", "(-(a || b) && c)"),
        ("(-a) == b", "(-a == b)"),
        ("(-a || b) && c", "((-a || b) && c)"),
    ];

    for (src, expected) in test_cases {
        assert_eq!(parse(src).to_string(), expected, "Failed for input: {}", src);
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_dangling_operator() {
    let err = parse_err("property ==");
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            token: Token::EndOfInput,
            pos: 11
        }
    );
    assert_eq!(err.to_string(), "unexpected EOF at 11");
}

#[test]
fn test_dangling_operator_with_trailing_space() {
    assert_eq!(parse_err("property == ").to_string(), "unexpected EOF at 12");
}

#[test]
fn test_unmatched_left_paren() {
    assert_eq!(parse_err("(").to_string(), "unexpected EOF at 1");
    assert_eq!(parse_err("(a == 1").to_string(), "unexpected EOF at 7");
}

#[test]
fn test_unmatched_right_paren() {
    assert_eq!(parse_err("a)").to_string(), "unexpected ) at 1");
    assert_eq!(parse_err("a == 1) && b").to_string(), "unexpected ) at 6");
    assert_eq!(parse_err(")").to_string(), "unexpected ) at 0");
}

#[test]
fn test_empty_parens() {
    assert_eq!(parse_err("()").to_string(), "unexpected ) at 1");
}

#[test]
fn test_single_equals() {
    let err = parse_err("property = 1");
    assert_eq!(err.token(), Token::Illegal);
    assert_eq!(err.position(), 9);
    assert_eq!(err.to_string(), "unexpected ILLEGAL at 9");
}

#[test]
fn test_missing_operator() {
    assert_eq!(parse_err("a b").to_string(), "unexpected IDENT at 2");
    assert_eq!(parse_err("a 1").to_string(), "unexpected NUMBER at 2");
    assert_eq!(parse_err(r#"a "b""#).to_string(), "unexpected STRING at 2");
    assert_eq!(parse_err("a (b)").to_string(), "unexpected ( at 2");
    assert_eq!(parse_err("a - b").to_string(), "unexpected - at 2");
}

#[test]
fn test_leading_operator() {
    assert_eq!(parse_err("== 1").to_string(), "unexpected = at 0");
    assert_eq!(parse_err("&& a").to_string(), "unexpected & at 0");
    assert_eq!(parse_err("a || || b").to_string(), "unexpected | at 5");
}

#[test]
fn test_unterminated_string_error() {
    let err = parse_err(r#"a == "b"#);
    assert_eq!(err.token(), Token::Illegal);
    assert_eq!(err.position(), 7);
}

#[test]
fn test_whitespace_other_than_space() {
    assert_eq!(parse_err("a ==\t1").to_string(), "unexpected ILLEGAL at 4");
    assert_eq!(parse_err("a\n").to_string(), "unexpected ILLEGAL at 1");
}

#[test]
fn test_lone_minus() {
    assert_eq!(parse_err("-").to_string(), "unexpected EOF at 1");
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_rotate_parsed_tree_is_noop() {
    for src in [
        "property == 1 || property == 2 && property == 3",
        "a == 1 && b == 2 || c == 3",
        "a || b || c",
        "-x == y",
    ] {
        let tree = parse(src);
        assert_eq!(rotate(tree.clone()), tree, "Failed for input: {}", src);
    }
}

#[test]
fn test_rotate_fixes_right_leaning_tree() {
    // What a purely right-recursive parse of `a == 1 || b` looks like
    let tree = eq(
        ident("a", 0),
        Node::binary(BinOp::Or, num("1", 5), ident("b", 10)),
    );

    assert_eq!(
        rotate(tree),
        Node::binary(BinOp::Or, eq(ident("a", 0), num("1", 5)), ident("b", 10))
    );
}

#[test]
fn test_rotate_recurses_into_new_left() {
    // a == (1 && (b || c)) -> ((a == 1) && b) || c
    let tree = eq(
        ident("a", 0),
        Node::binary(
            BinOp::Or,
            Node::binary(BinOp::And, num("1", 5), ident("b", 10)),
            ident("c", 15),
        ),
    );

    assert_eq!(rotate(tree).to_string(), "(((a == 1) && b) || c)");
}

#[test]
fn test_rotate_is_idempotent() {
    let tree = eq(
        ident("a", 0),
        Node::binary(BinOp::Or, num("1", 5), ident("b", 10)),
    );
    let once = rotate(tree);
    assert_eq!(rotate(once.clone()), once);
}
