// Integration tests for the Jack syntax analyzer

use jack_analyzer::emitter::{render_tree, Layout};
use jack_analyzer::parser::{
    parse_source, Found, LexError, Lexer, Node, NonTerminal, ParseError, SourceLocation,
    SyntaxError, Token,
};

const SQUARE_GAME: &str = r#"
/** Implements a square that moves around the screen. */
class SquareGame {
    field Square square; // the square of this game
    field int direction;
    static boolean running, paused;

    /** Constructs a new game. */
    constructor SquareGame new() {
        let square = Square.new(0, 0, 30);
        let direction = 0;
        return this;
    }

    method void dispose() {
        do square.dispose();
        do Memory.deAlloc(this);
        return;
    }

    method void run() {
        var char key;
        var boolean exit;
        var Array history;
        let exit = false;
        let history = Array.new(16);

        while (~exit) {
            while (key = 0) {
                let key = Keyboard.keyPressed();
                do moveSquare();
            }
            if (key = 81) { let exit = true; }
            if ((key > 130) & (key < 134)) {
                let history[key - 131] = direction;
            } else {
                let direction = -1;
            }
        }
        do Output.printString("Game over: <bye> & thanks");
        return;
    }

    function int clamp(int value, int low, int high) {
        if (value < low) { return low; }
        if (value > high) { return high; }
        return value;
    }
}
"#;

fn parse(source: &str) -> Result<Node, ParseError> {
    parse_source(source)
}

fn lexemes(tokens: &[&Token]) -> Vec<String> {
    tokens.iter().map(|t| t.lexeme().to_string()).collect()
}

#[test]
fn test_full_program_parses() {
    let tree = parse(SQUARE_GAME).expect("Parsing failed");

    assert_eq!(tree.kind(), Some(NonTerminal::Class));
    assert_eq!(tree.find_all(NonTerminal::ClassVarDec).len(), 3);
    assert_eq!(tree.find_all(NonTerminal::SubroutineDec).len(), 4);
    assert_eq!(tree.find_all(NonTerminal::VarDec).len(), 3);
    assert_eq!(tree.find_all(NonTerminal::WhileStatement).len(), 2);
    assert_eq!(tree.find_all(NonTerminal::IfStatement).len(), 4);
    assert_eq!(tree.find_all(NonTerminal::DoStatement).len(), 4);
    assert_eq!(tree.find_all(NonTerminal::ReturnStatement).len(), 6);
}

#[test]
fn test_scenario_empty_class() {
    let tree = parse("class Main { }").unwrap();
    assert_eq!(
        render_tree(&tree, Layout::Compact),
        "<class><keyword>class</keyword><identifier>Main</identifier>\
         <symbol>{</symbol><symbol>}</symbol></class>"
    );
}

#[test]
fn test_scenario_let_statement() {
    let tree = parse("class Main { function void main() { let x = 5; return; } }").unwrap();
    let stmt = tree.find_all(NonTerminal::LetStatement)[0];

    assert_eq!(
        render_tree(stmt, Layout::Compact),
        "<letStatement><keyword>let</keyword><identifier>x</identifier><symbol>=</symbol>\
         <expression><term><integerConstant>5</integerConstant></term></expression>\
         <symbol>;</symbol></letStatement>"
    );
}

#[test]
fn test_scenario_do_statement() {
    let tree =
        parse("class Main { function void main() { do Output.printInt(1+2); return; } }").unwrap();
    let stmt = tree.find_all(NonTerminal::DoStatement)[0];

    assert_eq!(
        render_tree(stmt, Layout::Compact),
        "<doStatement><keyword>do</keyword><identifier>Output</identifier><symbol>.</symbol>\
         <identifier>printInt</identifier><symbol>(</symbol><expressionList><expression>\
         <term><integerConstant>1</integerConstant></term><symbol>+</symbol>\
         <term><integerConstant>2</integerConstant></term></expression></expressionList>\
         <symbol>)</symbol><symbol>;</symbol></doStatement>"
    );
}

#[test]
fn test_scenario_unterminated_string() {
    let err = parse("class Main { function void main() { do f(\"abc").unwrap_err();
    assert_eq!(
        err,
        ParseError::Lex(LexError::UnterminatedString {
            location: SourceLocation::new(1, 42)
        })
    );
}

#[test]
fn test_scenario_unclosed_block() {
    let err = parse("class Main { function void main() { if (x) { }").unwrap_err();
    match err {
        ParseError::Syntax(SyntaxError {
            expected,
            found,
            location,
        }) => {
            assert_eq!(expected, "'}'");
            assert_eq!(found, Found::EndOfInput);
            assert_eq!(location, SourceLocation::new(1, 47));
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_leaves_equal_token_stream() {
    let tree = parse(SQUARE_GAME).unwrap();
    let tokens = Lexer::new(SQUARE_GAME).tokenize().unwrap();

    let leaves: Vec<&Token> = tree.leaves();
    assert_eq!(leaves.len(), tokens.len());
    for (leaf, token) in leaves.iter().zip(&tokens) {
        assert_eq!(*leaf, token);
    }
}

#[test]
fn test_lexemes_reconstruct_significant_text() {
    let source = "class A{field int x;method void f(){let x=x+1;return;}}";
    let tokens = Lexer::new(source).tokenize().unwrap();
    let joined: String = tokens.iter().map(|t| t.lexeme()).collect();

    assert_eq!(joined, source);
}

#[test]
fn test_rendering_is_idempotent() {
    let tree = parse(SQUARE_GAME).unwrap();

    for layout in [Layout::Compact, Layout::Indented] {
        let first = render_tree(&tree, layout);
        let second = render_tree(&tree, layout);
        let reparsed = render_tree(&parse(SQUARE_GAME).unwrap(), layout);
        assert_eq!(first, second);
        assert_eq!(first, reparsed);
    }
}

#[test]
fn test_whitespace_and_comments_do_not_change_tree() {
    let dense = "class A{function int f(int a){var int b;let b=a*2;return b;}}";
    let airy = r#"
        // leading comment
        class   A
        {
            /** doc */ function int f ( int a ) /* inline */ {
                var int b ;
                let b = a
                    * 2 ;   // trailing
                return b ;
            }
        }
        /* closing */
    "#;

    let dense_xml = render_tree(&parse(dense).unwrap(), Layout::Indented);
    let airy_xml = render_tree(&parse(airy).unwrap(), Layout::Indented);
    assert_eq!(dense_xml, airy_xml);
}

#[test]
fn test_special_characters_escaped() {
    let tree = parse(SQUARE_GAME).unwrap();
    let xml = render_tree(&tree, Layout::Indented);

    assert!(xml.contains("<symbol> &lt; </symbol>"));
    assert!(xml.contains("<symbol> &gt; </symbol>"));
    assert!(xml.contains("<symbol> &amp; </symbol>"));
    assert!(xml.contains("<stringConstant> Game over: &lt;bye&gt; &amp; thanks </stringConstant>"));
}

#[test]
fn test_integer_boundary() {
    let ok = parse("class A { function int f() { return 32767; } }").unwrap();
    let leaves = ok.leaves();
    assert!(lexemes(&leaves).contains(&"32767".to_string()));

    let err = parse("class A { function int f() { return 32768; } }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Lex(LexError::IntegerOutOfRange { .. })
    ));
}

#[test]
fn test_negative_literal_is_unary_term() {
    let tree = parse("class A { function int f() { return -32767; } }").unwrap();
    let ret = tree.find_all(NonTerminal::ReturnStatement)[0];
    let term = &ret.children()[1].children()[0];
    let labels: Vec<&str> = term.children().iter().map(Node::label).collect();

    assert_eq!(labels, vec!["symbol", "term"]);
}

#[test]
fn test_error_message_has_position() {
    let err = parse("class A {\n  field int x\n}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error at line 3, column 1: expected ';', found symbol '}'"
    );
}

#[test]
fn test_deeply_nested_return_is_an_error() {
    let source = format!(
        "class A {{ function int f() {{ return {}1{}; }} }}",
        "(".repeat(2000),
        ")".repeat(2000)
    );
    let err = parse(&source).unwrap_err();

    match err {
        ParseError::Syntax(SyntaxError {
            found: Found::Token(token),
            ..
        }) => assert!(token.is_symbol('(')),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}
