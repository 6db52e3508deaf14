use std::collections::VecDeque;

use num_bigint::BigUint;
use pretty_assertions::assert_eq;

use super::*;
use crate::{scan, scan_str, Forms};

fn at(line: Line, column: u32) -> Location {
    Location::with_column(line, column)
}

fn tokens_with(text: &str, options: &ScannerOptions) -> Vec<Token> {
    match scan_str(text, at(1, 1), options) {
        Ok((tokens, _)) => tokens,
        Err((error, _)) => panic!("{text:?} failed: {error}"),
    }
}

fn tokens(text: &str) -> Vec<Token> {
    tokens_with(text, &ScannerOptions::new())
}

fn categories(text: &str) -> Vec<String> {
    tokens(text).iter().map(|t| t.category().into_owned()).collect()
}

fn values(text: &str) -> Vec<Option<Value>> {
    tokens(text).iter().map(|t| t.value().cloned()).collect()
}

fn error_with(text: &str, options: &ScannerOptions) -> (ScanError, Location) {
    match scan_str(text, at(1, 1), options) {
        Ok((tokens, _)) => panic!("{text:?} scanned to {tokens:?}"),
        Err(failure) => failure,
    }
}

fn error(text: &str) -> (ScanError, Location) {
    error_with(text, &ScannerOptions::new())
}

fn string(value: &str) -> Option<Value> {
    Some(Value::String(value.to_string()))
}

fn name(value: &str) -> Option<Value> {
    Some(Value::Name(value.to_string()))
}

/// Feed `chunks` through the step API, then end of input, collecting the
/// tokens of every form.
fn feed(chunks: &[&str], options: &ScannerOptions) -> Result<Vec<Token>, ScanError> {
    let mut queue: VecDeque<String> = chunks.iter().map(|c| (*c).to_string()).collect();
    let mut all = Vec::new();
    let mut cont = None;
    let mut location = at(1, 1);
    loop {
        let chunk = queue.pop_front();
        let input = match &chunk {
            Some(text) => Input::Chunk(text),
            None => Input::Eof,
        };
        match scan(cont.take(), input, location, options) {
            ScanResult::More(next) => cont = Some(next),
            ScanResult::Done { outcome, rest } => {
                match outcome {
                    Outcome::Ok { tokens, end } => {
                        all.extend(tokens);
                        location = end;
                    }
                    Outcome::Eof(_) => return Ok(all),
                    Outcome::Error { error, .. } => return Err(error),
                }
                match rest {
                    Remaining::Text(text) => queue.push_front(text),
                    Remaining::Eof => return Ok(all),
                }
            }
        }
    }
}

// === Forms ===

#[test]
fn simple_function_clause() {
    let options = ScannerOptions::new();
    let first = scan(None, Input::Chunk("foo(X) -> X + 1."), at(1, 1), &options);
    // `.` at the end of a chunk could still be `..`
    let ScanResult::More(cont) = first else {
        panic!("expected a continuation");
    };
    let ScanResult::Done { outcome, rest } = cont.resume(Input::Eof) else {
        panic!("expected a finished scan");
    };
    assert_eq!(rest, Remaining::Eof);
    let Outcome::Ok { tokens, end } = outcome else {
        panic!("expected tokens, got {outcome:?}");
    };
    let cats: Vec<_> = tokens.iter().map(|t| t.category().into_owned()).collect();
    assert_eq!(
        cats,
        ["atom", "(", "var", ")", "->", "var", "+", "integer", "dot"]
    );
    let columns: Vec<_> = tokens.iter().filter_map(Token::column).collect();
    assert_eq!(columns, [1, 4, 5, 6, 8, 11, 13, 15, 16]);
    assert_eq!(end, at(1, 17));
}

#[test]
fn dot_stops_the_step_and_returns_the_rest() {
    let options = ScannerOptions::new();
    let result = scan(None, Input::Chunk("a. b."), at(1, 1), &options);
    let ScanResult::Done { outcome, rest } = result else {
        panic!("expected a finished scan");
    };
    assert_eq!(rest, Remaining::Text("b.".to_string()));
    let Outcome::Ok { tokens, end } = outcome else {
        panic!("expected tokens");
    };
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].text(), None);
    assert_eq!(end, at(1, 4));
}

#[test]
fn end_of_input_without_tokens() {
    let options = ScannerOptions::new();
    let result = scan(None, Input::Eof, at(3, 1), &options);
    let ScanResult::Done { outcome, rest } = result else {
        panic!("expected a finished scan");
    };
    assert_eq!(outcome, Outcome::Eof(at(3, 1)));
    assert_eq!(rest, Remaining::Eof);

    let result = scan(None, Input::Chunk("  % only a comment\n"), at(1, 1), &options);
    let ScanResult::More(cont) = result else {
        panic!("expected a continuation");
    };
    let ScanResult::Done { outcome, .. } = cont.resume(Input::Eof) else {
        panic!("expected a finished scan");
    };
    assert_eq!(outcome, Outcome::Eof(at(2, 1)));
}

#[test]
fn trailing_tokens_without_dot() {
    let options = ScannerOptions::new();
    let ScanResult::More(cont) = scan(None, Input::Chunk("foo bar"), at(1, 1), &options) else {
        panic!("expected a continuation");
    };
    let ScanResult::Done { outcome, rest } = cont.resume(Input::Eof) else {
        panic!("expected a finished scan");
    };
    assert_eq!(rest, Remaining::Eof);
    let Outcome::Ok { tokens, end } = outcome else {
        panic!("expected tokens");
    };
    assert_eq!(tokens.len(), 2);
    assert_eq!(end, at(1, 8));
}

#[test]
fn continuation_exposes_progress() {
    let options = ScannerOptions::new();
    let ScanResult::More(cont) = scan(None, Input::Chunk("a -"), at(1, 1), &options) else {
        panic!("expected a continuation");
    };
    assert_eq!(cont.state(), "dispatch");
    assert_eq!(cont.pending(), "-");
    assert_eq!(cont.tokens().len(), 1);
    assert_eq!(cont.location(), at(1, 3));

    let ScanResult::More(cont) = cont.resume(Input::Chunk("> fo")) else {
        panic!("expected a continuation");
    };
    assert_eq!(cont.state(), "name");
    assert_eq!(cont.pending(), "");
    let ScanResult::More(cont) = cont.resume(Input::Chunk("o.")) else {
        panic!("expected a continuation");
    };
    let ScanResult::Done { outcome, .. } = cont.resume(Input::Chunk("\n")) else {
        panic!("expected a finished scan");
    };
    let Outcome::Ok { tokens, end } = outcome else {
        panic!("expected tokens");
    };
    assert_eq!(tokens[2].name(), Some("foo"));
    assert_eq!(tokens[1].category(), "->");
    assert_eq!(end, at(2, 1));
}

#[test]
fn scan_ignores_start_when_resuming() {
    let options = ScannerOptions::new();
    let ScanResult::More(cont) = scan(None, Input::Chunk("x"), at(5, 1), &options) else {
        panic!("expected a continuation");
    };
    let result = scan(Some(cont), Input::Eof, at(99, 9), &ScannerOptions::new().with_text(true));
    let Some(Outcome::Ok { tokens, .. }) = result.outcome() else {
        panic!("expected tokens");
    };
    assert_eq!(tokens[0].location(), at(5, 1));
    assert_eq!(tokens[0].text(), None);
}

// === Whitespace, comments, dots ===

#[test]
fn newlines_reset_columns() {
    let toks = tokens("a\n  b % c\n\tc");
    let locations: Vec<_> = toks.iter().map(Token::location).collect();
    assert_eq!(locations, [at(1, 1), at(2, 3), at(3, 2)]);
}

#[test]
fn columns_can_be_disabled() {
    let (toks, end) = scan_str("a\n b.", Location::line(7), &ScannerOptions::new()).unwrap();
    let locations: Vec<_> = toks.iter().map(Token::location).collect();
    assert_eq!(
        locations,
        [Location::line(7), Location::line(8), Location::line(8)]
    );
    assert_eq!(end, Location::line(8));
}

#[test]
fn dot_family() {
    assert_eq!(categories("a..b"), ["atom", "..", "atom"]);
    assert_eq!(categories("a...b"), ["atom", "...", "atom"]);
    assert_eq!(categories("a.b"), ["atom", ".", "atom"]);
    assert_eq!(categories("a.%c\nb."), ["atom", "dot", "atom", "dot"]);
}

#[test]
fn dot_text_includes_following_whitespace() {
    let options = ScannerOptions::new().with_text(true);
    let (toks, end) = scan_str("a.\nb. c.", at(1, 1), &options).unwrap();
    let texts: Vec<_> = toks.iter().map(|t| t.text().unwrap_or_default().to_string()).collect();
    assert_eq!(texts, ["a", ".\n", "b", ". ", "c", "."]);
    assert_eq!(end, at(2, 6));
}

// === Operators & symbols ===

#[test]
fn operators_longest_match() {
    let ops = "=:= =/= -> -- ++ =< >= <= << >> :: := || ?? ?= => <- /= == !";
    let expected: Vec<&str> = ops.split(' ').collect();
    assert_eq!(categories(ops), expected);
    assert_eq!(categories("a=<-b"), ["atom", "=<", "-", "atom"]);
    assert_eq!(categories("<<>>"), ["<<", ">>"]);
}

#[test]
fn other_characters_are_symbols() {
    let toks = tokens("& \\ \u{3BB}");
    let kinds: Vec<_> = toks.iter().map(|t| t.kind().clone()).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Symbol('&'),
            TokenKind::Symbol('\\'),
            TokenKind::Symbol('\u{3BB}')
        ]
    );
    assert_eq!(toks[2].category(), "\u{3BB}");
}

#[test]
fn noncharacters_are_illegal() {
    let (err, end) = error("a \u{FFFE}");
    assert_eq!(err, ScanError::illegal(at(1, 3), IllegalKind::Character));
    assert_eq!(end, at(1, 4));
}

// === Names ===

#[test]
fn atoms_and_variables() {
    assert_eq!(categories("foo_Bar@x _ _X Abc \u{E9}t\u{E9}"), [
        "atom", "var", "var", "var", "atom"
    ]);
    assert_eq!(values("foo 'hello world'"), [name("foo"), name("hello world")]);
}

#[test]
fn reserved_words() {
    let toks = tokens("case 'case' maybe");
    assert_eq!(toks[0].kind(), &TokenKind::Reserved("case".to_string()));
    assert_eq!(toks[0].category(), "case");
    assert_eq!(toks[0].value(), None);
    // quoted atoms are never reserved
    assert_eq!(toks[1].kind(), &TokenKind::Atom);
    assert_eq!(toks[2].kind(), &TokenKind::Atom);

    let options = ScannerOptions::new().with_feature_keywords(["maybe", "else"]);
    let toks = tokens_with("maybe else", &options);
    assert_eq!(toks[0].category(), "maybe");
    assert_eq!(toks[1].category(), "else");

    let options = ScannerOptions::new().with_reserved_predicate(|w| w == "foo");
    let toks = tokens_with("foo case", &options);
    assert_eq!(toks[0].category(), "foo");
    assert_eq!(toks[1].kind(), &TokenKind::Atom);
}

#[test]
fn name_length_limit() {
    let longest = "a".repeat(255);
    assert_eq!(values(&longest), [name(&longest)]);

    let (err, end) = error(&format!("x {}", "a".repeat(256)));
    assert_eq!(err, ScanError::illegal(at(1, 3), IllegalKind::Atom));
    assert_eq!(end, at(1, 259));

    let (err, _) = error(&format!("V{}", "a".repeat(255)));
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Var));

    let (err, _) = error(&format!("'{}'", "q".repeat(256)));
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Atom));
}

#[test]
fn unterminated_quoted_atom() {
    let (err, end) = error("'abc");
    assert_eq!(
        err,
        ScanError::new(at(1, 1), ScanErrorKind::UnterminatedAtom { head: "abc".into() })
    );
    assert_eq!(end, at(1, 5));
}

// === Character literals ===

#[test]
fn character_literals() {
    assert_eq!(
        values("$a $\\n $\\x{41} $  $\\101"),
        [
            Some(Value::Char('a')),
            Some(Value::Char('\n')),
            Some(Value::Char('A')),
            Some(Value::Char(' ')),
            Some(Value::Char('A')),
        ]
    );
}

#[test]
fn character_newline_advances_line() {
    let toks = tokens("$\nx");
    assert_eq!(toks[0].value(), Some(&Value::Char('\n')));
    assert_eq!(toks[1].location(), at(2, 1));
}

#[test]
fn character_errors() {
    let (err, end) = error("$");
    assert_eq!(err, ScanError::new(at(1, 1), ScanErrorKind::UnterminatedChar));
    assert_eq!(end, at(1, 2));

    let (err, _) = error("$\\x{4");
    assert_eq!(err.kind, ScanErrorKind::UnterminatedChar);

    let (err, end) = error("$\\x{ZZ}");
    assert_eq!(err, ScanError::illegal(at(1, 1), IllegalKind::Character));
    assert_eq!(end, at(1, 6));
}

// === Numbers ===

#[test]
fn integers() {
    let int = |n: u32| Some(Value::Integer(BigUint::from(n)));
    assert_eq!(
        values("42 1_000 16#FF 2#1010 36#z 16#f_f"),
        [int(42), int(1000), int(255), int(10), int(35), int(255)]
    );
}

#[test]
fn big_integers() {
    let text = "123456789012345678901234567890";
    let expected = BigUint::parse_bytes(text.as_bytes(), 10).unwrap();
    assert_eq!(values(text), [Some(Value::Integer(expected))]);
}

#[test]
fn floats() {
    assert_eq!(
        values("2.75 1.5e3 2.5E-3 1_0.0_1"),
        [
            Some(Value::Float(2.75)),
            Some(Value::Float(1500.0)),
            Some(Value::Float(0.0025)),
            Some(Value::Float(10.01)),
        ]
    );
}

#[test]
fn number_boundaries() {
    assert_eq!(categories("1e5"), ["integer", "atom"]);
    assert_eq!(categories("1.foo"), ["integer", ".", "atom"]);
    assert_eq!(categories("1."), ["integer", "dot"]);
    assert_eq!(categories("1.."), ["integer", ".."]);
}

#[test]
fn separator_errors() {
    for text in ["1__0", "1_", "1_x", "16#F_"] {
        let (err, _) = error(text);
        assert_eq!(err, ScanError::illegal(at(1, 1), IllegalKind::Integer), "{text}");
    }
    let (err, _) = error("1.0_e3");
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Float));
}

#[test]
fn separator_error_spans_the_run() {
    for (text, column) in [("1__0", 4), ("1___0", 5), ("1_x", 3), ("1_", 3)] {
        let (_, end) = error(text);
        assert_eq!(end, at(1, column), "{text}");
    }

    // a run cut by the chunk boundary waits for the rest of it
    let options = ScannerOptions::new();
    let ScanResult::More(cont) = scan(None, Input::Chunk("1__"), at(1, 1), &options) else {
        panic!("expected the scan to suspend");
    };
    let ScanResult::Done { outcome, .. } = cont.resume(Input::Chunk("_0.")) else {
        panic!("expected a finished scan");
    };
    let Outcome::Error { end, .. } = outcome else {
        panic!("expected an error");
    };
    assert_eq!(end, at(1, 5));
}

#[test]
fn illegal_bases() {
    let options = ScannerOptions::new();
    for (text, base) in [("1#0", "1"), ("37#1", "37"), ("0#1", "0")] {
        let result = scan(None, Input::Chunk(text), at(1, 1), &options);
        let ScanResult::Done { outcome, rest } = result else {
            panic!("{text}: expected a finished scan");
        };
        let Outcome::Error { error, end } = outcome else {
            panic!("{text}: expected an error");
        };
        assert_eq!(error.kind, ScanErrorKind::IllegalBase(base.into()));
        assert_eq!(error.location, at(1, 1));
        assert_eq!(end, at(1, 1 + base.len() as u32));
        assert!(matches!(rest, Remaining::Text(ref r) if r.starts_with('#')));
    }
}

#[test]
fn malformed_numbers() {
    let (err, _) = error("16#");
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Integer));
    let (err, _) = error("16#g");
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Integer));
    let (err, _) = error("1.0e");
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Float));
    let (err, _) = error("1.0e+x");
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Float));
    let (err, _) = error("1.0e999");
    assert_eq!(err.kind, ScanErrorKind::illegal(IllegalKind::Float));
}

// === Strings ===

#[test]
fn strings_decode_escapes() {
    assert_eq!(
        values(r#""a\tb" "" "\x{41}\101\^A" "q\"q""#),
        [string("a\tb"), string(""), string("AA\u{1}"), string("q\"q")]
    );
}

#[test]
fn multiline_string() {
    let toks = tokens("\"a\nb\" x");
    assert_eq!(toks[0].value(), string("a\nb").as_ref());
    assert_eq!(toks[1].location(), at(2, 4));
}

#[test]
fn unterminated_string() {
    let (err, end) = error("\"abc");
    assert_eq!(
        err,
        ScanError::new(at(1, 1), ScanErrorKind::UnterminatedString { head: "abc".into() })
    );
    assert_eq!(end, at(1, 5));

    let long = format!("\"{}", "x".repeat(40));
    let (err, _) = error(&long);
    assert_eq!(err.kind, ScanErrorKind::UnterminatedString { head: "x".repeat(16) });
}

#[test]
fn bad_escape_in_string() {
    let (err, end) = error("\"a\\x{ZZ}\"");
    assert_eq!(err, ScanError::illegal(at(1, 3), IllegalKind::Character));
    assert_eq!(end, at(1, 7));
}

#[test]
fn adjacent_strings() {
    let (err, end) = error(r#""a""b""#);
    assert_eq!(err, ScanError::new(at(1, 4), ScanErrorKind::StringConcat));
    assert_eq!(end, at(1, 5));
    assert_eq!(categories(r#""a" "b""#), ["string", "string"]);
}

#[test]
fn text_capture() {
    let options = ScannerOptions::new().with_text(true);
    let toks = tokens_with(r#"f("a\tb", 'x y', 16#F_F, $\n, 1.5)"#, &options);
    let texts: Vec<_> = toks.iter().filter_map(Token::text).collect();
    assert_eq!(
        texts,
        ["f", "(", r#""a\tb""#, ",", "'x y'", ",", "16#F_F", ",", r"$\n", ",", "1.5", ")"]
    );
}

// === Sigils ===

#[test]
fn sigil_tokens() {
    let toks = tokens(r#"~s"a\tb"x"#);
    let cats: Vec<_> = toks.iter().map(|t| t.category().into_owned()).collect();
    assert_eq!(cats, ["sigil_prefix", "string", "sigil_suffix"]);
    assert_eq!(toks[0].name(), Some("s"));
    assert_eq!(toks[1].value(), string("a\tb").as_ref());
    assert_eq!(toks[2].name(), Some("x"));
    assert_eq!(toks[2].location(), at(1, 9));
}

#[test]
fn sigil_escape_policy() {
    let texts = [
        (r#"~"a\tb""#, r"a\tb"),
        (r"~b(a\tb)", "a\tb"),
        (r"~S[a\n]", r"a\n"),
        (r"~s<\x{41}>", "A"),
        (r"~s{x}", "x"),
        (r"~B/a\s/", r"a\s"),
        ("~s|a|", "a"),
        ("~s#a#", "a"),
        ("~s`a`", "a"),
        ("~s'a'", "a"),
    ];
    for (text, expected) in texts {
        let toks = tokens(text);
        assert_eq!(toks[1].value(), string(expected).as_ref(), "{text}");
        assert_eq!(toks.len(), 3, "{text}");
    }
}

#[test]
fn sigil_errors() {
    let (err, end) = error("~s!x!");
    assert_eq!(err, ScanError::illegal(at(1, 3), IllegalKind::String));
    assert_eq!(end, at(1, 4));

    let (err, _) = error("~s");
    assert_eq!(
        err,
        ScanError::new(at(1, 1), ScanErrorKind::UnterminatedSigil { head: String::new() })
    );

    let (err, _) = error("~s(abc");
    assert_eq!(err.kind, ScanErrorKind::UnterminatedSigil { head: "abc".into() });

    let (err, _) = error(r#"~s"a""b""#);
    assert_eq!(err, ScanError::new(at(1, 6), ScanErrorKind::StringConcat));

    // only a `"` delimiter is checked for adjacency
    assert_eq!(
        categories(r#"~s(a)"b""#),
        ["sigil_prefix", "string", "sigil_suffix", "string"]
    );
}

// === Triple-quoted strings ===

#[test]
fn triple_quoted_sigil() {
    let toks = tokens("~\"\"\"\n  hi\n  \"\"\"");
    let cats: Vec<_> = toks.iter().map(|t| t.category().into_owned()).collect();
    assert_eq!(cats, ["sigil_prefix", "string", "sigil_suffix"]);
    assert_eq!(toks[0].name(), Some(""));
    assert_eq!(toks[1].value(), string("hi\n").as_ref());
    assert_eq!(toks[1].location(), at(1, 2));
    assert_eq!(toks[2].location(), at(3, 6));
}

#[test]
fn triple_quoted_strips_indentation() {
    assert_eq!(
        values("\"\"\"\n    a\n      b\n    \"\"\""),
        [string("a\n  b")]
    );
    assert_eq!(values("\"\"\"\n  a\n\n  b\n  \"\"\""), [string("a\n\nb")]);
    assert_eq!(values("\"\"\"\n\"\"\""), [string("")]);
}

#[test]
fn triple_quoted_escapes() {
    // plain triple-quoted strings are verbatim
    assert_eq!(
        values("\"\"\"\n  a\\tb\n  c\n  \"\"\""),
        [string("a\\tb\nc")]
    );
    assert_eq!(
        values("~s\"\"\"\n  a\\tb\n  c\n  \"\"\"")[1],
        string("a\tb\nc")
    );
}

#[test]
fn triple_quoted_longer_runs() {
    // three quotes inside a four-quote string are content
    let text = "\"\"\"\"\n  \"\"\"\n  \"\"\"\"";
    assert_eq!(values(text), [string("\"\"\"\n")]);
    assert_eq!(tokens(text)[0].location(), at(1, 1));
}

#[test]
fn triple_quoted_text_is_raw() {
    let options = ScannerOptions::new().with_text(true);
    let source = "\"\"\"\n  x\n  \"\"\"";
    let toks = tokens_with(source, &options);
    assert_eq!(toks[0].text(), Some(source));
}

#[test]
fn triple_quoted_layout_errors() {
    let (err, end) = error("\"\"\"\n  a\n b\n  \"\"\"");
    assert_eq!(err, ScanError::new(at(3, 2), ScanErrorKind::Indentation));
    assert_eq!(end, at(3, 3));

    // the earliest offending line is reported
    let (err, _) = error("\"\"\"\nx\ny\n  \"\"\"");
    assert_eq!(err, ScanError::new(at(2, 1), ScanErrorKind::Indentation));

    let (err, _) = error("\"\"\" x\n  \"\"\"");
    assert_eq!(err, ScanError::new(at(1, 5), ScanErrorKind::WhiteSpace));

    let (err, _) = error("~s\"\"\"\n  a\\qb\\^1\n  \"\"\"");
    assert_eq!(err, ScanError::illegal(at(2, 7), IllegalKind::Character));
}

#[test]
fn unterminated_triple_quoted() {
    let (err, _) = error("\"\"\"\n  abc");
    assert_eq!(
        err,
        ScanError::new(
            at(1, 1),
            ScanErrorKind::UnterminatedTripleQuoted { head: "  abc".into() }
        )
    );
    let (err, _) = error("~\"\"\"\n");
    assert_eq!(err.kind, ScanErrorKind::UnterminatedSigil { head: String::new() });
}

// === Check annotations ===

#[test]
fn check_comments() {
    let options = ScannerOptions::new().with_check_comments(true);
    let toks = tokens_with("%ssa% x = 1 %ssa% y.\nfoo.", &options);
    let cats: Vec<_> = toks.iter().map(|t| t.category().into_owned()).collect();
    assert_eq!(
        cats,
        ["%ssa%", "atom", "=", "integer", "atom", "ssa_check_end", "atom", "dot"]
    );
    assert_eq!(toks[5].location(), at(1, 20));

    // without the option the marker is an ordinary comment
    assert_eq!(categories("%ssa% x = 1.\nfoo."), ["atom", "dot"]);
}

#[test]
fn check_marker_split_across_chunks() {
    let options = ScannerOptions::new().with_check_comments(true);
    let whole = feed(&["%ssa% a.\nb."], &options).unwrap();
    for split in 1..5 {
        let text = "%ssa% a.\nb.";
        let parts = feed(&[&text[..split], &text[split..]], &options).unwrap();
        assert_eq!(parts, whole, "split at {split}");
    }
    assert_eq!(whole[0].kind(), &TokenKind::CheckComment);
}

// === Chunking ===

const SAMPLE: &str = r#"-module(m).
f(X) when X >= 16#FF -> [$a, $\x{41}, "s\x{41}", 'q a', 1_000, 2.5e-3 | X];
f(_) -> ~s"sig"x ++ """
    tri
      ple
    """.
%% done
g() -> a...b..c =:= <<1>> =/= ~b{x\ty}.
"#;

#[test]
fn every_two_way_split_matches_whole_text() {
    let options = ScannerOptions::new().with_text(true);
    let whole = feed(&[SAMPLE], &options).unwrap();
    let (direct, _) = scan_str(SAMPLE, at(1, 1), &options).unwrap();
    assert_eq!(whole, direct);

    for split in 1..SAMPLE.len() {
        let parts = feed(&[&SAMPLE[..split], &SAMPLE[split..]], &options).unwrap();
        assert_eq!(parts, whole, "split at {split}");
    }
}

#[test]
fn one_character_chunks() {
    let options = ScannerOptions::new();
    let chunks: Vec<String> = SAMPLE.chars().map(String::from).collect();
    let chunks: Vec<&str> = chunks.iter().map(String::as_str).collect();
    assert_eq!(feed(&chunks, &options), feed(&[SAMPLE], &options));
}

#[test]
fn escape_split_across_chunks() {
    let options = ScannerOptions::new();
    let toks = feed(&["\"a\\x{4", "1}\"."], &options).unwrap();
    assert_eq!(toks[0].value(), string("aA").as_ref());
}

#[test]
fn errors_do_not_depend_on_chunking() {
    let options = ScannerOptions::new();
    let text = "a. \"abc";
    let whole = feed(&[text], &options).unwrap_err();
    for split in 1..text.len() {
        let parts = feed(&[&text[..split], &text[split..]], &options).unwrap_err();
        assert_eq!(parts, whole, "split at {split}");
    }
}

#[test]
fn comment_stops_at_noncharacter() {
    let (err, end) = error("a % x\u{FFFE}y\nb.");
    assert_eq!(err, ScanError::illegal(at(1, 6), IllegalKind::Character));
    assert_eq!(end, at(1, 7));

    let (err, _) = error("% \u{FFFF}");
    assert_eq!(err, ScanError::illegal(at(1, 3), IllegalKind::Character));

    // same result when the comment is delivered in pieces
    let options = ScannerOptions::new();
    let text = "a % x\u{FFFE}y\nb.";
    let whole = feed(&[text], &options).unwrap_err();
    for (split, _) in text.char_indices().skip(1) {
        let parts = feed(&[&text[..split], &text[split..]], &options).unwrap_err();
        assert_eq!(parts, whole, "split at {split}");
    }
}

#[test]
fn line_numbers_saturate() {
    let (toks, end) = scan_str("a\nb", at(Line::MAX, 1), &ScannerOptions::new()).unwrap();
    assert_eq!(toks[1].location(), at(Line::MAX, 1));
    assert_eq!(end, at(Line::MAX, 2));

    let (toks, _) = scan_str("  x", at(1, u32::MAX - 1), &ScannerOptions::new()).unwrap();
    assert_eq!(toks[0].location(), at(1, u32::MAX));
}

// === Forms ===

#[test]
fn forms_continue_after_errors() {
    let options = ScannerOptions::new();
    let mut forms = Forms::new("a. 37#1. b.\n", at(1, 1), &options);
    assert_eq!(forms.next().unwrap().unwrap().len(), 2);
    let err = forms.next().unwrap().unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::IllegalBase("37".into()));
    let cats: Vec<_> = forms
        .next()
        .unwrap()
        .unwrap()
        .iter()
        .map(|t| t.category().into_owned())
        .collect();
    assert_eq!(cats, ["#", "integer", "dot"]);
    assert_eq!(forms.next().unwrap().unwrap().len(), 2);
    assert!(forms.next().is_none());
    assert_eq!(forms.location(), at(2, 1));
}

#[test]
fn forms_over_many_forms() {
    let options = ScannerOptions::new();
    let text = "a.\n".repeat(20_000);
    let mut forms = Forms::new(&text, at(1, 1), &options);
    let mut count = 0;
    for form in forms.by_ref() {
        assert_eq!(form.unwrap().len(), 2);
        count += 1;
    }
    assert_eq!(count, 20_000);
    assert_eq!(forms.location(), at(20_001, 1));
}

#[test]
fn forms_report_error_ends() {
    let options = ScannerOptions::new();
    let mut forms = Forms::new("x. 1__0. y.", at(1, 1), &options);
    assert!(matches!(forms.next_outcome(), Some(Outcome::Ok { .. })));
    let Some(Outcome::Error { error, end }) = forms.next_outcome() else {
        panic!("expected an error");
    };
    assert_eq!(error, ScanError::illegal(at(1, 4), IllegalKind::Integer));
    assert_eq!(end, at(1, 7));
    assert_eq!(forms.location(), at(1, 7));
}
