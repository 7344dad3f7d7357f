//! End-to-end transformation programs, each checked against several inputs.

use anyhow::Result;
use flashfill::tokens::{self, bounded_sequence, negate, sequence};
use flashfill::{
    AtomicExpr, Bindings, Conditional, Loop, Match, Occurrence, Position, Switch, TraceExpr, Unresolvable,
    Var,
};

fn nth(n: i32) -> Result<Occurrence> {
    Ok(Occurrence::new(n)?)
}

fn whole(var: Var) -> AtomicExpr {
    AtomicExpr::substr(var, Position::constant(0), Position::constant(-1))
}

#[test]
fn product_size_after_first_number() -> Result<()> {
    let e = AtomicExpr::substr(
        Var::Subject,
        Position::boundary(tokens::epsilon(), tokens::num(), nth(1)?),
        Position::constant(-1),
    );

    assert_eq!(e.eval_str("BTR KRNL WK CORN 15Z")?, "15Z");
    assert_eq!(e.eval_str("CAMP DRY DBL NDL 3.6 OZ")?, "3.6 OZ");
    assert_eq!(e.eval_str("CHORE BOY HD SC SPNG 1 PK")?, "1 PK");
    assert_eq!(e.eval_str("FRENCH WORCESTERSHIRE 5 Z")?, "5 Z");
    assert_eq!(e.eval_str("O F TOMATO PASTE 6 OZ")?, "6 OZ");
    Ok(())
}

#[test]
fn directory_prefix() -> Result<()> {
    let e = AtomicExpr::substr(
        Var::Subject,
        Position::constant(0),
        Position::boundary(tokens::slash(), tokens::epsilon(), Occurrence::LAST),
    );

    assert_eq!(e.eval_str(r"Company\Code\Index.html")?, r"Company\Code\");
    assert_eq!(e.eval_str(r"Company\Docs\Spec\specs.doc")?, r"Company\Docs\Spec\");
    assert_eq!(e.eval_str("usr/local/bin")?, "usr/local/");
    assert_eq!(e.eval_str("no-directory"), Err(Unresolvable));
    Ok(())
}

#[test]
fn acronyms() {
    let e = AtomicExpr::from(Loop::new(|k| {
        TraceExpr::concat([AtomicExpr::substr2(Var::Subject, tokens::upper(), k)])
    }));

    assert_eq!(e.eval_str("International Business Machines").as_deref(), Ok("IBM"));
    assert_eq!(e.eval_str("Principles Of Programming Languages").as_deref(), Ok("POPL"));
    assert_eq!(
        e.eval_str("International Conference on Software Engineering").as_deref(),
        Ok("ICSE")
    );
}

#[test]
fn fractions_inside_parentheses() {
    let e = AtomicExpr::from(Loop::new(|k| {
        TraceExpr::concat([
            AtomicExpr::substr(
                Var::Subject,
                Position::boundary(tokens::left_paren(), sequence(&tokens::num(), &tokens::slash()), k),
                Position::boundary(sequence(&tokens::slash(), &tokens::num()), tokens::right_paren(), k),
            ),
            AtomicExpr::const_str("#"),
        ])
    }));

    assert_eq!(e.eval_str("(6/7)(4/5)(14/1)").as_deref(), Ok("6/7#4/5#14/1#"));
    assert_eq!(e.eval_str("49(28/11)(14/1)").as_deref(), Ok("28/11#14/1#"));
    assert_eq!(e.eval_str("()(28/11)(14/1)").as_deref(), Ok("28/11#14/1#"));
}

#[test]
fn collapse_whitespace() -> Result<()> {
    let word_and_space = Loop::new(|k| {
        TraceExpr::concat([
            AtomicExpr::substr(
                Var::Subject,
                Position::boundary(tokens::epsilon(), tokens::non_whitespace(), k),
                Position::boundary(
                    tokens::non_whitespace(),
                    sequence(&tokens::whitespace(), &tokens::non_whitespace()),
                    k,
                ),
            ),
            AtomicExpr::const_str(" "),
        ])
    });
    let e = TraceExpr::concat([
        word_and_space.into(),
        AtomicExpr::substr2(Var::Subject, tokens::non_whitespace(), Occurrence::LAST),
    ]);

    assert_eq!(e.eval_str("     Oege   de       Moor")?, "Oege de Moor");
    assert_eq!(e.eval_str("Kathleen   Fisher   AT&T Labs")?, "Kathleen Fisher AT&T Labs");
    Ok(())
}

#[test]
fn two_columns_with_explicit_failure() -> Result<()> {
    let v1 = Var::column("v1");
    let v2 = Var::column("v2");
    let both_present = Conditional::Conjunct(vec![
        Conditional::matches(v1.clone(), tokens::word()),
        Conditional::matches(v2.clone(), tokens::word()),
    ]);
    let either_missing = Conditional::Disjunct(vec![
        Conditional::not_matches(v1.clone(), tokens::word()),
        Conditional::not_matches(v2.clone(), tokens::word()),
    ]);
    let joined = TraceExpr::concat([
        whole(v1),
        AtomicExpr::const_str("("),
        whole(v2),
        AtomicExpr::const_str(")"),
    ]);
    let program = Switch::new(vec![(both_present, joined), (either_missing, TraceExpr::Epsilon)]);

    let row = |a: Option<&'static str>, b: Option<&'static str>| {
        let mut bindings = Bindings::new();
        if let Some(a) = a {
            bindings = bindings.with_column("v1", a);
        }
        if let Some(b) = b {
            bindings = bindings.with_column("v2", b);
        }
        program.eval(&bindings)
    };

    assert_eq!(row(Some("Alex"), Some("Asst."))?, "Alex(Asst.)");
    assert_eq!(row(Some("Jim"), Some("Manager"))?, "Jim(Manager)");
    assert_eq!(row(Some("Ryan"), None), Err(Unresolvable));
    assert_eq!(row(None, Some("Asst.")), Err(Unresolvable));
    Ok(())
}

#[test]
fn month_from_mixed_date_formats() -> Result<()> {
    let v = Var::Subject;
    let slash_month = AtomicExpr::substr(
        v.clone(),
        Position::boundary(tokens::start(), tokens::epsilon(), nth(1)?),
        Position::boundary(tokens::epsilon(), tokens::slash(), nth(1)?),
    );
    let dot_month = AtomicExpr::substr(
        v.clone(),
        Position::boundary(tokens::dot(), tokens::epsilon(), nth(1)?),
        Position::boundary(tokens::epsilon(), tokens::dot(), nth(2)?),
    );
    let hyphen_month = AtomicExpr::substr(
        v.clone(),
        Position::boundary(tokens::hyphen(), tokens::epsilon(), nth(2)?),
        Position::boundary(tokens::end(), tokens::epsilon(), nth(1)?),
    );
    let program = Switch::default()
        .case(Conditional::matches(v.clone(), tokens::slash()), slash_month)
        .case(Conditional::matches(v.clone(), tokens::dot()), dot_month)
        .case(Conditional::matches(v, tokens::hyphen()), hyphen_month);

    assert_eq!(program.eval_str("01/21/2001")?, "01");
    assert_eq!(program.eval_str("22.02.2002")?, "02");
    assert_eq!(program.eval_str("2003-23-03")?, "03");
    assert_eq!(program.eval_str("20030323"), Err(Unresolvable));
    Ok(())
}

#[test]
fn reformat_names() -> Result<()> {
    let v = Var::Subject;
    let not_dotted = negate(&tokens::dot());
    let initial = AtomicExpr::substr(
        v.clone(),
        Position::boundary(tokens::epsilon(), bounded_sequence(&tokens::alpha(), &not_dotted), nth(1)?),
        Position::boundary(tokens::epsilon(), bounded_sequence(&tokens::lower(), &not_dotted), nth(1)?),
    );
    let surname_before_comma = AtomicExpr::substr(
        v.clone(),
        Position::boundary(tokens::epsilon(), sequence(&tokens::alpha(), &tokens::comma()), nth(1)?),
        Position::boundary(tokens::alpha(), tokens::comma(), nth(1)?),
    );
    let with_comma = TraceExpr::concat([
        surname_before_comma,
        AtomicExpr::const_str(", "),
        initial.clone(),
        AtomicExpr::const_str("."),
    ]);
    let without_comma = TraceExpr::concat([
        AtomicExpr::substr2(v.clone(), tokens::alpha(), Occurrence::LAST),
        AtomicExpr::const_str(", "),
        initial,
        AtomicExpr::const_str("."),
    ]);
    let program = Switch::new(vec![
        (Conditional::matches(v.clone(), tokens::comma()), with_comma),
        (Conditional::matches(v, negate(&tokens::comma())), without_comma),
    ]);

    assert_eq!(program.eval_str("Dr. Eran Yahav")?, "Yahav, E.");
    assert_eq!(program.eval_str("Prof. Kathleen S. Fisher")?, "Fisher, K.");
    assert_eq!(program.eval_str("Bill Gates, Sr.")?, "Gates, B.");
    assert_eq!(program.eval_str("George Ciprian Necula")?, "Necula, G.");
    assert_eq!(program.eval_str("Ken McMillan, II")?, "McMillan, K.");
    Ok(())
}

#[test]
fn normalize_phone_numbers() -> Result<()> {
    let v = Var::Subject;
    let number = |n: i32| -> Result<AtomicExpr> { Ok(AtomicExpr::substr2(Var::Subject, tokens::num(), nth(n)?)) };
    let three_numbers = Match::new(v, tokens::num()).at_least(3);
    let full = TraceExpr::concat([
        number(1)?,
        AtomicExpr::const_str("-"),
        number(2)?,
        AtomicExpr::const_str("-"),
        number(3)?,
    ]);
    let local = TraceExpr::concat([
        AtomicExpr::const_str("425-"),
        number(1)?,
        AtomicExpr::const_str("-"),
        number(2)?,
    ]);
    let program = Switch::new(vec![
        (Conditional::Match(three_numbers.clone()), full),
        (Conditional::NotMatch(three_numbers), local),
    ]);

    assert_eq!(program.eval_str("323-708-7700")?, "323-708-7700");
    assert_eq!(program.eval_str("(425)-706-7709")?, "425-706-7709");
    assert_eq!(program.eval_str("510.220.5586")?, "510-220-5586");
    assert_eq!(program.eval_str("235 7654")?, "425-235-7654");
    assert_eq!(program.eval_str("745-8139")?, "425-745-8139");
    Ok(())
}

#[test]
fn case_lines_from_two_columns() -> Result<()> {
    let e = TraceExpr::concat([
        AtomicExpr::const_str("case "),
        whole(Var::column("code")),
        AtomicExpr::const_str(": return “"),
        whole(Var::column("country")),
        AtomicExpr::const_str("”;"),
    ]);
    let row = |country, code| e.eval(&Bindings::new().with_column("country", country).with_column("code", code));

    assert_eq!(row("Albania", "355")?, "case 355: return “Albania”;");
    assert_eq!(row("Algeria", "213")?, "case 213: return “Algeria”;");
    Ok(())
}

#[test]
fn programs_are_shared_across_threads() -> Result<()> {
    let acronym = AtomicExpr::from(Loop::new(|k| AtomicExpr::substr2(Var::Subject, tokens::upper(), k).into()));
    let inputs = ["International Business Machines", "Principles Of Programming Languages"];
    let acronym = &acronym;

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || acronym.eval_str(input)))
            .collect();
        handles.into_iter().map(|h| h.join().expect("evaluation thread panicked")).collect()
    });

    assert_eq!(results, vec![Ok("IBM".to_owned()), Ok("POPL".to_owned())]);
    Ok(())
}
