use super::parser::{parse, Expr, Op};
use crate::error::QueryError;
use crate::index::{DocId, PostingEntry};
use std::collections::HashSet;

pub type DocSet = HashSet<DocId>;

/// Read-only view of an index that boolean queries run against.
pub trait PostingSource {
    /// Posting entry for a raw query term, if the term is indexed.
    fn lookup(&self, term: &str) -> Option<&PostingEntry>;

    /// Number of documents; complements range over `[0, universe)`.
    fn universe(&self) -> DocId;
}

/// Walks the smaller set and probes the larger one.
pub fn intersect(a: &DocSet, b: &DocSet) -> DocSet {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().copied().filter(|id| large.contains(id)).collect()
}

pub fn union(a: DocSet, b: DocSet) -> DocSet {
    let (mut large, small) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    large.extend(small);
    large
}

pub fn complement(a: &DocSet, universe: DocId) -> DocSet {
    (0..universe).filter(|id| !a.contains(id)).collect()
}

pub fn evaluate<S: PostingSource + ?Sized>(expr: &Expr, source: &S) -> DocSet {
    match expr {
        Expr::Term(term) => source.lookup(term).map(|e| e.doc_ids().collect()).unwrap_or_default(),
        Expr::Chain(first, rest) => rest.iter().fold(evaluate(first, source), |acc, (op, next)| match op {
            Op::And => intersect(&acc, &evaluate(next, source)),
            Op::Or => union(acc, evaluate(next, source)),
        }),
        Expr::Not(inner) => complement(&evaluate(inner, source), source.universe()),
        Expr::Group(inner) => evaluate(inner, source),
        Expr::Invalid => DocSet::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub docs: DocSet,
    pub errors: Vec<QueryError>,
}

/// Parse and evaluate in one step.
pub fn run<S: PostingSource + ?Sized>(query: &str, source: &S) -> Evaluation {
    let parsed = parse(query);
    let docs = evaluate(&parsed.expr, source);
    Evaluation { docs, errors: parsed.errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PostingStore;

    struct Fixture {
        store: PostingStore,
        universe: DocId,
    }

    impl PostingSource for Fixture {
        fn lookup(&self, term: &str) -> Option<&PostingEntry> { self.store.get(term) }
        fn universe(&self) -> DocId { self.universe }
    }

    fn fixture() -> Fixture {
        let mut store = PostingStore::new();
        for (term, docs) in [("a", &[0, 1, 2][..]), ("b", &[1, 3][..]), ("c", &[4][..])] {
            for &d in docs {
                store.add_occurrence(term, d);
            }
        }
        Fixture { store, universe: 5 }
    }

    fn set(ids: &[DocId]) -> DocSet { ids.iter().copied().collect() }

    fn eval(q: &str) -> DocSet {
        let out = run(q, &fixture());
        assert!(out.errors.is_empty(), "{q}: {:?}", out.errors);
        out.docs
    }

    #[test]
    fn set_algebra_laws() {
        let a = set(&[0, 1, 2]);
        let b = set(&[1, 3, 7, 9]);
        assert_eq!(intersect(&a, &b), intersect(&b, &a));
        assert_eq!(union(a.clone(), b.clone()), union(b.clone(), a.clone()));
        assert_eq!(complement(&complement(&a, 5), 5), a);
        assert!(intersect(&a, &complement(&a, 5)).is_empty());
        assert_eq!(union(a.clone(), complement(&a, 5)), set(&[0, 1, 2, 3, 4]));
    }

    #[test]
    fn left_to_right_evaluation() {
        assert_eq!(eval("a && b || c"), set(&[1, 4]));
        assert_eq!(eval("a && (b || c)"), set(&[1]));
        assert_eq!(eval("c || a && b"), set(&[1]));
    }

    #[test]
    fn negation_uses_the_universe() {
        assert_eq!(eval("!a"), set(&[3, 4]));
        assert_eq!(eval("!missing"), set(&[0, 1, 2, 3, 4]));
        assert_eq!(eval("a && !b"), set(&[0, 2]));
    }

    #[test]
    fn unknown_terms_match_nothing() {
        assert!(eval("zzz").is_empty());
        assert!(eval("a && zzz").is_empty());
    }

    #[test]
    fn broken_groups_evaluate_to_empty() {
        let out = run("c || (a && b", &fixture());
        assert_eq!(out.docs, set(&[4]));
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn long_operator_chains_fold_in_order() {
        let query = format!("c{}", " || a && b".repeat(50_000));
        assert_eq!(eval(&query), set(&[1]));

        let query = vec!["!b"; 100_000].join(" && ");
        assert_eq!(eval(&query), set(&[0, 2, 4]));
    }

    #[test]
    fn overly_nested_query_matches_nothing() {
        let out = run(&format!("{}a", "(".repeat(100_000)), &fixture());
        assert!(out.docs.is_empty());
        assert_eq!(out.errors.len(), 1);
        assert!(matches!(out.errors[0], QueryError::TooDeep { .. }));
    }
}
