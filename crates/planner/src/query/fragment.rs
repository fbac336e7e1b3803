//! Immutable units of SQL text with positional parameter bindings.
//!
//! A [`Fragment`] interleaves literal text with unnumbered placeholders and
//! carries the bound values in placeholder order. Placeholders are numbered
//! only when the fragment is finalized through a [`Dialect`], so fragments can
//! be composed freely without renumbering.

use model::core::value::Value;
use serde::Serialize;

use crate::query::{
    dialect::{Dialect, Positional},
    renderer::{Render, Renderer},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Segment {
    Text(String),
    Placeholder,
}

/// Parameterized SQL text.
///
/// Invariant: the number of [`Segment::Placeholder`] entries always equals
/// the number of bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fragment {
    segments: Vec<Segment>,
    bindings: Vec<Value>,
}

impl Fragment {
    /// The identity of [`Fragment::combine`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Literal text with no bindings.
    pub fn text(sql: impl Into<String>) -> Self {
        Fragment {
            segments: vec![Segment::Text(sql.into())],
            bindings: Vec::new(),
        }
    }

    /// A single placeholder bound to `value`.
    pub fn param(value: Value) -> Self {
        Fragment {
            segments: vec![Segment::Placeholder],
            bindings: vec![value],
        }
    }

    /// A comma-separated list of placeholders, one per value. An empty input
    /// yields an empty fragment.
    pub fn params(values: impl IntoIterator<Item = Value>) -> Self {
        let mut fragment = Fragment::empty();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                fragment.segments.push(Segment::Text(", ".to_string()));
            }
            fragment.segments.push(Segment::Placeholder);
            fragment.bindings.push(value);
        }
        fragment
    }

    /// Appends `other` after `self`: text and bindings concatenate in order.
    pub fn combine(mut self, other: Fragment) -> Fragment {
        self.segments.extend(other.segments);
        self.bindings.extend(other.bindings);
        self
    }

    pub fn combine_all(fragments: impl IntoIterator<Item = Fragment>) -> Fragment {
        fragments
            .into_iter()
            .fold(Fragment::empty(), Fragment::combine)
    }

    /// Joins `fragments` with a literal separator between consecutive items.
    pub fn join(fragments: impl IntoIterator<Item = Fragment>, separator: &str) -> Fragment {
        let mut joined = Fragment::empty();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined = joined.combine(Fragment::text(separator));
            }
            joined = joined.combine(fragment);
        }
        joined
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Placeholder))
            .count()
    }

    /// Finalizes with anonymous `?` placeholders.
    pub fn finish(&self) -> (String, Vec<Value>) {
        self.finish_with(&Positional)
    }

    /// Finalizes with the placeholder syntax of `dialect`.
    pub fn finish_with(&self, dialect: &dyn Dialect) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(dialect);
        self.render(&mut renderer);
        renderer.finish()
    }
}

impl Render for Fragment {
    fn render(&self, r: &mut Renderer) {
        let mut bindings = self.bindings.iter();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => r.push_str(text),
                Segment::Placeholder => {
                    if let Some(value) = bindings.next() {
                        r.add_param(value.clone());
                    }
                }
            }
        }
    }
}

impl FromIterator<Fragment> for Fragment {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Fragment::combine_all(iter)
    }
}

impl From<&str> for Fragment {
    fn from(sql: &str) -> Self {
        Fragment::text(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{combine, query::dialect::Postgres, sql_text};
    use proptest::prelude::*;

    #[test]
    fn test_text_only_fragment_has_no_bindings() {
        let (sql, bindings) = Fragment::text("SELECT 1").finish();
        assert_eq!(sql, "SELECT 1");
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_combine_preserves_order() {
        let fragment = combine!(
            Fragment::text("a = "),
            Fragment::param(Value::Int(1)),
            sql_text!(" AND {} = ", "b"),
            Fragment::param(Value::from("x")),
        );

        let (sql, bindings) = fragment.finish();
        assert_eq!(sql, "a = ? AND b = ?");
        assert_eq!(bindings, vec![Value::Int(1), Value::from("x")]);
        assert_eq!(fragment.placeholder_count(), fragment.bindings().len());
    }

    #[test]
    fn test_params_render_comma_separated() {
        let (sql, bindings) = Fragment::params(vec![Value::Int(1), Value::Int(3)]).finish();
        assert_eq!(sql, "?, ?");
        assert_eq!(bindings, vec![Value::Int(1), Value::Int(3)]);

        let (sql, bindings) = Fragment::params(Vec::new()).finish();
        assert_eq!(sql, "");
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_postgres_numbering_follows_binding_order() {
        let fragment = combine!(
            Fragment::text("x IN ("),
            Fragment::params(vec![Value::Int(1), Value::Int(2)]),
            Fragment::text(") AND y = "),
            Fragment::param(Value::Int(3)),
        );

        let (sql, _) = fragment.finish_with(&Postgres);
        assert_eq!(sql, "x IN ($1, $2) AND y = $3");
    }

    #[test]
    fn test_join_inserts_separator_between_items() {
        let joined = Fragment::join(
            vec![Fragment::text("a"), Fragment::param(Value::Int(1)), Fragment::text("c")],
            " OR ",
        );
        assert_eq!(joined.finish().0, "a OR ? OR c");
        assert_eq!(Fragment::join(Vec::new(), " OR "), Fragment::empty());
    }

    fn arb_fragment() -> impl Strategy<Value = Fragment> {
        prop::collection::vec(
            prop_oneof![
                "[a-z ()=,]{0,6}".prop_map(Fragment::text),
                any::<i64>().prop_map(|v| Fragment::param(Value::Int(v))),
            ],
            0..5,
        )
        .prop_map(Fragment::combine_all)
    }

    proptest! {
        #[test]
        fn prop_combine_is_associative(a in arb_fragment(), b in arb_fragment(), c in arb_fragment()) {
            let left = a.clone().combine(b.clone()).combine(c.clone());
            let right = a.combine(b.combine(c));

            prop_assert_eq!(left.finish(), right.finish());
            prop_assert_eq!(left.finish_with(&Postgres), right.finish_with(&Postgres));
        }

        #[test]
        fn prop_placeholders_match_bindings(a in arb_fragment(), b in arb_fragment()) {
            let combined = a.combine(b);
            prop_assert_eq!(combined.placeholder_count(), combined.bindings().len());
        }
    }
}
