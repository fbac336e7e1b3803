#[cfg(test)]
mod tests {
    use crate::{Customer, check_query, customer_list, ids, object_schema, sql_schema};
    use model::core::value::Value;
    use planner::{
        Expr, ObjectQueryable, Postgres, Queryable, RecordExpr, SqlQueryable, and, equals, is_one_of,
        not, or,
    };
    use std::thread;
    use tracing_test::traced_test;

    // Scenario: no filter is applied.
    // Expected Outcome: the bare mapped table, and every customer in memory.
    #[test]
    fn all_customers() {
        let (sql, bindings) = sql_schema().to_sql().unwrap();
        assert_eq!(
            sql,
            "SELECT customer_id as customerID, name, address FROM customer tbl"
        );
        assert!(bindings.is_empty());
        assert_eq!(object_schema().len(), customer_list().len());
    }

    // Scenario: a single customer selected by id.
    #[test]
    fn customer_by_id() {
        check_query(
            |c| equals(c.field::<i64>("customerID"), 1),
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE (flt.customerID = ?)",
            &[Value::Int(1)],
            &[1],
        );
    }

    // Scenario: customers selected by a list of ids.
    #[traced_test]
    #[test]
    fn customers_by_id_list() {
        check_query(
            |c| is_one_of(c.field::<i64>("customerID"), [1, 3]),
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE (flt.customerID IN (?, ?))",
            &[Value::Int(1), Value::Int(3)],
            &[1, 3],
        );
    }

    // Scenario: a nested AND/OR/NOT predicate over two fields.
    // Expected Outcome: customers 1 and 4; customer 3 is excluded by the NOT.
    #[test]
    fn customers_by_boolean_expression() {
        check_query(
            |c| {
                and([
                    or([
                        c.field::<i64>("customerID").equals(1),
                        c.field::<i64>("customerID").equals(3),
                        c.field::<String>("name").equals("customer 4"),
                    ]),
                    not(c.field::<i64>("customerID").equals(3)),
                ])
            },
            concat!(
                "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt ",
                "WHERE (((flt.customerID = ?) OR (flt.customerID = ?) OR (flt.name = ?)) AND (NOT (flt.customerID = ?)))"
            ),
            &[
                Value::Int(1),
                Value::Int(3),
                Value::String("customer 4".into()),
                Value::Int(3),
            ],
            &[1, 4],
        );
    }

    // Scenario: the nullable address column is tested for presence and absence.
    // Expected Outcome: the two predicates partition the customers.
    #[test]
    fn customers_partitioned_by_address() {
        check_query(
            |c| c.field::<String>("address").is_null(),
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE (flt.address IS NULL)",
            &[],
            &[1, 2],
        );
        check_query(
            |c| c.field::<String>("address").is_not_null(),
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE (flt.address IS NOT NULL)",
            &[],
            &[3, 4],
        );
    }

    // Scenario: comparing against a NULL column.
    // Expected Outcome: unknown is not true, and neither is its negation.
    #[test]
    fn null_comparison_keeps_nothing_either_way() {
        let query = object_schema();
        let matched = query
            .filter(|c| c.field::<String>("address").equals("nowhere"))
            .unwrap();
        let negated = query
            .filter(|c| c.field::<String>("address").equals("nowhere").not())
            .unwrap();

        assert!(ids(&matched).is_empty());
        assert_eq!(ids(&negated), vec![3, 4]);
    }

    // Scenario: an empty candidate list.
    // Expected Outcome: an empty IN list in SQL, nothing in memory.
    #[test]
    fn empty_id_list_matches_nothing() {
        check_query(
            |c| c.field::<i64>("customerID").is_one_of(Vec::<i64>::new()),
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE (flt.customerID IN ())",
            &[],
            &[],
        );
    }

    // Scenario: empty conjunctions and disjunctions.
    // Expected Outcome: their identities, keeping everything and nothing.
    #[test]
    fn empty_connectives_use_their_identity() {
        check_query(
            |_| and(Vec::<Expr<bool>>::new()),
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE TRUE",
            &[],
            &[1, 2, 3, 4],
        );
        check_query(
            |_| or(Vec::<Expr<bool>>::new()),
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE FALSE",
            &[],
            &[],
        );
    }

    // Scenario: two filters stacked on each other.
    // Expected Outcome: each layer gets its own alias; in memory the filters compose.
    #[test]
    fn stacked_filters() {
        let first = |c: &RecordExpr<Customer>| {
            c.field::<i64>("customerID").is_one_of([1, 2, 3])
        };
        let second = |c: &RecordExpr<Customer>| c.field::<String>("address").is_null();

        let sql = sql_schema().filter(first).unwrap().filter(second).unwrap();
        let (text, bindings) = sql.to_sql_with(&Postgres).unwrap();
        assert_eq!(
            text,
            concat!(
                "SELECT * FROM (",
                "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt ",
                "WHERE (flt.customerID IN ($1, $2, $3))",
                ") flt2 WHERE (flt2.address IS NULL)"
            )
        );
        assert_eq!(bindings, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);

        let objects = object_schema().filter(first).unwrap().filter(second).unwrap();
        assert_eq!(ids(&objects), vec![1, 2]);
    }

    // Scenario: joining customers to themselves on id.
    // Expected Outcome: SQL refuses; in memory every customer pairs with itself.
    #[test]
    fn self_join() {
        let on = |l: &RecordExpr<Customer>, r: &RecordExpr<Customer>| {
            l.field::<i64>("customerID").equals(r.field::<i64>("customerID"))
        };

        assert!(sql_schema().join(&sql_schema(), on).is_err());

        let joined = object_schema().join(&object_schema(), on).unwrap();
        assert_eq!(joined.len(), 4);
        for pair in joined.values() {
            assert_eq!(pair.left.customer_id, pair.right.customer_id);
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    // Scenario: predicates and plans are handed to other threads.
    // Expected Outcome: both are `Send + Sync` and render the same SQL there.
    #[test]
    fn plans_are_shareable_across_threads() {
        assert_send_sync::<Expr<bool>>();
        assert_send_sync::<SqlQueryable<Customer>>();
        assert_send_sync::<ObjectQueryable<Customer>>();

        let query = sql_schema()
            .filter(|c| c.field::<i64>("customerID").equals(1))
            .unwrap();
        let expected = query.to_sql().unwrap();

        let handle = thread::spawn(move || query.to_sql().unwrap());
        assert_eq!(handle.join().unwrap(), expected);
    }
}
