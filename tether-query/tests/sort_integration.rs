//! Integration tests for sort expression parsing and rendering.

use pretty_assertions::assert_eq;
use tether_query::{
    ErrorCode, FieldResolver, OrderBy, QueryError, QueryResult, ResolvedField, SimpleFieldResolver,
    SortField, SortOrder, build_order_by, parse_sort,
};
use tether_schema::{Collection, Field};

/// Test directions and prefixes
#[test]
fn test_parse_prefixes() {
    assert_eq!(
        parse_sort("-name,+created"),
        vec![
            SortField::new("name", SortOrder::Desc),
            SortField::new("created", SortOrder::Asc),
        ]
    );
    assert_eq!(parse_sort("age"), vec![SortField::new("age", SortOrder::Asc)]);
    assert_eq!(
        parse_sort(" -score , title "),
        vec![
            SortField::new("score", SortOrder::Desc),
            SortField::new("title", SortOrder::Asc),
        ]
    );
}

/// Test that empty entries survive parsing and fail rendering
#[test]
fn test_empty_entries_are_rejected_when_rendered() {
    let fields = parse_sort("name,,");
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[1], SortField::new("", SortOrder::Asc));

    let resolver = SimpleFieldResolver::new(["name"]);
    let err = build_order_by(&fields, &resolver).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidSortField);
}

/// Test rendering against a collection schema with a mapped column
#[test]
fn test_render_for_collection() {
    let users = Collection::new("c_users", "users")
        .with_field(Field::text("name"))
        .with_field(Field::date("created"));
    let resolver = SimpleFieldResolver::for_collection(&users).map("created", "created_at");

    let order = build_order_by(&parse_sort("-created,name,id"), &resolver).unwrap();
    assert_eq!(order.to_sql(), "created_at DESC, name ASC, id ASC");

    let single = parse_sort("-name");
    assert_eq!(single[0].build_expr(&resolver).unwrap(), "name DESC");
    assert!(matches!(
        build_order_by(&single, &resolver).unwrap(),
        OrderBy::Field(_)
    ));
}

/// Test that unknown fields are rejected with the resolver error as source
#[test]
fn test_unknown_field() {
    let resolver = SimpleFieldResolver::new(["name"]);
    let err = parse_sort("-password")[0].build_expr(&resolver).unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidSortField);
    assert!(err.to_string().contains("password"));
    assert!(std::error::Error::source(&err).is_some());
}

/// Test the checks applied to resolver output
#[test]
fn test_resolver_output_checks() {
    let resolver = |field: &str| -> QueryResult<ResolvedField> {
        match field {
            "nothing" => Ok(ResolvedField::new("NULL")),
            "blank" => Ok(ResolvedField::new("")),
            "random" => Ok(ResolvedField::new("random(:seed)").with_param("seed", 42)),
            "broken" => Err(QueryError::internal("resolver failed")),
            other => Ok(ResolvedField::new(format!("t.{other}"))),
        }
    };

    for name in ["nothing", "blank", "random", "broken"] {
        let err = SortField::new(name, SortOrder::Asc)
            .build_expr(&resolver)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSortField, "field {name}");
    }

    assert_eq!(
        SortField::new("title", SortOrder::Desc)
            .build_expr(&resolver)
            .unwrap(),
        "t.title DESC"
    );
    assert_eq!(resolver.resolve("x").unwrap().identifier, "t.x");
}
