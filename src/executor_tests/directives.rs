use std::sync::{Arc, LazyLock};

use pretty_assertions::assert_eq;

use crate::{
    ast::{Directive, Document, Field, InputValue, Selection, Variables},
    executor::RequestId,
    graphql_value,
    schema::model::Operations,
    types::base::{Resolvers, TypedObject},
    value::{Object, Value},
};

struct TestType;

static TEST_TYPE: LazyLock<Resolvers<TestType>> = LazyLock::new(|| {
    Resolvers::<TestType>::new("TestType")
        .field("a", |_, p| Box::pin(async move { Ok(p.resolve("a").await) }))
        .field("b", |_, p| Box::pin(async move { Ok(p.resolve("b").await) }))
});

async fn run_variable_query<F>(selection_set: Vec<Selection>, vars: Variables, f: F)
where
    F: Fn(&Object),
{
    let schema = Operations::new(
        Arc::new(TypedObject::new(Arc::new(TestType), &TEST_TYPE)),
        None,
        None,
    );
    let doc = Document::query(selection_set);

    let (result, errs) = schema
        .execute(RequestId::next(), &doc, None, &vars)
        .await
        .expect("Execution failed");

    assert_eq!(errs, []);

    println!("Result: {result:#?}");

    let obj = result.as_object_value().expect("Result is not an object");

    f(obj);
}

async fn run_query<F>(selection_set: Vec<Selection>, f: F)
where
    F: Fn(&Object),
{
    run_variable_query(selection_set, Variables::default(), f).await;
}

fn b_with(directive: Directive) -> Selection {
    Field::new("b").directive(directive).into()
}

#[tokio::test]
async fn scalar_include_true() {
    run_query(vec!["a".into(), b_with(Directive::include(true))], |result| {
        assert_eq!(result.get_field_value("a"), Some(&graphql_value!("a")));
        assert_eq!(result.get_field_value("b"), Some(&graphql_value!("b")));
    })
    .await;
}

#[tokio::test]
async fn scalar_include_false() {
    run_query(vec!["a".into(), b_with(Directive::include(false))], |result| {
        assert_eq!(result.get_field_value("a"), Some(&graphql_value!("a")));
        assert_eq!(result.get_field_value("b"), None);
    })
    .await;
}

#[tokio::test]
async fn scalar_skip_false() {
    run_query(vec!["a".into(), b_with(Directive::skip(false))], |result| {
        assert_eq!(result.get_field_value("a"), Some(&graphql_value!("a")));
        assert_eq!(result.get_field_value("b"), Some(&graphql_value!("b")));
    })
    .await;
}

#[tokio::test]
async fn scalar_skip_true() {
    run_query(vec!["a".into(), b_with(Directive::skip(true))], |result| {
        assert_eq!(result.get_field_value("a"), Some(&graphql_value!("a")));
        assert_eq!(result.get_field_value("b"), None);
    })
    .await;
}

#[tokio::test]
async fn skip_and_include_both_apply() {
    let b = Field::new("b")
        .directive(Directive::skip(false))
        .directive(Directive::include(false));

    run_query(vec!["a".into(), b.into()], |result| {
        assert_eq!(result.field_count(), 1);
        assert_eq!(result.get_field_value("b"), None);
    })
    .await;
}

#[tokio::test]
async fn include_from_variable() {
    let mut vars = Variables::default();
    vars.add_field("withB", Value::Boolean(false)).unwrap();

    run_variable_query(
        vec![
            "a".into(),
            b_with(Directive::include(InputValue::variable("withB"))),
        ],
        vars,
        |result| {
            assert_eq!(result.get_field_value("a"), Some(&graphql_value!("a")));
            assert_eq!(result.get_field_value("b"), None);
        },
    )
    .await;
}

#[tokio::test]
async fn inline_fragment_include_false() {
    let mut fragment = Selection::inline(Some("TestType"), vec!["b".into()]);
    if let Selection::InlineFragment(f) = &mut fragment {
        f.directives.push(Directive::include(false));
    }

    run_query(vec!["a".into(), fragment], |result| {
        assert_eq!(result.get_field_value("a"), Some(&graphql_value!("a")));
        assert_eq!(result.get_field_value("b"), None);
    })
    .await;
}

#[tokio::test]
async fn fragment_spread_skip_true() {
    let mut spread = Selection::spread("Frag");
    if let Selection::FragmentSpread(s) = &mut spread {
        s.directives.push(Directive::skip(true));
    }
    let schema = Operations::new(
        Arc::new(TypedObject::new(Arc::new(TestType), &TEST_TYPE)),
        None,
        None,
    );
    let doc = Document::query(vec!["a".into(), spread]).fragment(
        "Frag",
        "TestType",
        vec!["b".into()],
    );

    assert_eq!(
        schema
            .execute(RequestId::next(), &doc, None, &Variables::default())
            .await,
        Ok((graphql_value!({"a": "a"}), vec![])),
    );
}

#[tokio::test]
async fn malformed_condition_keeps_the_field() {
    run_query(vec!["a".into(), b_with(Directive::skip("yes"))], |result| {
        assert_eq!(result.get_field_value("b"), Some(&graphql_value!("b")));
    })
    .await;
}
